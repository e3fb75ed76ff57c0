//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Both tables share one layout, so the row,
//! insert, and changeset structs are generated per table by `record_rows!`.

use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{NewRecord, RecordChanges, RecordDraft, RecordId};

use super::schema::{products, users};

/// Generate the read row, insert row, and changeset for one record table.
///
/// The nullable detail column is mapped onto a field named `detail` so the
/// repository code is identical for every table.
macro_rules! record_rows {
    (
        table: $table:ident,
        detail: $detail:ident,
        row: $row:ident,
        new_row: $new_row:ident,
        changeset: $changeset:ident $(,)?
    ) => {
        #[derive(Debug, Clone, Queryable, Selectable)]
        #[diesel(table_name = $table)]
        #[diesel(check_for_backend(diesel::pg::Pg))]
        pub(crate) struct $row {
            pub id: Uuid,
            pub name: String,
            #[diesel(column_name = $detail)]
            pub detail: Option<String>,
            pub is_archived: bool,
            pub created_at: i64,
            pub updated_at: i64,
        }

        impl From<$row> for RecordDraft {
            fn from(row: $row) -> Self {
                Self {
                    id: RecordId::from_uuid(row.id),
                    name: row.name,
                    detail: row.detail,
                    is_archived: row.is_archived,
                    created_at: row.created_at,
                    updated_at: row.updated_at,
                }
            }
        }

        #[derive(Debug, Clone, Insertable)]
        #[diesel(table_name = $table)]
        pub(crate) struct $new_row<'a> {
            pub name: &'a str,
            #[diesel(column_name = $detail)]
            pub detail: Option<&'a str>,
            pub is_archived: bool,
            pub created_at: i64,
            pub updated_at: i64,
        }

        impl<'a> From<&'a NewRecord> for $new_row<'a> {
            fn from(record: &'a NewRecord) -> Self {
                Self {
                    name: record.name.as_str(),
                    detail: record.detail.as_deref(),
                    is_archived: false,
                    created_at: record.created_at,
                    updated_at: record.updated_at,
                }
            }
        }

        /// `None` detail clears the column rather than leaving it untouched.
        #[derive(Debug, Clone, AsChangeset)]
        #[diesel(table_name = $table)]
        #[diesel(treat_none_as_null = true)]
        pub(crate) struct $changeset<'a> {
            pub name: &'a str,
            #[diesel(column_name = $detail)]
            pub detail: Option<&'a str>,
            pub updated_at: i64,
        }

        impl<'a> From<&'a RecordChanges> for $changeset<'a> {
            fn from(changes: &'a RecordChanges) -> Self {
                Self {
                    name: changes.name.as_str(),
                    detail: changes.detail.as_deref(),
                    updated_at: changes.updated_at,
                }
            }
        }
    };
}

record_rows! {
    table: products,
    detail: description,
    row: ProductRow,
    new_row: NewProductRow,
    changeset: ProductChangeset,
}

record_rows! {
    table: users,
    detail: address,
    row: UserRow,
    new_row: NewUserRow,
    changeset: UserChangeset,
}
