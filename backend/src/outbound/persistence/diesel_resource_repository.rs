//! PostgreSQL-backed `ResourceRepository` implementations using Diesel ORM.
//!
//! Products and users live in separate tables with identical layouts. The
//! `diesel_resource_repository!` macro expands the same adapter over each
//! table so the two implementations cannot drift apart.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageRequest;

use crate::domain::ports::{RepositoryError, ResourceRepository};
use crate::domain::{
    ArchiveFilter, NewRecord, Products, Record, RecordChanges, RecordDraft, RecordId, Resource,
    Users,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{
    NewProductRow, NewUserRow, ProductChangeset, ProductRow, UserChangeset, UserRow,
};
use super::pool::DbPool;
use super::schema::{products, users};

/// Validate a loaded row through the domain constructor.
fn row_to_record<R, Row>(row: Row) -> Result<Record<R>, RepositoryError>
where
    R: Resource,
    RecordDraft: From<Row>,
{
    Record::new(RecordDraft::from(row))
        .map_err(|err| RepositoryError::query(format!("invalid stored {}: {err}", R::NAME)))
}

fn page_offset(page: PageRequest) -> Result<i64, RepositoryError> {
    i64::try_from(page.offset()).map_err(|_| RepositoryError::query("page offset out of range"))
}

fn rows_affected(count: usize) -> u64 {
    u64::try_from(count).unwrap_or(u64::MAX)
}

macro_rules! diesel_resource_repository {
    (
        $(#[$meta:meta])*
        $name:ident for $resource:ty {
            table: $table:ident,
            row: $row:ty,
            new_row: $new_row:ident,
            changeset: $changeset:ident $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name {
            pool: DbPool,
        }

        impl $name {
            /// Create a new repository with the given connection pool.
            pub fn new(pool: DbPool) -> Self {
                Self { pool }
            }
        }

        #[async_trait]
        impl ResourceRepository<$resource> for $name {
            async fn create(&self, record: &NewRecord) -> Result<RecordId, RepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let row = $new_row::from(record);

                let id: uuid::Uuid = diesel::insert_into($table::table)
                    .values(&row)
                    .returning($table::id)
                    .get_result(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;

                Ok(RecordId::from_uuid(id))
            }

            async fn read_many(
                &self,
                page: PageRequest,
                filter: ArchiveFilter,
            ) -> Result<Vec<Record<$resource>>, RepositoryError> {
                let offset = page_offset(page)?;
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;

                let mut query = $table::table
                    .select(<$row>::as_select())
                    .into_boxed();
                if let Some(is_archived) = filter.is_archived {
                    query = query.filter($table::is_archived.eq(is_archived));
                }

                let rows: Vec<$row> = query
                    .order(($table::created_at.asc(), $table::id.asc()))
                    .limit(i64::from(page.limit()))
                    .offset(offset)
                    .load(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;

                rows.into_iter()
                    .map(row_to_record::<$resource, $row>)
                    .collect()
            }

            async fn read_one(
                &self,
                id: &RecordId,
            ) -> Result<Record<$resource>, RepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;

                let row: Option<$row> = $table::table
                    .find(*id.as_uuid())
                    .select(<$row>::as_select())
                    .first(&mut conn)
                    .await
                    .optional()
                    .map_err(map_diesel_error)?;

                row.map_or_else(
                    || Err(RepositoryError::not_found(*id)),
                    row_to_record::<$resource, $row>,
                )
            }

            async fn update(
                &self,
                id: &RecordId,
                changes: &RecordChanges,
            ) -> Result<u64, RepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let changeset = $changeset::from(changes);

                let count = diesel::update($table::table.find(*id.as_uuid()))
                    .set(&changeset)
                    .execute(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;

                Ok(rows_affected(count))
            }

            async fn archive(
                &self,
                id: &RecordId,
                updated_at: i64,
            ) -> Result<u64, RepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;

                let count = diesel::update($table::table.find(*id.as_uuid()))
                    .set((
                        $table::is_archived.eq(true),
                        $table::updated_at.eq(updated_at),
                    ))
                    .execute(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;

                Ok(rows_affected(count))
            }
        }
    };
}

diesel_resource_repository! {
    /// Diesel-backed product repository.
    DieselProductRepository for Products {
        table: products,
        row: ProductRow,
        new_row: NewProductRow,
        changeset: ProductChangeset,
    }
}

diesel_resource_repository! {
    /// Diesel-backed user repository.
    DieselUserRepository for Users {
        table: users,
        row: UserRow,
        new_row: NewUserRow,
        changeset: UserChangeset,
    }
}
