//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Catalogue products.
    products (id) {
        /// Primary key assigned by `gen_random_uuid()`.
        id -> Uuid,
        /// Display name (max 255 characters).
        name -> Varchar,
        /// Optional free text; never stored as an empty string.
        description -> Nullable<Text>,
        /// Soft-delete flag; only the delete path sets it.
        is_archived -> Bool,
        /// Creation time in Unix seconds.
        created_at -> Int8,
        /// Last mutation time in Unix seconds.
        updated_at -> Int8,
    }
}

diesel::table! {
    /// Registered users.
    users (id) {
        /// Primary key assigned by `gen_random_uuid()`.
        id -> Uuid,
        /// Display name (max 255 characters).
        name -> Varchar,
        /// Optional postal address; never stored as an empty string.
        address -> Nullable<Text>,
        /// Soft-delete flag; only the delete path sets it.
        is_archived -> Bool,
        /// Creation time in Unix seconds.
        created_at -> Int8,
        /// Last mutation time in Unix seconds.
        updated_at -> Int8,
    }
}

diesel::allow_tables_to_appear_in_same_query!(products, users);
