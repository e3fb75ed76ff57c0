//! Persistence adapters for the record repository port.
//!
//! Two implementations exist:
//!
//! - **PostgreSQL** via Diesel with async support through `diesel-async` and
//!   `bb8` pooling. Row structs (`models.rs`) and table definitions
//!   (`schema.rs`) stay private to this module.
//! - **In-memory**, used by tests and by the server when no database is
//!   configured.
//!
//! # Example
//!
//! ```ignore
//! use storefront::outbound::persistence::{DbPool, DieselProductRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/storefront")).await?;
//! let products = DieselProductRepository::new(pool);
//! ```

mod diesel_error_mapping;
mod diesel_resource_repository;
mod in_memory_resource_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_resource_repository::{DieselProductRepository, DieselUserRepository};
pub use in_memory_resource_repository::InMemoryResourceRepository;
pub use migrations::{
    MIGRATIONS, MigrationError, run_pending_migrations, run_pending_migrations_blocking,
};
pub use pool::{ConnectionParams, DbPool, PoolConfig, PoolError};
