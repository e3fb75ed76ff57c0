//! Driven port for record persistence.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{ArchiveFilter, NewRecord, Record, RecordChanges, RecordId, Resource};

use super::define_port_error;

define_port_error! {
    /// Errors raised by record repository adapters.
    pub enum RepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "record repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "record repository query failed: {message}",
        /// No record carries the requested identifier.
        NotFound { id: RecordId } =>
            "record {id} not found",
    }
}

/// Port for storing and loading records of one resource.
///
/// `update` and `archive` report rows affected. Zero rows is not an error;
/// callers decide how to react to it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourceRepository<R: Resource>: Send + Sync {
    /// Insert a record with `is_archived = false`, returning its new id.
    async fn create(&self, record: &NewRecord) -> Result<RecordId, RepositoryError>;

    /// Load up to `page.limit()` records from `page.offset()`, ordered by
    /// creation time then id.
    async fn read_many(
        &self,
        page: PageRequest,
        filter: ArchiveFilter,
    ) -> Result<Vec<Record<R>>, RepositoryError>;

    /// Load one record or fail with [`RepositoryError::NotFound`].
    async fn read_one(&self, id: &RecordId) -> Result<Record<R>, RepositoryError>;

    /// Write `name`, detail, and `updated_at`.
    async fn update(&self, id: &RecordId, changes: &RecordChanges)
    -> Result<u64, RepositoryError>;

    /// Set `is_archived = true` and stamp `updated_at`.
    async fn archive(&self, id: &RecordId, updated_at: i64) -> Result<u64, RepositoryError>;
}
