//! Driving port for record mutations.

use async_trait::async_trait;

use crate::domain::{Error, Record, RecordId, Resource};

/// Request to create a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRecordRequest {
    pub name: String,
    pub detail: Option<String>,
}

/// Request to replace a record's mutable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRecordRequest {
    pub name: String,
    pub detail: Option<String>,
}

/// Driving port for create, update, and soft delete.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourceCommand<R: Resource>: Send + Sync {
    /// Validate and insert a record, stamping both timestamps with now.
    async fn create(&self, request: CreateRecordRequest) -> Result<Record<R>, Error>;

    /// Replace `name` and detail on an existing record.
    ///
    /// Unknown ids fail with `NotFound`. Archived records may still be
    /// updated.
    async fn update(&self, id: RecordId, request: UpdateRecordRequest)
    -> Result<Record<R>, Error>;

    /// Soft delete a record and return it with `is_archived = true`.
    ///
    /// Deleting an archived record succeeds again and refreshes
    /// `updated_at`.
    async fn delete(&self, id: RecordId) -> Result<Record<R>, Error>;
}
