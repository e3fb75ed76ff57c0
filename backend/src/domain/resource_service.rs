//! Record domain service.
//!
//! One generic service implements both driving ports for every resource. It
//! stamps timestamps from the injected clock, validates names before touching
//! storage, and re-reads records before mutating them so unknown ids surface
//! as `NotFound` rather than as a failed write.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::Page;
use tracing::{debug, warn};

use crate::domain::ports::{
    CreateRecordRequest, ListRecordsRequest, RecordPage, RepositoryError, ResourceCommand,
    ResourceQuery, ResourceRepository, UpdateRecordRequest,
};
use crate::domain::{
    Error, NewRecord, Record, RecordChanges, RecordId, RecordName, RecordValidationError,
    Resource, normalise_detail,
};

fn map_repository_error<R: Resource>(error: RepositoryError) -> Error {
    match error {
        RepositoryError::Connection { message } => {
            warn!(resource = R::NAME, detail = %message, "repository connection failed");
            Error::service_unavailable(format!("{} repository unavailable", R::NAME))
        }
        RepositoryError::Query { message } => {
            Error::internal(format!("{} repository error: {message}", R::NAME))
        }
        RepositoryError::NotFound { id } => Error::not_found(format!("{} {id} not found", R::NAME)),
    }
}

fn map_validation_error<R: Resource>(error: RecordValidationError) -> Error {
    match error {
        RecordValidationError::DetailTooLong { max } => Error::invalid_request(format!(
            "{} must be at most {max} characters",
            R::DETAIL_FIELD
        )),
        other => Error::invalid_request(other.to_string()),
    }
}

/// Use-case service for one resource, generic over its repository.
pub struct ResourceService<R, Repo> {
    repository: Arc<Repo>,
    clock: Arc<dyn Clock>,
    resource: PhantomData<fn() -> R>,
}

impl<R, Repo> Clone for ResourceService<R, Repo> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
            resource: PhantomData,
        }
    }
}

impl<R, Repo> ResourceService<R, Repo>
where
    R: Resource,
    Repo: ResourceRepository<R>,
{
    /// Create a service over the repository, reading time from `clock`.
    pub fn new(repository: Arc<Repo>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            clock,
            resource: PhantomData,
        }
    }

    fn now(&self) -> i64 {
        self.clock.utc().timestamp()
    }

    fn validate(
        name: String,
        detail: Option<String>,
    ) -> Result<(RecordName, Option<String>), Error> {
        let name = RecordName::new(name).map_err(map_validation_error::<R>)?;
        let detail = normalise_detail(detail).map_err(map_validation_error::<R>)?;
        Ok((name, detail))
    }

    async fn existing(&self, id: &RecordId) -> Result<Record<R>, Error> {
        self.repository
            .read_one(id)
            .await
            .map_err(map_repository_error::<R>)
    }
}

#[async_trait]
impl<R, Repo> ResourceCommand<R> for ResourceService<R, Repo>
where
    R: Resource,
    Repo: ResourceRepository<R>,
{
    async fn create(&self, request: CreateRecordRequest) -> Result<Record<R>, Error> {
        let (name, detail) = Self::validate(request.name, request.detail)?;
        let new_record = NewRecord::new(name, detail, self.now());

        let id = self
            .repository
            .create(&new_record)
            .await
            .map_err(map_repository_error::<R>)?;
        debug!(resource = R::NAME, %id, "record created");

        Ok(Record::inserted(id, new_record))
    }

    async fn update(
        &self,
        id: RecordId,
        request: UpdateRecordRequest,
    ) -> Result<Record<R>, Error> {
        let existing = self.existing(&id).await?;
        let (name, detail) = Self::validate(request.name, request.detail)?;
        let changes = RecordChanges {
            name,
            detail,
            updated_at: self.now().max(existing.updated_at()),
        };

        let affected = self
            .repository
            .update(&id, &changes)
            .await
            .map_err(map_repository_error::<R>)?;
        if affected == 0 {
            warn!(resource = R::NAME, %id, "update affected no rows");
            return Err(Error::operation_failed());
        }

        Ok(existing.with_changes(changes))
    }

    async fn delete(&self, id: RecordId) -> Result<Record<R>, Error> {
        let existing = self.existing(&id).await?;
        let updated_at = self.now().max(existing.updated_at());

        let affected = self
            .repository
            .archive(&id, updated_at)
            .await
            .map_err(map_repository_error::<R>)?;
        if affected == 0 {
            warn!(resource = R::NAME, %id, "archive affected no rows");
            return Err(Error::operation_failed());
        }

        Ok(existing.archived(updated_at))
    }
}

#[async_trait]
impl<R, Repo> ResourceQuery<R> for ResourceService<R, Repo>
where
    R: Resource,
    Repo: ResourceRepository<R>,
{
    async fn read_one(&self, id: RecordId) -> Result<Record<R>, Error> {
        self.existing(&id).await
    }

    async fn read_many(&self, request: ListRecordsRequest) -> Result<RecordPage<R>, Error> {
        let ListRecordsRequest { page, filter } = request;
        let items = self
            .repository
            .read_many(page, filter)
            .await
            .map_err(map_repository_error::<R>)?;
        Ok(Page::new(items, page))
    }
}

#[cfg(test)]
#[path = "resource_service_tests.rs"]
mod tests;
