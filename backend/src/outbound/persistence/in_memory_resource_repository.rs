//! In-process `ResourceRepository` used when no database is configured.
//!
//! Records live in a `RwLock`-guarded map keyed by id. Reads sort by
//! `(created_at, id)`, matching the PostgreSQL adapter's ordering.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use pagination::PageRequest;
use tokio::sync::RwLock;

use crate::domain::ports::{RepositoryError, ResourceRepository};
use crate::domain::{ArchiveFilter, NewRecord, Record, RecordChanges, RecordId, Resource};

/// Thread-safe in-memory store for one resource.
///
/// Clones share the same underlying map.
///
/// # Examples
/// ```
/// use storefront::domain::ports::ResourceRepository;
/// use storefront::domain::{NewRecord, Products, RecordName};
/// use storefront::outbound::persistence::InMemoryResourceRepository;
///
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// let repo = InMemoryResourceRepository::<Products>::new();
/// let name = RecordName::new("Widget").expect("valid name");
/// let id = repo.create(&NewRecord::new(name, None, 0)).await.expect("insert");
/// let record = repo.read_one(&id).await.expect("stored");
/// assert_eq!(record.name(), "Widget");
/// # });
/// ```
#[derive(Debug)]
pub struct InMemoryResourceRepository<R: Resource> {
    records: Arc<RwLock<HashMap<RecordId, Record<R>>>>,
}

impl<R: Resource> Clone for InMemoryResourceRepository<R> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<R: Resource> Default for InMemoryResourceRepository<R> {
    fn default() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<R: Resource> InMemoryResourceRepository<R> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn window_bounds(page: PageRequest) -> Result<(usize, usize), RepositoryError> {
    let offset = usize::try_from(page.offset())
        .map_err(|_| RepositoryError::query("page offset out of range"))?;
    let limit = usize::try_from(page.limit())
        .map_err(|_| RepositoryError::query("page limit out of range"))?;
    Ok((offset, limit))
}

#[async_trait]
impl<R: Resource> ResourceRepository<R> for InMemoryResourceRepository<R> {
    async fn create(&self, record: &NewRecord) -> Result<RecordId, RepositoryError> {
        let id = RecordId::random();
        let stored = Record::inserted(id, record.clone());
        self.records.write().await.insert(id, stored);
        Ok(id)
    }

    async fn read_many(
        &self,
        page: PageRequest,
        filter: ArchiveFilter,
    ) -> Result<Vec<Record<R>>, RepositoryError> {
        let (offset, limit) = window_bounds(page)?;
        let records = self.records.read().await;

        let mut matching: Vec<&Record<R>> = records
            .values()
            .filter(|record| filter.matches(record.is_archived()))
            .collect();
        matching.sort_by_key(|record| (record.created_at(), record.id()));

        Ok(matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn read_one(&self, id: &RecordId) -> Result<Record<R>, RepositoryError> {
        self.records
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found(*id))
    }

    async fn update(&self, id: &RecordId, changes: &RecordChanges) -> Result<u64, RepositoryError> {
        let mut records = self.records.write().await;
        let Some(record) = records.remove(id) else {
            return Ok(0);
        };
        records.insert(*id, record.with_changes(changes.clone()));
        Ok(1)
    }

    async fn archive(&self, id: &RecordId, updated_at: i64) -> Result<u64, RepositoryError> {
        let mut records = self.records.write().await;
        let Some(record) = records.remove(id) else {
            return Ok(0);
        };
        records.insert(*id, record.archived(updated_at));
        Ok(1)
    }
}
