//! Driving port for record reads.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{ArchiveFilter, Error, Record, RecordId, Resource};

/// One page of records.
pub type RecordPage<R> = Page<Record<R>>;

/// Request for a page of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListRecordsRequest {
    pub page: PageRequest,
    pub filter: ArchiveFilter,
}

impl ListRecordsRequest {
    /// Build a request from raw client values.
    ///
    /// `limit` below 1 becomes 10, above 100 becomes 100, and `page` below 1
    /// becomes 1.
    ///
    /// # Examples
    /// ```
    /// use storefront::domain::ArchiveFilter;
    /// use storefront::domain::ports::ListRecordsRequest;
    ///
    /// let request = ListRecordsRequest::new(0, -2, ArchiveFilter::any());
    /// assert_eq!(request.page.limit(), 10);
    /// assert_eq!(request.page.page(), 1);
    /// ```
    pub fn new(limit: i64, page: i64, filter: ArchiveFilter) -> Self {
        Self {
            page: PageRequest::new(limit, page),
            filter,
        }
    }
}

/// Driving port for single and paged reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourceQuery<R: Resource>: Send + Sync {
    /// Load one record; unknown ids fail with `NotFound`.
    async fn read_one(&self, id: RecordId) -> Result<Record<R>, Error>;

    /// Load a page of records together with the effective limit and page.
    async fn read_many(&self, request: ListRecordsRequest) -> Result<RecordPage<R>, Error>;
}
