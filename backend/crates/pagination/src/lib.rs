//! Limit/page pagination primitives shared by Storefront list endpoints.
//!
//! Clients address list endpoints with a 1-based `page` and a `limit`.
//! [`PageRequest`] normalises both values into a sane range and derives the
//! zero-based row offset used by repositories. [`Page`] is the list envelope
//! returned to clients, echoing the effective `limit` and `page`.
//!
//! ```
//! use pagination::{Page, PageRequest};
//!
//! let request = PageRequest::new(25, 3);
//! assert_eq!(request.offset(), 50);
//!
//! let page = Page::new(vec!["a", "b"], request);
//! assert_eq!(page.limit(), 25);
//! assert_eq!(page.page(), 3);
//! ```

mod request;

pub use request::{PageRequest, PaginationError, DEFAULT_LIMIT, FIRST_PAGE, MAX_LIMIT};

use serde::{Deserialize, Serialize};

/// One page of list results.
///
/// Serialises as `{"items": [...], "limit": n, "page": n}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    items: Vec<T>,
    limit: u32,
    page: u32,
}

impl<T> Page<T> {
    /// Build a page from the loaded items and the request that selected them.
    #[must_use]
    pub fn new(items: Vec<T>, request: PageRequest) -> Self {
        Self {
            items,
            limit: request.limit(),
            page: request.page(),
        }
    }

    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Effective page size used for the query.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Effective 1-based page number used for the query.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Consume the page, returning its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Convert every item while keeping the page coordinates.
    ///
    /// ```
    /// use pagination::{Page, PageRequest};
    ///
    /// let page = Page::new(vec![1, 2], PageRequest::default());
    /// let labels = page.map(|value| format!("#{value}"));
    /// assert_eq!(labels.items(), ["#1", "#2"]);
    /// ```
    #[must_use]
    pub fn map<U, F>(self, convert: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(convert).collect(),
            limit: self.limit,
            page: self.page,
        }
    }
}
