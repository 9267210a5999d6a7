//! Query parameters and pagination utilities

use crate::core::entity::Document;
use crate::core::error::ServiceResult;
use crate::storage::{Filter, Repository};
use serde::{Deserialize, Serialize};

/// Query parameters for paginated listings
///
/// Values are taken as raw strings so that malformed numbers fall back to
/// their defaults instead of rejecting the request.
///
/// # Example
/// ```text
/// GET /foods?recordPerPage=5&page=2
/// GET /users?recordPerPage=20&startIndex=40
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
pub struct QueryParams {
    /// Page number (starts at 1)
    pub page: Option<String>,

    /// Number of items per page
    #[serde(rename = "recordPerPage")]
    pub record_per_page: Option<String>,

    /// Explicit start offset; replaces the offset computed from `page`
    #[serde(rename = "startIndex")]
    pub start_index: Option<String>,
}

impl QueryParams {
    /// Page number, 1 when absent, malformed or below 1
    pub fn page(&self) -> u64 {
        parse_at_least_one(self.page.as_deref()).unwrap_or(1)
    }

    /// Page size, `default_page_size` when absent, malformed or below 1
    pub fn page_size(&self, default_page_size: u64) -> u64 {
        parse_at_least_one(self.record_per_page.as_deref()).unwrap_or(default_page_size.max(1))
    }

    /// Explicit start offset, if one was supplied and parses
    pub fn start_index(&self) -> Option<i64> {
        self.start_index
            .as_deref()
            .and_then(|s| s.trim().parse::<i64>().ok())
    }

    /// Resolve the window to return
    pub fn window(&self, default_page_size: u64) -> Window {
        let size = self.page_size(default_page_size);
        let computed = (self.page() - 1).saturating_mul(size);
        let start = self
            .start_index()
            .unwrap_or_else(|| i64::try_from(computed).unwrap_or(i64::MAX));
        Window { start, size }
    }
}

fn parse_at_least_one(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|n| *n >= 1)
}

/// A `(start, size)` slice over an ordered listing
///
/// A negative `start` counts back from the end of the listing and clamps at
/// its beginning; a `start` past the end yields nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: i64,
    pub size: u64,
}

impl Window {
    /// Cut the window out of `items`
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        let len = items.len();
        let start = if self.start < 0 {
            len.saturating_sub(self.start.unsigned_abs() as usize)
        } else {
            usize::try_from(self.start).unwrap_or(usize::MAX)
        };
        let size = usize::try_from(self.size).unwrap_or(usize::MAX);

        items.into_iter().skip(start).take(size).collect()
    }
}

/// A page of results plus the size of the whole listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaginatedResponse<T> {
    /// Number of records in the collection
    pub total_count: u64,

    /// Records inside the requested window
    pub items: Vec<T>,
}

impl<T> PaginatedResponse<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResponse<U> {
        PaginatedResponse {
            total_count: self.total_count,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}

/// List one window of a whole collection
///
/// An empty collection yields `total_count: 0` and no items.
pub async fn paginate<T: Document>(
    repository: &Repository,
    window: Window,
) -> ServiceResult<PaginatedResponse<T>> {
    let all = repository.list::<T>(&Filter::all()).await?;
    let total_count = all.len() as u64;

    tracing::debug!(
        collection = T::collection(),
        total_count,
        start = window.start,
        size = window.size,
        "paginating collection"
    );

    Ok(PaginatedResponse {
        total_count,
        items: window.apply(all),
    })
}
