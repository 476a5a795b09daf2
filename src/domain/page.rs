//! Page request/result pair for paginated collections.

use serde::Serialize;

/// One page to fetch. Both fields are always at least 1; `page` is
/// 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    /// Page number, starting at 1.
    pub page: u32,
    /// Maximum number of items on the page.
    pub limit: u32,
}

impl PageRequest {
    /// Creates a request, raising zero values to 1.
    #[must_use]
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    /// Index of the first item of this page in the full collection.
    #[must_use]
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize).saturating_mul(self.limit as usize)
    }

    /// `page` and `limit` as wire query parameters.
    #[must_use]
    pub fn query_params(&self) -> [(&'static str, String); 2] {
        [
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ]
    }
}

/// One page of results. `total` counts items across all pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResult<T> {
    /// Items of the requested page, at most `limit` of them.
    pub items: Vec<T>,
    /// Size of the whole collection.
    pub total: u64,
}

impl<T> PageResult<T> {
    /// Creates a page result.
    #[must_use]
    pub fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }

    /// Empty result with zero total.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }

    /// Applies `f` to every item, keeping `total`.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResult<U> {
        PageResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

/// Slices a full collection locally for endpoints without server paging.
///
/// Items `[(page-1)*limit, (page-1)*limit + limit)` are returned and
/// `total` is the unsliced collection size.
#[must_use]
pub fn slice_locally<T>(all: Vec<T>, request: PageRequest) -> PageResult<T> {
    let total = all.len() as u64;
    let items = all
        .into_iter()
        .skip(request.offset())
        .take(request.limit as usize)
        .collect();
    PageResult { items, total }
}

/// Number of pages needed for `total` items; 0 for an empty collection.
#[must_use]
pub fn total_pages(total: u64, limit: u32) -> u64 {
    if total == 0 {
        0
    } else {
        total.div_ceil(u64::from(limit.max(1)))
    }
}
