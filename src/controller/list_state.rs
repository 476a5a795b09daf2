//! Observable state of one list view.

use serde::Serialize;

use crate::domain::{PageRequest, total_pages};

/// Snapshot of a list view.
///
/// `current_page` and `items_per_page` are always at least 1. `error` is
/// set only after a failed load and cleared when the next load starts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListState<T> {
    /// Page shown (or being fetched), 1-indexed.
    pub current_page: u32,
    /// Page size used for the next fetch.
    pub items_per_page: u32,
    /// Size of the whole collection as of the last successful load.
    pub total_items: u64,
    /// Items of the current page.
    pub items: Vec<T>,
    /// `true` while a fetch or delete is outstanding.
    pub is_loading: bool,
    /// User-facing message of the last failed load.
    pub error: Option<String>,
}

impl<T> ListState<T> {
    /// Fresh state on page 1 with nothing loaded.
    #[must_use]
    pub fn new(items_per_page: u32) -> Self {
        Self {
            current_page: 1,
            items_per_page: items_per_page.max(1),
            total_items: 0,
            items: Vec::new(),
            is_loading: false,
            error: None,
        }
    }

    /// Request for the current page at the current page size.
    #[must_use]
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.current_page, self.items_per_page)
    }

    /// Number of pages for the known total.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        total_pages(self.total_items, self.items_per_page)
    }

    /// Whether a page after the current one exists.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        u64::from(self.current_page) < self.total_pages()
    }

    /// Whether a page before the current one exists.
    #[must_use]
    pub fn has_previous_page(&self) -> bool {
        self.current_page > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_starts_on_first_page() {
        let state: ListState<u8> = ListState::new(0);
        assert_eq!(state.current_page, 1);
        assert_eq!(state.items_per_page, 1);
        assert!(!state.is_loading);
        assert_eq!(state.error, None);
    }

    #[test]
    fn navigation_flags_follow_total() {
        let mut state: ListState<u8> = ListState::new(10);
        state.total_items = 35;
        assert_eq!(state.total_pages(), 4);
        assert!(state.has_next_page());
        assert!(!state.has_previous_page());

        state.current_page = 4;
        assert!(!state.has_next_page());
        assert!(state.has_previous_page());
    }

    #[test]
    fn page_request_uses_current_values() {
        let mut state: ListState<u8> = ListState::new(25);
        state.current_page = 3;
        assert_eq!(state.page_request(), PageRequest::new(3, 25));
    }
}
