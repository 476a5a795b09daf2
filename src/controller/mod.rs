//! Paginated list controllers.
//!
//! A [`ListController`] owns the state of one admin list view: current
//! page, page size, total count, the visible items, the loading flag and
//! the last load error. It fetches through a
//! [`CollectionService`](crate::service::CollectionService) and re-reads
//! the current page after every successful delete.

pub mod list_controller;
pub mod list_state;

pub use list_controller::{ListController, LoadOutcome};
pub use list_state::ListState;
