//! Page navigation, loading state and delete-then-reload flow.

use std::sync::Arc;

use tokio::sync::RwLock;

use super::list_state::ListState;
use crate::domain::{EntityId, ListEntity, PageRequest};
use crate::error::ConsoleError;
use crate::ports::{
    Action, Authorization, ConfirmOutcome, ConfirmationPrompt, ConfirmationSurface,
    NotificationSink,
};
use crate::service::CollectionService;

/// How a load request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The page was fetched and applied.
    Loaded,
    /// The request was a no-op: same page, a load in flight, or disposed.
    Skipped,
    /// The fetch failed; the state holds the error message.
    Failed,
    /// A newer load started (or the controller was disposed) before this
    /// one finished; its result was dropped.
    Superseded,
}

#[derive(Debug)]
struct Inner<T> {
    state: ListState<T>,
    /// Bumped by every fetch and by `dispose`; a result is applied only if
    /// its ticket still matches.
    generation: u64,
    /// Whether the fetch holding the latest ticket has not finished yet.
    fetch_in_flight: bool,
    disposed: bool,
}

impl<T> Inner<T> {
    fn begin_fetch(&mut self) -> (u64, PageRequest) {
        self.generation = self.generation.wrapping_add(1);
        self.fetch_in_flight = true;
        self.state.is_loading = true;
        self.state.error = None;
        (self.generation, self.state.page_request())
    }

    fn is_current(&self, ticket: u64) -> bool {
        !self.disposed && self.generation == ticket
    }
}

/// State holder for one admin list view.
///
/// All mutation goes through [`load_page`](Self::load_page),
/// [`reload`](Self::reload) and [`delete`](Self::delete). Each fetch takes
/// a generation ticket; when two fetches overlap only the most recently
/// started one may write the state, whatever order the responses arrive
/// in. After [`dispose`](Self::dispose) late responses are discarded.
#[derive(Debug)]
pub struct ListController<S: CollectionService> {
    service: Arc<S>,
    authorization: Arc<dyn Authorization>,
    notifications: Arc<dyn NotificationSink>,
    confirmation: Arc<dyn ConfirmationSurface>,
    inner: RwLock<Inner<S::Entity>>,
}

impl<S: CollectionService> ListController<S> {
    /// Creates a controller on page 1 with nothing loaded yet.
    #[must_use]
    pub fn new(
        service: Arc<S>,
        authorization: Arc<dyn Authorization>,
        notifications: Arc<dyn NotificationSink>,
        confirmation: Arc<dyn ConfirmationSurface>,
        items_per_page: u32,
    ) -> Self {
        Self {
            service,
            authorization,
            notifications,
            confirmation,
            inner: RwLock::new(Inner {
                state: ListState::new(items_per_page),
                generation: 0,
                fetch_in_flight: false,
                disposed: false,
            }),
        }
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> ListState<S::Entity> {
        self.inner.read().await.state.clone()
    }

    /// Number of pages for the last known total.
    pub async fn total_pages(&self) -> u64 {
        self.inner.read().await.state.total_pages()
    }

    /// Whether a page after the current one exists.
    pub async fn has_next_page(&self) -> bool {
        self.inner.read().await.state.has_next_page()
    }

    /// Whether a page before the current one exists.
    pub async fn has_previous_page(&self) -> bool {
        self.inner.read().await.state.has_previous_page()
    }

    /// Changes the page size. Takes effect on the next load; nothing is
    /// fetched here.
    pub async fn set_items_per_page(&self, items_per_page: u32) {
        self.inner.write().await.state.items_per_page = items_per_page.max(1);
    }

    /// Navigates to `target` (values below 1 mean page 1).
    ///
    /// Does nothing when `target` is already the current page, a load is
    /// in flight or the controller is disposed. Otherwise the current page
    /// is moved before the fetch starts, and is kept even if the fetch
    /// fails.
    pub async fn load_page(&self, target: u32) -> LoadOutcome {
        let target = target.max(1);
        let (ticket, request) = {
            let mut inner = self.inner.write().await;
            if inner.disposed || inner.state.is_loading || inner.state.current_page == target {
                tracing::debug!(
                    page = target,
                    current = inner.state.current_page,
                    loading = inner.state.is_loading,
                    "page load skipped"
                );
                return LoadOutcome::Skipped;
            }
            inner.state.current_page = target;
            inner.begin_fetch()
        };
        self.fetch(ticket, request).await
    }

    /// Re-fetches the current page. Used for the initial load and after
    /// mutations; not guarded by the loading flag.
    pub async fn reload(&self) -> LoadOutcome {
        let (ticket, request) = {
            let mut inner = self.inner.write().await;
            if inner.disposed {
                return LoadOutcome::Skipped;
            }
            inner.begin_fetch()
        };
        self.fetch(ticket, request).await
    }

    async fn fetch(&self, ticket: u64, request: PageRequest) -> LoadOutcome {
        tracing::debug!(
            entity = S::Entity::PLURAL_LABEL,
            page = request.page,
            limit = request.limit,
            "loading page"
        );
        let result = self.service.fetch_page(request).await;

        let mut inner = self.inner.write().await;
        if !inner.is_current(ticket) {
            tracing::debug!(ticket, latest = inner.generation, "stale page result dropped");
            return LoadOutcome::Superseded;
        }
        inner.fetch_in_flight = false;
        inner.state.is_loading = false;

        match result {
            Ok(page) => {
                inner.state.items = page.items;
                inner.state.total_items = page.total;
                LoadOutcome::Loaded
            }
            Err(err) => {
                let message = load_failure_message(S::Entity::PLURAL_LABEL);
                inner.state.items.clear();
                inner.state.total_items = 0;
                inner.state.error = Some(message.clone());
                drop(inner);

                tracing::warn!(
                    entity = S::Entity::PLURAL_LABEL,
                    page = request.page,
                    code = err.error_code(),
                    error = %err,
                    "page load failed"
                );
                self.notifications.show_error(&message, None);
                LoadOutcome::Failed
            }
        }
    }

    /// Deletes `id` and re-reads the current page.
    ///
    /// The page number is kept, so removing the last item of a page can
    /// leave an empty page. On failure the items are left as they were and
    /// nothing is re-fetched.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::PermissionDenied`] without calling the
    /// backend when deletion is not allowed, [`ConsoleError::Disposed`]
    /// after teardown, or the backend failure.
    pub async fn delete(&self, id: &EntityId) -> Result<LoadOutcome, ConsoleError> {
        if self.inner.read().await.disposed {
            return Err(ConsoleError::Disposed);
        }
        if !self.authorization.can_delete().await {
            let err = ConsoleError::PermissionDenied(Action::Delete);
            tracing::debug!(%id, "delete denied");
            self.notifications.show_error(&err.user_message(), None);
            return Err(err);
        }

        let display_name = {
            let mut inner = self.inner.write().await;
            inner.state.is_loading = true;
            inner
                .state
                .items
                .iter()
                .find(|item| item.id() == id)
                .map_or_else(|| id.to_string(), |item| item.display_name().to_string())
        };

        if let Err(err) = self.service.delete(id).await {
            {
                // A reload still running keeps the list in its loading state.
                let mut inner = self.inner.write().await;
                inner.state.is_loading = inner.fetch_in_flight;
            }
            tracing::warn!(%id, code = err.error_code(), error = %err, "delete failed");
            self.notifications.show_error(&err.user_message(), None);
            return Err(err);
        }

        tracing::info!(%id, entity = S::Entity::LABEL, "entity deleted");
        self.notifications.show_success(
            &format!("{} \"{display_name}\" was deleted.", capitalize(S::Entity::LABEL)),
            None,
        );
        Ok(self.reload().await)
    }

    /// Asks for confirmation, then deletes `entity`.
    ///
    /// Entities linked to an owning aggregate are refused with a warning
    /// and the dialog is never opened. Returns the dialog outcome;
    /// `Confirmed` means the delete went through.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Blocked`] for linked entities, or any error
    /// from [`delete`](Self::delete).
    pub async fn open_delete_confirmation(
        &self,
        entity: &S::Entity,
    ) -> Result<ConfirmOutcome, ConsoleError> {
        if let Some(owner) = entity.linked_aggregate() {
            let message = format!(
                "{} \"{}\" is linked to another account and cannot be deleted on its own.",
                capitalize(S::Entity::LABEL),
                entity.display_name()
            );
            tracing::warn!(id = %entity.id(), %owner, "delete blocked by linked aggregate");
            self.notifications.show_warning(&message, None);
            return Err(ConsoleError::Blocked(message));
        }

        let prompt = ConfirmationPrompt::delete(S::Entity::LABEL, entity.display_name());
        match self.confirmation.confirm(prompt).await {
            ConfirmOutcome::Confirmed => {
                self.delete(entity.id()).await?;
                Ok(ConfirmOutcome::Confirmed)
            }
            ConfirmOutcome::Dismissed => Ok(ConfirmOutcome::Dismissed),
        }
    }

    /// Tears the controller down. In-flight results are discarded and
    /// every later operation is a no-op.
    pub async fn dispose(&self) {
        let mut inner = self.inner.write().await;
        inner.disposed = true;
        inner.generation = inner.generation.wrapping_add(1);
        inner.fetch_in_flight = false;
        inner.state.is_loading = false;
    }

    /// Whether [`dispose`](Self::dispose) was called.
    pub async fn is_disposed(&self) -> bool {
        self.inner.read().await.disposed
    }
}

/// Message stored in `error` and shown when a page fails to load.
fn load_failure_message(plural_label: &str) -> String {
    format!("Failed to load {plural_label}. Please try again.")
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
