//! Order status service: `/api/order-statuses`.
//!
//! The collection endpoint has no server-side paging, so [`list`] fetches
//! the full set and slices it locally.
//!
//! [`list`]: OrderStatusService::list

use std::sync::Arc;

use async_trait::async_trait;
use validator::Validate;

use super::read_policy::ReadErrorPolicy;
use super::{CollectionService, ensure_allowed, entity_path, fallback, send, to_body};
use crate::domain::{
    EntityId, OrderStatus, OrderStatusDraft, PageRequest, PageResult, slice_locally,
};
use crate::error::ConsoleError;
use crate::normalize::{self, order_status};
use crate::ports::{Action, ApiRequest, Authorization, Method, Transport};

/// Collection endpoint.
pub const BASE_PATH: &str = "/api/order-statuses";

/// Typed access to the order status endpoints.
#[derive(Debug, Clone)]
pub struct OrderStatusService {
    transport: Arc<dyn Transport>,
    authorization: Arc<dyn Authorization>,
    read_policy: ReadErrorPolicy,
}

impl OrderStatusService {
    /// Creates a new `OrderStatusService`.
    #[must_use]
    pub fn new(
        transport: Arc<dyn Transport>,
        authorization: Arc<dyn Authorization>,
        read_policy: ReadErrorPolicy,
    ) -> Self {
        Self {
            transport,
            authorization,
            read_policy,
        }
    }

    /// Fetches every order status.
    ///
    /// # Errors
    ///
    /// Returns a [`ConsoleError`] if the request fails under
    /// [`ReadErrorPolicy::Propagate`] or the payload is not a list.
    pub async fn list_all(&self) -> Result<Vec<OrderStatus>, ConsoleError> {
        let result = self.fetch_all().await;
        self.read_policy
            .recover(result, BASE_PATH, || Some(fallback::order_statuses()))
    }

    async fn fetch_all(&self) -> Result<Vec<OrderStatus>, ConsoleError> {
        let body = send(self.transport.as_ref(), ApiRequest::get(BASE_PATH)).await?;
        let page = normalize::normalize_page(
            &body,
            order_status::COLLECTION_KEY,
            order_status::normalize,
        )?;
        Ok(page.items)
    }

    /// Fetches one page, sliced from the full collection.
    ///
    /// # Errors
    ///
    /// See [`OrderStatusService::list_all`].
    pub async fn list(&self, request: PageRequest) -> Result<PageResult<OrderStatus>, ConsoleError> {
        let all = self.list_all().await?;
        Ok(slice_locally(all, request))
    }

    /// Fetches a single order status.
    ///
    /// # Errors
    ///
    /// Returns a [`ConsoleError`] if the request fails and no fallback
    /// status carries `id`.
    pub async fn get(&self, id: &EntityId) -> Result<OrderStatus, ConsoleError> {
        let path = entity_path(BASE_PATH, id);
        let result = send(self.transport.as_ref(), ApiRequest::get(path.as_str()))
            .await
            .map(|body| {
                order_status::normalize(normalize::unwrap_entity(
                    &body,
                    order_status::ENTITY_KEY,
                ))
            });
        self.read_policy.recover(result, &path, || {
            fallback::order_statuses()
                .into_iter()
                .find(|status| &status.id == id)
        })
    }

    /// Creates an order status.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::PermissionDenied`] or
    /// [`ConsoleError::Validation`] before any request is sent, or a
    /// transport error from the backend.
    pub async fn create(&self, draft: &OrderStatusDraft) -> Result<OrderStatus, ConsoleError> {
        ensure_allowed(self.authorization.as_ref(), Action::Edit).await?;
        draft.validate()?;

        let request = ApiRequest::new(Method::Post, BASE_PATH).with_body(to_body(draft)?);
        let body = send(self.transport.as_ref(), request).await?;
        let created =
            order_status::normalize(normalize::unwrap_entity(&body, order_status::ENTITY_KEY));

        tracing::info!(id = %created.id, code = %created.code, "order status created");
        Ok(created)
    }

    /// Updates an order status.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::PermissionDenied`] or
    /// [`ConsoleError::Validation`] before any request is sent, or a
    /// transport error from the backend.
    pub async fn update(
        &self,
        id: &EntityId,
        draft: &OrderStatusDraft,
    ) -> Result<OrderStatus, ConsoleError> {
        ensure_allowed(self.authorization.as_ref(), Action::Update).await?;
        draft.validate()?;

        let request =
            ApiRequest::new(Method::Put, entity_path(BASE_PATH, id)).with_body(to_body(draft)?);
        let body = send(self.transport.as_ref(), request).await?;
        let updated =
            order_status::normalize(normalize::unwrap_entity(&body, order_status::ENTITY_KEY));

        tracing::info!(%id, "order status updated");
        Ok(updated)
    }

    /// Deletes an order status. Failures always propagate.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::PermissionDenied`] before any request is
    /// sent, or a transport error from the backend.
    pub async fn delete(&self, id: &EntityId) -> Result<(), ConsoleError> {
        ensure_allowed(self.authorization.as_ref(), Action::Delete).await?;
        send(
            self.transport.as_ref(),
            ApiRequest::delete(entity_path(BASE_PATH, id)),
        )
        .await?;
        tracing::info!(%id, "order status deleted");
        Ok(())
    }

    /// Statuses an order in status `id` may move to, in transition order.
    ///
    /// Transition targets missing from the collection are skipped.
    ///
    /// # Errors
    ///
    /// Returns a [`ConsoleError`] if either read fails.
    pub async fn transitions_from(&self, id: &EntityId) -> Result<Vec<OrderStatus>, ConsoleError> {
        let source = self.get(id).await?;
        let all = self.list_all().await?;
        Ok(source
            .allowed_transitions()
            .iter()
            .filter_map(|target| all.iter().find(|status| &status.id == target).cloned())
            .collect())
    }

    /// The status new orders start in: the one flagged default, else the
    /// active status with the lowest priority.
    ///
    /// # Errors
    ///
    /// Returns a [`ConsoleError`] if the collection cannot be read.
    pub async fn default_status(&self) -> Result<Option<OrderStatus>, ConsoleError> {
        let all = self.list_all().await?;
        if let Some(flagged) = all.iter().find(|status| status.is_default) {
            return Ok(Some(flagged.clone()));
        }
        Ok(all
            .into_iter()
            .filter(|status| status.is_active)
            .min_by_key(|status| status.priority.unwrap_or(i64::MAX)))
    }
}

#[async_trait]
impl CollectionService for OrderStatusService {
    type Entity = OrderStatus;

    async fn fetch_page(
        &self,
        request: PageRequest,
    ) -> Result<PageResult<OrderStatus>, ConsoleError> {
        self.list(request).await
    }

    async fn delete(&self, id: &EntityId) -> Result<(), ConsoleError> {
        OrderStatusService::delete(self, id).await
    }
}
