//! Payment method service: `/api/payment-methods`, paged on the server.

use std::sync::Arc;

use async_trait::async_trait;
use validator::Validate;

use super::read_policy::ReadErrorPolicy;
use super::{CollectionService, ensure_allowed, entity_path, fallback, send, to_body};
use crate::domain::{
    EntityId, PageRequest, PageResult, PaymentMethod, PaymentMethodDraft, slice_locally,
};
use crate::error::ConsoleError;
use crate::normalize::{self, payment_method};
use crate::ports::{Action, ApiRequest, Authorization, Method, Transport};

/// Collection endpoint.
pub const BASE_PATH: &str = "/api/payment-methods";

/// Typed access to the payment method endpoints.
#[derive(Debug, Clone)]
pub struct PaymentMethodService {
    transport: Arc<dyn Transport>,
    authorization: Arc<dyn Authorization>,
    read_policy: ReadErrorPolicy,
}

impl PaymentMethodService {
    /// Creates a new `PaymentMethodService`.
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

    /// Fetches one page (`?page=&limit=`).
    ///
    /// Under [`ReadErrorPolicy::Fallback`] a failed read is answered with
    /// the requested slice of the fallback dataset.
    ///
    /// # Errors
    ///
    /// Returns a [`ConsoleError`] if the request fails under
    /// [`ReadErrorPolicy::Propagate`] or the payload is not a list.
    pub async fn list(
        &self,
        request: PageRequest,
    ) -> Result<PageResult<PaymentMethod>, ConsoleError> {
        let [(page_key, page), (limit_key, limit)] = request.query_params();
        let api_request = ApiRequest::get(BASE_PATH)
            .param(page_key, page)
            .param(limit_key, limit);

        let result = send(self.transport.as_ref(), api_request)
            .await
            .and_then(|body| {
                normalize::normalize_server_page(
                    &body,
                    payment_method::COLLECTION_KEY,
                    request,
                    payment_method::normalize,
                )
            });
        self.read_policy.recover(result, BASE_PATH, || {
            Some(slice_locally(fallback::payment_methods(), request))
        })
    }

    /// Fetches a single payment method.
    ///
    /// # Errors
    ///
    /// Returns a [`ConsoleError`] if the request fails and no fallback
    /// method carries `id`.
    pub async fn get(&self, id: &EntityId) -> Result<PaymentMethod, ConsoleError> {
        let path = entity_path(BASE_PATH, id);
        let result = send(self.transport.as_ref(), ApiRequest::get(path.as_str()))
            .await
            .map(|body| {
                payment_method::normalize(normalize::unwrap_entity(
                    &body,
                    payment_method::ENTITY_KEY,
                ))
            });
        self.read_policy.recover(result, &path, || {
            fallback::payment_methods()
                .into_iter()
                .find(|method| &method.id == id)
        })
    }

    /// Creates a payment method.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::PermissionDenied`] or
    /// [`ConsoleError::Validation`] before any request is sent, or a
    /// transport error from the backend.
    pub async fn create(&self, draft: &PaymentMethodDraft) -> Result<PaymentMethod, ConsoleError> {
        ensure_allowed(self.authorization.as_ref(), Action::Edit).await?;
        draft.validate()?;

        let request = ApiRequest::new(Method::Post, BASE_PATH).with_body(to_body(draft)?);
        let body = send(self.transport.as_ref(), request).await?;
        let created =
            payment_method::normalize(normalize::unwrap_entity(&body, payment_method::ENTITY_KEY));

        tracing::info!(id = %created.id, code = %created.code, "payment method created");
        Ok(created)
    }

    /// Updates a payment method.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::PermissionDenied`] or
    /// [`ConsoleError::Validation`] before any request is sent, or a
    /// transport error from the backend.
    pub async fn update(
        &self,
        id: &EntityId,
        draft: &PaymentMethodDraft,
    ) -> Result<PaymentMethod, ConsoleError> {
        ensure_allowed(self.authorization.as_ref(), Action::Update).await?;
        draft.validate()?;

        let request =
            ApiRequest::new(Method::Put, entity_path(BASE_PATH, id)).with_body(to_body(draft)?);
        let body = send(self.transport.as_ref(), request).await?;
        let updated =
            payment_method::normalize(normalize::unwrap_entity(&body, payment_method::ENTITY_KEY));

        tracing::info!(%id, "payment method updated");
        Ok(updated)
    }

    /// Deletes a payment method. Failures always propagate.
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
        tracing::info!(%id, "payment method deleted");
        Ok(())
    }
}

#[async_trait]
impl CollectionService for PaymentMethodService {
    type Entity = PaymentMethod;

    async fn fetch_page(
        &self,
        request: PageRequest,
    ) -> Result<PageResult<PaymentMethod>, ConsoleError> {
        self.list(request).await
    }

    async fn delete(&self, id: &EntityId) -> Result<(), ConsoleError> {
        PaymentMethodService::delete(self, id).await
    }
}
