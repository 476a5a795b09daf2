//! Service layer: typed wrappers around the backend endpoints.
//!
//! Each service maps one backend resource to canonical domain types,
//! normalizing every payload at this boundary. Write operations check
//! [`Authorization`] and client-side validation before anything is sent;
//! read operations honour the configured [`ReadErrorPolicy`].

pub mod customer_service;
pub mod fallback;
pub mod order_status_service;
pub mod payment_method_service;
pub mod read_policy;

#[cfg(test)]
pub(crate) mod testing;

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::domain::{EntityId, ListEntity, PageRequest, PageResult};
use crate::error::ConsoleError;
use crate::ports::{Action, ApiRequest, Authorization, Transport};

pub use customer_service::CustomerService;
pub use order_status_service::OrderStatusService;
pub use payment_method_service::PaymentMethodService;
pub use read_policy::{ReadErrorPolicy, UnknownReadErrorPolicy};

/// A paginated backend collection a list controller can drive.
#[async_trait]
pub trait CollectionService: Send + Sync + fmt::Debug {
    /// Entity type of the collection.
    type Entity: ListEntity;

    /// Fetches one page.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError`] when the backend call fails and the read
    /// policy has no fallback for it.
    async fn fetch_page(
        &self,
        request: PageRequest,
    ) -> Result<PageResult<Self::Entity>, ConsoleError>;

    /// Deletes one entity.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError`] when the backend rejects the deletion.
    async fn delete(&self, id: &EntityId) -> Result<(), ConsoleError>;
}

/// Sends a request and lifts transport failures into [`ConsoleError`].
pub(crate) async fn send(
    transport: &dyn Transport,
    request: ApiRequest,
) -> Result<Value, ConsoleError> {
    tracing::debug!(method = %request.method, path = %request.path, "sending request");
    transport.request(request).await.map_err(ConsoleError::from)
}

/// Resolves an authorization check, refusing locally when denied.
pub(crate) async fn ensure_allowed(
    authorization: &dyn Authorization,
    action: Action,
) -> Result<(), ConsoleError> {
    if authorization.allows(action).await {
        Ok(())
    } else {
        tracing::debug!(%action, "action denied before request");
        Err(ConsoleError::PermissionDenied(action))
    }
}

/// Serializes a request payload.
pub(crate) fn to_body<T: Serialize>(payload: &T) -> Result<Value, ConsoleError> {
    serde_json::to_value(payload).map_err(|e| ConsoleError::Decode(e.to_string()))
}

/// `<base>/<id>` for entity endpoints.
pub(crate) fn entity_path(base: &str, id: &EntityId) -> String {
    format!("{base}/{id}")
}
