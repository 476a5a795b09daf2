//! Admin customer service: `/api/admin/customers`.
//!
//! Customers have no fallback dataset; every failure propagates. There is
//! no create endpoint, customers come from checkout and registration.

use std::sync::Arc;

use async_trait::async_trait;
use validator::Validate;

use super::{CollectionService, ensure_allowed, entity_path, send, to_body};
use crate::domain::{Customer, CustomerUpdate, EntityId, PageRequest, PageResult};
use crate::error::ConsoleError;
use crate::normalize::{self, customer};
use crate::ports::{Action, ApiRequest, Authorization, Method, Transport};

/// Collection endpoint.
pub const BASE_PATH: &str = "/api/admin/customers";

/// Typed access to the admin customer endpoints.
#[derive(Debug, Clone)]
pub struct CustomerService {
    transport: Arc<dyn Transport>,
    authorization: Arc<dyn Authorization>,
}

impl CustomerService {
    /// Creates a new `CustomerService`.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, authorization: Arc<dyn Authorization>) -> Self {
        Self {
            transport,
            authorization,
        }
    }

    /// Fetches one page (`?page=&limit=`).
    ///
    /// # Errors
    ///
    /// Returns a [`ConsoleError`] if the request fails or the payload is
    /// not a list.
    pub async fn list(&self, request: PageRequest) -> Result<PageResult<Customer>, ConsoleError> {
        let [(page_key, page), (limit_key, limit)] = request.query_params();
        let api_request = ApiRequest::get(BASE_PATH)
            .param(page_key, page)
            .param(limit_key, limit);
        let body = send(self.transport.as_ref(), api_request).await?;
        normalize::normalize_server_page(
            &body,
            customer::COLLECTION_KEY,
            request,
            customer::normalize,
        )
    }

    /// Fetches a single customer.
    ///
    /// # Errors
    ///
    /// Returns a [`ConsoleError`] if the request fails.
    pub async fn get(&self, id: &EntityId) -> Result<Customer, ConsoleError> {
        let body = send(
            self.transport.as_ref(),
            ApiRequest::get(entity_path(BASE_PATH, id)),
        )
        .await?;
        Ok(customer::normalize(normalize::unwrap_entity(
            &body,
            customer::ENTITY_KEY,
        )))
    }

    /// Updates a customer's contact details.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::PermissionDenied`] or
    /// [`ConsoleError::Validation`] before any request is sent, or a
    /// transport error from the backend.
    pub async fn update(
        &self,
        id: &EntityId,
        update: &CustomerUpdate,
    ) -> Result<Customer, ConsoleError> {
        ensure_allowed(self.authorization.as_ref(), Action::Update).await?;
        update.validate()?;

        let request =
            ApiRequest::new(Method::Put, entity_path(BASE_PATH, id)).with_body(to_body(update)?);
        let body = send(self.transport.as_ref(), request).await?;

        tracing::info!(%id, "customer updated");
        Ok(customer::normalize(normalize::unwrap_entity(
            &body,
            customer::ENTITY_KEY,
        )))
    }

    /// Deletes a customer.
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
        tracing::info!(%id, "customer deleted");
        Ok(())
    }
}

#[async_trait]
impl CollectionService for CustomerService {
    type Entity = Customer;

    async fn fetch_page(&self, request: PageRequest) -> Result<PageResult<Customer>, ConsoleError> {
        self.list(request).await
    }

    async fn delete(&self, id: &EntityId) -> Result<(), ConsoleError> {
        CustomerService::delete(self, id).await
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::ListEntity;
    use crate::error::FailureInfo;
    use crate::ports::StaticAuthorization;
    use crate::service::testing::ScriptedTransport;
    use serde_json::{Value, json};

    fn make_service(
        responses: Vec<Result<Value, FailureInfo>>,
        authorization: StaticAuthorization,
    ) -> (CustomerService, Arc<ScriptedTransport>) {
        let transport = Arc::new(ScriptedTransport::new(responses));
        let service = CustomerService::new(
            Arc::clone(&transport) as Arc<dyn Transport>,
            Arc::new(authorization),
        );
        (service, transport)
    }

    #[tokio::test]
    async fn list_reads_customers_envelope() {
        let (service, transport) = make_service(
            vec![Ok(json!({
                "customers": [
                    { "_id": "c-1", "name": "Ann", "email": "ann@example.com", "userId": "u-1" },
                    { "_id": "c-2", "firstName": "Bob", "lastName": "Ray", "email": "bob@example.com" }
                ],
                "pagination": { "total": 12 }
            }))],
            StaticAuthorization::allow_all(),
        );

        let Ok(page) = service.list(PageRequest::new(2, 10)).await else {
            panic!("list failed");
        };
        assert_eq!(page.total, 12);
        let Some(linked) = page.items.first() else {
            panic!("missing first customer");
        };
        assert_eq!(linked.linked_aggregate(), Some(&EntityId::from("u-1")));
        let Some(guest) = page.items.get(1) else {
            panic!("missing second customer");
        };
        assert!(guest.is_guest());
        assert_eq!(guest.name, "Bob Ray");

        let requests = transport.requests().await;
        let Some(request) = requests.first() else {
            panic!("no request recorded");
        };
        assert_eq!(request.path, "/api/admin/customers");
        assert_eq!(request.param_value("page"), Some("2"));
        assert_eq!(request.param_value("limit"), Some("10"));
    }

    #[tokio::test]
    async fn list_failure_propagates() {
        let (service, _) = make_service(
            vec![Err(FailureInfo::network("timeout"))],
            StaticAuthorization::allow_all(),
        );
        let result = service.list(PageRequest::new(1, 10)).await;
        assert!(matches!(
            result,
            Err(ConsoleError::Transport { status: None, .. })
        ));
    }

    #[tokio::test]
    async fn update_validates_before_sending() {
        let (service, transport) = make_service(Vec::new(), StaticAuthorization::allow_all());
        let update = CustomerUpdate {
            name: String::new(),
            email: "ann@example.com".to_string(),
            phone: None,
            address: None,
        };
        let result = service.update(&EntityId::from("c-1"), &update).await;
        assert!(matches!(result, Err(ConsoleError::Validation(_))));
        assert!(transport.requests().await.is_empty());
    }

    #[tokio::test]
    async fn update_puts_payload() {
        let (service, transport) = make_service(
            vec![Ok(json!({ "customer": { "id": "c-1", "name": "Ann Lee", "email": "ann@example.com" } }))],
            StaticAuthorization::allow_all(),
        );
        let update = CustomerUpdate {
            name: "Ann Lee".to_string(),
            email: "ann@example.com".to_string(),
            phone: None,
            address: Some("1 Main St".to_string()),
        };
        let Ok(customer) = service.update(&EntityId::from("c-1"), &update).await else {
            panic!("update failed");
        };
        assert_eq!(customer.name, "Ann Lee");

        let requests = transport.requests().await;
        let Some(request) = requests.first() else {
            panic!("no request recorded");
        };
        assert_eq!(request.method, Method::Put);
        assert_eq!(request.path, "/api/admin/customers/c-1");
        let Some(body) = request.body.as_ref() else {
            panic!("missing body");
        };
        assert_eq!(body["address"], "1 Main St");
        assert!(body.get("phone").is_none());
    }

    #[tokio::test]
    async fn delete_hits_entity_path() {
        let (service, transport) = make_service(vec![Ok(Value::Null)], StaticAuthorization::allow_all());
        tokio_test::assert_ok!(service.delete(&EntityId::from("c-9")).await);
        let requests = transport.requests().await;
        let Some(request) = requests.first() else {
            panic!("no request recorded");
        };
        assert_eq!(request.method, Method::Delete);
        assert_eq!(request.path, "/api/admin/customers/c-9");
    }

    #[tokio::test]
    async fn delete_without_permission_sends_nothing() {
        let auth = StaticAuthorization {
            update: true,
            delete: false,
            edit: true,
        };
        let (service, transport) = make_service(Vec::new(), auth);
        let result = service.delete(&EntityId::from("c-9")).await;
        assert!(matches!(
            result,
            Err(ConsoleError::PermissionDenied(Action::Delete))
        ));
        assert!(transport.requests().await.is_empty());
    }

    #[tokio::test]
    async fn list_slices_unpaged_response() {
        let all: Vec<Value> = (1..=30)
            .map(|n| json!({ "id": n.to_string(), "name": format!("Customer {n}"), "email": format!("c{n}@example.com") }))
            .collect();
        let (service, _) = make_service(
            vec![Ok(Value::Array(all))],
            StaticAuthorization::allow_all(),
        );

        let Ok(page) = service.list(PageRequest::new(2, 10)).await else {
            panic!("list failed");
        };
        assert_eq!(page.total, 30);
        assert_eq!(page.items.len(), 10);
        let Some(first) = page.items.first() else {
            panic!("empty page");
        };
        assert_eq!(first.id, EntityId::from("11"));
    }
}
