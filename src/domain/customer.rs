//! Customer as managed from the admin console.

use chrono::{DateTime, Utc};
use serde::Serialize;
use validator::Validate;

use super::{EntityId, ListEntity};

/// Customer record. Customers created through registration are linked to
/// a user account and may only be removed together with that account.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Backend identifier.
    pub id: EntityId,
    /// Full name.
    pub name: String,
    /// Contact e-mail.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Single-line postal address.
    pub address: Option<String>,
    /// Registered user account owning this customer, if any.
    #[serde(rename = "userId")]
    pub linked_user_id: Option<EntityId>,
    /// Creation timestamp, when the backend sent one.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp, when the backend sent one.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Customer {
    /// `true` for guest customers (no user account).
    #[must_use]
    pub fn is_guest(&self) -> bool {
        self.linked_user_id.is_none()
    }
}

impl ListEntity for Customer {
    const LABEL: &'static str = "customer";
    const PLURAL_LABEL: &'static str = "customers";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn display_name(&self) -> &str {
        if !self.name.is_empty() {
            &self.name
        } else if let Some(email) = self.email.as_deref() {
            email
        } else {
            self.id.as_str()
        }
    }

    fn linked_aggregate(&self) -> Option<&EntityId> {
        self.linked_user_id.as_ref()
    }
}

/// `PUT /api/admin/customers/:id` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUpdate {
    /// Full name.
    #[validate(length(min = 1, max = 200, message = "name is required"))]
    pub name: String,
    /// Contact e-mail.
    #[validate(email(message = "must be a valid e-mail address"))]
    pub email: String,
    /// Contact phone.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 5, max = 32, message = "phone looks too short or too long"))]
    pub phone: Option<String>,
    /// Single-line postal address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}
