//! Canonical payment method and its editable draft.

use chrono::{DateTime, Utc};
use serde::Serialize;
use validator::Validate;

use super::validation::validate_code;
use super::{EntityId, ListEntity};

/// Payment method in the shape every UI consumer sees.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    /// Backend identifier.
    pub id: EntityId,
    /// Display name (e.g. `"Cash on delivery"`).
    pub name: String,
    /// Stable machine code (e.g. `"CASH_ON_DELIVERY"`).
    pub code: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Whether checkout offers this method.
    pub is_active: bool,
    /// Status a new order paid this way starts in.
    pub default_order_status_id: Option<EntityId>,
    /// Whether checkout must redirect to an online payment provider.
    pub requires_online_payment: bool,
    /// Creation timestamp, when the backend sent one.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp, when the backend sent one.
    pub updated_at: Option<DateTime<Utc>>,
}

impl ListEntity for PaymentMethod {
    const LABEL: &'static str = "payment method";
    const PLURAL_LABEL: &'static str = "payment methods";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.code
        } else {
            &self.name
        }
    }
}

/// Create/update payload for a payment method.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodDraft {
    /// Display name.
    #[validate(length(min = 1, max = 100, message = "name is required"))]
    pub name: String,
    /// Machine code in `UPPER_SNAKE_CASE`.
    #[validate(custom(function = "validate_code"))]
    pub code: String,
    /// Free-form description.
    pub description: String,
    /// Whether checkout offers this method.
    pub is_active: bool,
    /// Status new orders start in.
    #[validate(length(min = 1, message = "a default order status is required"))]
    pub default_order_status_id: String,
    /// Whether an online payment step is required.
    pub requires_online_payment: bool,
}
