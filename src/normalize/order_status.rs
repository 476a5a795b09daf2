//! Order status normalizer.

use serde_json::Value;

use super::{RawRecord, Sources};
use crate::domain::OrderStatus;

/// Field-resolution table for order statuses.
#[derive(Debug, Clone, Copy)]
pub struct OrderStatusFields {
    /// Identifier sources.
    pub id: Sources,
    /// Display name sources.
    pub name: Sources,
    /// Machine code sources.
    pub code: Sources,
    /// Description sources.
    pub description: Sources,
    /// Badge color sources.
    pub color: Sources,
    /// Ordering sources.
    pub priority: Sources,
    /// Active flag sources.
    pub is_active: Sources,
    /// Default flag sources.
    pub is_default: Sources,
    /// Transition set sources.
    pub transitions: Sources,
    /// Creation timestamp sources.
    pub created_at: Sources,
    /// Update timestamp sources.
    pub updated_at: Sources,
}

/// Backend variants seen for order statuses. Any `isFinal` the backend
/// sends is ignored; terminality is derived from the transition set.
pub const ORDER_STATUS_FIELDS: OrderStatusFields = OrderStatusFields {
    id: &["_id", "id"],
    name: &["name"],
    code: &["code"],
    description: &["description"],
    color: &["color"],
    priority: &["order", "priority"],
    is_active: &["isActive", "is_active", "active"],
    is_default: &["isDefault", "is_default"],
    transitions: &["canTransitionTo", "allowedTransitions"],
    created_at: &["createdAt", "created_at"],
    updated_at: &["updatedAt", "updated_at"],
};

/// Collection key used by list responses.
pub const COLLECTION_KEY: &str = "orderStatuses";

/// Key wrapping a single status in create/update responses.
pub const ENTITY_KEY: &str = "orderStatus";

/// Normalizes one raw order status. Never fails.
#[must_use]
pub fn normalize(raw: &Value) -> OrderStatus {
    let fields = &ORDER_STATUS_FIELDS;
    let record = RawRecord::new(raw);

    let mut status = OrderStatus::new(
        record.reference(fields.id).unwrap_or_default(),
        record.text(fields.name).unwrap_or_default(),
        record.text(fields.code).unwrap_or_default(),
        record.references(fields.transitions),
    );
    status.description = record.text(fields.description);
    status.color = record.text(fields.color);
    status.priority = record.integer(fields.priority);
    status.is_active = record.flag(fields.is_active).unwrap_or(false);
    status.is_default = record.flag(fields.is_default).unwrap_or(false);
    status.created_at = record.timestamp(fields.created_at);
    status.updated_at = record.timestamp(fields.updated_at);
    status
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EntityId;
    use serde_json::json;

    #[test]
    fn legacy_shape() {
        let status = normalize(&json!({ "_id": "1", "order": 5, "canTransitionTo": ["2"] }));
        assert_eq!(status.id, EntityId::from("1"));
        assert_eq!(status.priority, Some(5));
        assert!(!status.is_final());
        assert_eq!(status.allowed_transitions(), &[EntityId::from("2")]);
    }

    #[test]
    fn no_transitions_means_final() {
        let status = normalize(&json!({ "id": "1" }));
        assert!(status.is_final());
        assert!(status.allowed_transitions().is_empty());
    }

    #[test]
    fn current_shape() {
        let status = normalize(&json!({
            "id": "s-2",
            "name": "Shipped",
            "code": "SHIPPED",
            "description": "Handed to courier",
            "color": "#1f8b4c",
            "priority": 3,
            "isActive": true,
            "isDefault": false,
            "allowedTransitions": [{ "_id": "s-3", "name": "Delivered" }],
            "createdAt": "2024-01-05T08:00:00Z"
        }));
        assert_eq!(status.id.as_str(), "s-2");
        assert_eq!(status.name, "Shipped");
        assert_eq!(status.color.as_deref(), Some("#1f8b4c"));
        assert_eq!(status.priority, Some(3));
        assert!(status.is_active);
        assert!(status.can_transition_to(&EntityId::from("s-3")));
        assert!(status.created_at.is_some());
        assert!(status.updated_at.is_none());
    }

    #[test]
    fn legacy_names_win_over_current_names() {
        let status = normalize(&json!({
            "_id": "legacy",
            "id": "current",
            "order": 1,
            "priority": 9,
            "canTransitionTo": [],
            "allowedTransitions": ["x"]
        }));
        assert_eq!(status.id.as_str(), "legacy");
        assert_eq!(status.priority, Some(1));
        assert!(status.is_final());
    }

    #[test]
    fn backend_final_flag_is_ignored() {
        let status = normalize(&json!({ "id": "1", "isFinal": true, "allowedTransitions": ["2"] }));
        assert!(!status.is_final());
        let status = normalize(&json!({ "id": "1", "isFinal": false }));
        assert!(status.is_final());
    }

    #[test]
    fn missing_optional_fields_stay_absent() {
        let status = normalize(&json!({ "name": "Pending", "code": "PENDING" }));
        assert!(status.id.is_empty());
        assert_eq!(status.description, None);
        assert_eq!(status.color, None);
        assert_eq!(status.priority, None);
        assert_eq!(status.created_at, None);
    }
}
