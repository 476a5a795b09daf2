//! Canonical order status and its editable draft.

use chrono::{DateTime, Utc};
use serde::Serialize;
use validator::Validate;

use super::validation::{validate_code, validate_color};
use super::{EntityId, ListEntity};

/// Order status in the shape every UI consumer sees.
///
/// `is_final` is derived from the transition set and cannot be set
/// independently: a status with no outgoing transitions is terminal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatus {
    /// Backend identifier.
    pub id: EntityId,
    /// Display name (e.g. `"Shipped"`).
    pub name: String,
    /// Stable machine code (e.g. `"SHIPPED"`).
    pub code: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Badge color as a CSS hex string.
    pub color: Option<String>,
    /// Sort key; lower sorts first.
    pub priority: Option<i64>,
    /// Whether the status can currently be assigned.
    pub is_active: bool,
    /// Whether new orders start in this status.
    pub is_default: bool,
    is_final: bool,
    allowed_transitions: Vec<EntityId>,
    /// Creation timestamp, when the backend sent one.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp, when the backend sent one.
    pub updated_at: Option<DateTime<Utc>>,
}

impl OrderStatus {
    /// Creates an active, non-default status with the given transitions.
    #[must_use]
    pub fn new(
        id: impl Into<EntityId>,
        name: impl Into<String>,
        code: impl Into<String>,
        allowed_transitions: Vec<EntityId>,
    ) -> Self {
        let mut status = Self {
            id: id.into(),
            name: name.into(),
            code: code.into(),
            description: None,
            color: None,
            priority: None,
            is_active: true,
            is_default: false,
            is_final: true,
            allowed_transitions: Vec::new(),
            created_at: None,
            updated_at: None,
        };
        status.set_allowed_transitions(allowed_transitions);
        status
    }

    /// Ids of the statuses an order may move to from this one.
    #[must_use]
    pub fn allowed_transitions(&self) -> &[EntityId] {
        &self.allowed_transitions
    }

    /// Replaces the transition set (duplicates dropped, first occurrence
    /// kept) and recomputes the terminal flag.
    pub fn set_allowed_transitions(&mut self, transitions: Vec<EntityId>) {
        let mut unique: Vec<EntityId> = Vec::with_capacity(transitions.len());
        for id in transitions {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        self.is_final = unique.is_empty();
        self.allowed_transitions = unique;
    }

    /// `true` when no transition leaves this status.
    #[must_use]
    pub fn is_final(&self) -> bool {
        self.is_final
    }

    /// Whether an order in this status may move to `target`.
    #[must_use]
    pub fn can_transition_to(&self, target: &EntityId) -> bool {
        self.allowed_transitions.contains(target)
    }
}

impl ListEntity for OrderStatus {
    const LABEL: &'static str = "order status";
    const PLURAL_LABEL: &'static str = "order statuses";

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

/// Create/update payload for an order status.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusDraft {
    /// Display name.
    #[validate(length(min = 1, max = 100, message = "name is required"))]
    pub name: String,
    /// Machine code in `UPPER_SNAKE_CASE`.
    #[validate(custom(function = "validate_code"))]
    pub code: String,
    /// Free-form description.
    pub description: String,
    /// Badge color as `#rgb` or `#rrggbb`.
    #[validate(custom(function = "validate_color"))]
    pub color: String,
    /// Sort key.
    pub priority: i64,
    /// Whether the status can be assigned.
    pub is_active: bool,
    /// Whether new orders start here.
    pub is_default: bool,
    /// Reachable status ids.
    pub allowed_transitions: Vec<EntityId>,
}

impl From<&OrderStatus> for OrderStatusDraft {
    fn from(status: &OrderStatus) -> Self {
        Self {
            name: status.name.clone(),
            code: status.code.clone(),
            description: status.description.clone().unwrap_or_default(),
            color: status.color.clone().unwrap_or_default(),
            priority: status.priority.unwrap_or_default(),
            is_active: status.is_active,
            is_default: status.is_default,
            allowed_transitions: status.allowed_transitions.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn draft() -> OrderStatusDraft {
        OrderStatusDraft {
            name: "Shipped".to_string(),
            code: "SHIPPED".to_string(),
            description: String::new(),
            color: "#1f8b4c".to_string(),
            priority: 3,
            is_active: true,
            is_default: false,
            allowed_transitions: vec![EntityId::from("delivered")],
        }
    }

    #[test]
    fn final_flag_follows_transitions() {
        let mut status = OrderStatus::new("1", "Pending", "PENDING", vec!["2".into()]);
        assert!(!status.is_final());
        status.set_allowed_transitions(Vec::new());
        assert!(status.is_final());
    }

    #[test]
    fn duplicate_transitions_are_collapsed() {
        let status = OrderStatus::new(
            "1",
            "Pending",
            "PENDING",
            vec!["2".into(), "3".into(), "2".into()],
        );
        assert_eq!(
            status.allowed_transitions(),
            &[EntityId::from("2"), EntityId::from("3")]
        );
        assert!(status.can_transition_to(&EntityId::from("3")));
        assert!(!status.can_transition_to(&EntityId::from("1")));
    }

    #[test]
    fn serializes_camel_case_with_computed_final_flag() {
        let status = OrderStatus::new("1", "Delivered", "DELIVERED", Vec::new());
        let json = serde_json::to_value(&status).unwrap_or_default();
        assert_eq!(json["isFinal"], true);
        assert_eq!(json["allowedTransitions"], serde_json::json!([]));
    }

    #[test]
    fn valid_draft_passes() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn draft_rejects_bad_code_and_color() {
        let mut bad = draft();
        bad.code = "shipped".to_string();
        bad.color = "green".to_string();
        let Err(errors) = bad.validate() else {
            panic!("draft should be invalid");
        };
        let fields = errors.field_errors();
        assert!(fields.contains_key("code"));
        assert!(fields.contains_key("color"));
    }

    #[test]
    fn draft_from_status_round_trips_fields() {
        let mut status = OrderStatus::new("1", "Pending", "PENDING", vec!["2".into()]);
        status.priority = Some(1);
        let draft = OrderStatusDraft::from(&status);
        assert_eq!(draft.code, "PENDING");
        assert_eq!(draft.priority, 1);
        assert_eq!(draft.allowed_transitions, vec![EntityId::from("2")]);
    }
}
