//! Fixed datasets served by read endpoints in degraded mode.

use crate::domain::{EntityId, OrderStatus, PaymentMethod};

struct StatusSeed {
    id: &'static str,
    name: &'static str,
    code: &'static str,
    color: &'static str,
    priority: i64,
    is_default: bool,
    next: &'static [&'static str],
}

const STATUS_SEEDS: &[StatusSeed] = &[
    StatusSeed {
        id: "fallback-pending",
        name: "Pending",
        code: "PENDING",
        color: "#f0ad4e",
        priority: 1,
        is_default: true,
        next: &["fallback-confirmed", "fallback-cancelled"],
    },
    StatusSeed {
        id: "fallback-confirmed",
        name: "Confirmed",
        code: "CONFIRMED",
        color: "#5bc0de",
        priority: 2,
        is_default: false,
        next: &["fallback-shipped", "fallback-cancelled"],
    },
    StatusSeed {
        id: "fallback-shipped",
        name: "Shipped",
        code: "SHIPPED",
        color: "#337ab7",
        priority: 3,
        is_default: false,
        next: &["fallback-delivered"],
    },
    StatusSeed {
        id: "fallback-delivered",
        name: "Delivered",
        code: "DELIVERED",
        color: "#5cb85c",
        priority: 4,
        is_default: false,
        next: &[],
    },
    StatusSeed {
        id: "fallback-cancelled",
        name: "Cancelled",
        code: "CANCELLED",
        color: "#d9534f",
        priority: 5,
        is_default: false,
        next: &[],
    },
];

/// Order statuses served when the status list cannot be loaded.
#[must_use]
pub fn order_statuses() -> Vec<OrderStatus> {
    STATUS_SEEDS
        .iter()
        .map(|seed| {
            let mut status = OrderStatus::new(
                seed.id,
                seed.name,
                seed.code,
                seed.next.iter().map(|id| EntityId::from(*id)).collect(),
            );
            status.color = Some(seed.color.to_string());
            status.priority = Some(seed.priority);
            status.is_default = seed.is_default;
            status
        })
        .collect()
}

/// Payment methods served when the method list cannot be loaded.
#[must_use]
pub fn payment_methods() -> Vec<PaymentMethod> {
    vec![
        PaymentMethod {
            id: EntityId::from("fallback-cash-on-delivery"),
            name: "Cash on delivery".to_string(),
            code: "CASH_ON_DELIVERY".to_string(),
            description: Some("Pay the courier when the parcel arrives".to_string()),
            is_active: true,
            default_order_status_id: Some(EntityId::from("fallback-pending")),
            requires_online_payment: false,
            created_at: None,
            updated_at: None,
        },
        PaymentMethod {
            id: EntityId::from("fallback-card"),
            name: "Card".to_string(),
            code: "CARD".to_string(),
            description: Some("Online card payment".to_string()),
            is_active: true,
            default_order_status_id: Some(EntityId::from("fallback-confirmed")),
            requires_online_payment: true,
            created_at: None,
            updated_at: None,
        },
    ]
}
