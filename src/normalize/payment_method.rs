//! Payment method normalizer.

use serde_json::Value;

use super::{RawRecord, Sources};
use crate::domain::PaymentMethod;

/// Field-resolution table for payment methods.
#[derive(Debug, Clone, Copy)]
pub struct PaymentMethodFields {
    /// Identifier sources.
    pub id: Sources,
    /// Display name sources.
    pub name: Sources,
    /// Machine code sources.
    pub code: Sources,
    /// Description sources.
    pub description: Sources,
    /// Active flag sources.
    pub is_active: Sources,
    /// Default order status sources (plain id or embedded status).
    pub default_order_status: Sources,
    /// Online payment flag sources.
    pub requires_online_payment: Sources,
    /// Creation timestamp sources.
    pub created_at: Sources,
    /// Update timestamp sources.
    pub updated_at: Sources,
}

/// Backend variants seen for payment methods.
pub const PAYMENT_METHOD_FIELDS: PaymentMethodFields = PaymentMethodFields {
    id: &["_id", "id"],
    name: &["name"],
    code: &["code"],
    description: &["description"],
    is_active: &["isActive", "is_active", "active"],
    default_order_status: &["defaultOrderStatusId", "defaultOrderStatus", "default_order_status_id"],
    requires_online_payment: &["requiresOnlinePayment", "requires_online_payment", "isOnline"],
    created_at: &["createdAt", "created_at"],
    updated_at: &["updatedAt", "updated_at"],
};

/// Collection key used by list responses.
pub const COLLECTION_KEY: &str = "paymentMethods";

/// Key wrapping a single method in create/update responses.
pub const ENTITY_KEY: &str = "paymentMethod";

/// Normalizes one raw payment method. Never fails.
#[must_use]
pub fn normalize(raw: &Value) -> PaymentMethod {
    let fields = &PAYMENT_METHOD_FIELDS;
    let record = RawRecord::new(raw);

    PaymentMethod {
        id: record.reference(fields.id).unwrap_or_default(),
        name: record.text(fields.name).unwrap_or_default(),
        code: record.text(fields.code).unwrap_or_default(),
        description: record.text(fields.description),
        is_active: record.flag(fields.is_active).unwrap_or(false),
        default_order_status_id: record.reference(fields.default_order_status),
        requires_online_payment: record.flag(fields.requires_online_payment).unwrap_or(false),
        created_at: record.timestamp(fields.created_at),
        updated_at: record.timestamp(fields.updated_at),
    }
}
