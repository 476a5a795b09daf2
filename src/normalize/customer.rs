//! Customer normalizer.

use serde_json::Value;

use super::{RawRecord, Sources};
use crate::domain::Customer;

/// Field-resolution table for customers.
#[derive(Debug, Clone, Copy)]
pub struct CustomerFields {
    /// Identifier sources.
    pub id: Sources,
    /// Full name sources.
    pub name: Sources,
    /// Given name sources, used when no full name is present.
    pub first_name: Sources,
    /// Family name sources, used when no full name is present.
    pub last_name: Sources,
    /// E-mail sources.
    pub email: Sources,
    /// Phone sources.
    pub phone: Sources,
    /// Address sources (string or structured object).
    pub address: Sources,
    /// Linked user account sources (plain id or embedded user).
    pub linked_user: Sources,
    /// Creation timestamp sources.
    pub created_at: Sources,
    /// Update timestamp sources.
    pub updated_at: Sources,
}

/// Backend variants seen for customers.
pub const CUSTOMER_FIELDS: CustomerFields = CustomerFields {
    id: &["_id", "id"],
    name: &["name", "fullName"],
    first_name: &["firstName", "first_name"],
    last_name: &["lastName", "last_name"],
    email: &["email"],
    phone: &["phone", "phoneNumber"],
    address: &["address"],
    linked_user: &["userId", "user", "user_id"],
    created_at: &["createdAt", "created_at"],
    updated_at: &["updatedAt", "updated_at"],
};

/// Parts of a structured address, in display order.
const ADDRESS_PARTS: &[Sources] = &[
    &["street", "line1"],
    &["line2"],
    &["postalCode", "zip"],
    &["city"],
    &["state", "province"],
    &["country"],
];

/// Collection key used by list responses.
pub const COLLECTION_KEY: &str = "customers";

/// Key wrapping a single customer in detail/update responses.
pub const ENTITY_KEY: &str = "customer";

/// Normalizes one raw customer. Never fails.
#[must_use]
pub fn normalize(raw: &Value) -> Customer {
    let fields = &CUSTOMER_FIELDS;
    let record = RawRecord::new(raw);

    let name = record.text(fields.name).unwrap_or_else(|| {
        [fields.first_name, fields.last_name]
            .iter()
            .filter_map(|&sources| record.text(sources))
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    });

    Customer {
        id: record.reference(fields.id).unwrap_or_default(),
        name,
        email: record.text(fields.email),
        phone: record.text(fields.phone),
        address: address(&record, fields.address),
        linked_user_id: record.reference(fields.linked_user),
        created_at: record.timestamp(fields.created_at),
        updated_at: record.timestamp(fields.updated_at),
    }
}

fn address(record: &RawRecord<'_>, sources: Sources) -> Option<String> {
    let raw = record.resolve(sources)?;
    if let Some(text) = raw.as_str() {
        return Some(text.to_string()).filter(|t| !t.trim().is_empty());
    }
    let parts = RawRecord::new(raw);
    let line = ADDRESS_PARTS
        .iter()
        .filter_map(|&part| parts.text(part))
        .filter(|part| !part.trim().is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    Some(line).filter(|l| !l.is_empty())
}
