//! Backend shape normalization.
//!
//! The backend is not consistent about field names: ids arrive as `_id` or
//! `id`, ordering as `order` or `priority`, transitions as
//! `canTransitionTo` or `allowedTransitions`. Each entity declares a
//! field-resolution table (a list of source keys per canonical field,
//! tried left to right) and is normalized exactly once, at the service
//! boundary. Normalizers are total: they never fail, missing optional
//! fields become `None`/empty, and nothing is synthesized.

pub mod customer;
pub mod envelope;
pub mod order_status;
pub mod payment_method;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};

use crate::domain::EntityId;

pub use envelope::{normalize_page, normalize_server_page, unwrap_entity};

/// Source keys for one canonical field, in priority order.
pub type Sources = &'static [&'static str];

/// Keys under which a nested reference object carries its id.
const REFERENCE_ID: Sources = &["_id", "id", "$oid"];

/// Read-only view over an untyped backend record.
///
/// Non-object values behave like an empty record, which keeps every
/// normalizer total.
#[derive(Debug, Clone, Copy)]
pub struct RawRecord<'a> {
    fields: Option<&'a Map<String, Value>>,
}

impl<'a> RawRecord<'a> {
    /// Wraps a raw JSON value.
    #[must_use]
    pub fn new(raw: &'a Value) -> Self {
        Self {
            fields: raw.as_object(),
        }
    }

    /// First present, non-null value among `sources`.
    #[must_use]
    pub fn resolve(&self, sources: Sources) -> Option<&'a Value> {
        let fields = self.fields?;
        sources
            .iter()
            .find_map(|key| fields.get(*key).filter(|value| !value.is_null()))
    }

    /// Resolved value as text. Numbers are rendered, other types ignored.
    #[must_use]
    pub fn text(&self, sources: Sources) -> Option<String> {
        self.resolve(sources).and_then(value_text)
    }

    /// Resolved value as an integer. Numeric strings are accepted.
    #[must_use]
    pub fn integer(&self, sources: Sources) -> Option<i64> {
        match self.resolve(sources)? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Resolved value as a boolean. `"true"`/`"false"` and `0`/`1` are
    /// accepted.
    #[must_use]
    pub fn flag(&self, sources: Sources) -> Option<bool> {
        match self.resolve(sources)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => None,
            },
            Value::Number(n) => n.as_i64().map(|n| n != 0),
            _ => None,
        }
    }

    /// Resolved value parsed as a timestamp.
    ///
    /// RFC 3339 strings are preferred; zone-less ISO-8601 date-times and
    /// plain dates are read as UTC; numbers are epoch milliseconds.
    #[must_use]
    pub fn timestamp(&self, sources: Sources) -> Option<DateTime<Utc>> {
        match self.resolve(sources)? {
            Value::String(s) => parse_timestamp(s.trim()),
            Value::Number(n) => n.as_i64().and_then(DateTime::<Utc>::from_timestamp_millis),
            _ => None,
        }
    }

    /// Resolved value as a reference: a plain id, or an embedded document
    /// carrying `_id`/`id`.
    #[must_use]
    pub fn reference(&self, sources: Sources) -> Option<EntityId> {
        self.resolve(sources).and_then(value_reference)
    }

    /// Resolved value as a list of references. A single reference is
    /// treated as a one-element list; anything else yields an empty list.
    #[must_use]
    pub fn references(&self, sources: Sources) -> Vec<EntityId> {
        match self.resolve(sources) {
            Some(Value::Array(entries)) => entries.iter().filter_map(value_reference).collect(),
            Some(other) => value_reference(other).into_iter().collect(),
            None => Vec::new(),
        }
    }
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn value_reference(value: &Value) -> Option<EntityId> {
    match value {
        Value::Object(_) => RawRecord::new(value).reference(REFERENCE_ID),
        other => value_text(other)
            .filter(|id| !id.trim().is_empty())
            .map(EntityId::from),
    }
}

fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    #[test]
    fn first_present_source_wins() {
        let raw = json!({ "_id": "a", "id": "b" });
        let record = RawRecord::new(&raw);
        assert_eq!(record.text(&["_id", "id"]).as_deref(), Some("a"));
        assert_eq!(record.text(&["id", "_id"]).as_deref(), Some("b"));
    }

    #[test]
    fn null_source_is_skipped() {
        let raw = json!({ "_id": null, "id": 7 });
        let record = RawRecord::new(&raw);
        assert_eq!(record.text(&["_id", "id"]).as_deref(), Some("7"));
    }

    #[test]
    fn non_object_behaves_like_empty_record() {
        let raw = json!("oops");
        let record = RawRecord::new(&raw);
        assert_eq!(record.text(&["name"]), None);
        assert!(record.references(&["canTransitionTo"]).is_empty());
    }

    #[test]
    fn integers_from_numbers_and_strings() {
        let raw = json!({ "a": 5, "b": "12", "c": 2.9, "d": "x" });
        let record = RawRecord::new(&raw);
        assert_eq!(record.integer(&["a"]), Some(5));
        assert_eq!(record.integer(&["b"]), Some(12));
        assert_eq!(record.integer(&["c"]), Some(2));
        assert_eq!(record.integer(&["d"]), None);
    }

    #[test]
    fn flags_from_several_encodings() {
        let raw = json!({ "a": true, "b": "false", "c": 1, "d": "maybe" });
        let record = RawRecord::new(&raw);
        assert_eq!(record.flag(&["a"]), Some(true));
        assert_eq!(record.flag(&["b"]), Some(false));
        assert_eq!(record.flag(&["c"]), Some(true));
        assert_eq!(record.flag(&["d"]), None);
    }

    #[test]
    fn timestamps_in_iso_variants() {
        let raw = json!({
            "zoned": "2024-03-01T10:15:30.000Z",
            "offset": "2024-03-01T12:15:30+02:00",
            "naive": "2024-03-01T10:15:30",
            "date": "2024-03-01",
            "garbage": "yesterday"
        });
        let record = RawRecord::new(&raw);
        let zoned = record.timestamp(&["zoned"]);
        assert_eq!(zoned, record.timestamp(&["offset"]));
        assert_eq!(zoned, record.timestamp(&["naive"]));
        let Some(date) = record.timestamp(&["date"]) else {
            panic!("date-only value should parse");
        };
        assert_eq!((date.year(), date.month(), date.day(), date.hour()), (2024, 3, 1, 0));
        assert_eq!(record.timestamp(&["garbage"]), None);
        assert_eq!(record.timestamp(&["missing"]), None);
    }

    #[test]
    fn references_accept_embedded_documents() {
        let raw = json!({
            "list": ["1", { "_id": "2" }, { "id": 3 }, { "$oid": "4" }, "", true]
        });
        let record = RawRecord::new(&raw);
        assert_eq!(
            record.references(&["list"]),
            vec![
                EntityId::from("1"),
                EntityId::from("2"),
                EntityId::from("3"),
                EntityId::from("4")
            ]
        );
    }

    #[test]
    fn single_reference_becomes_one_element_list() {
        let raw = json!({ "next": "9" });
        assert_eq!(
            RawRecord::new(&raw).references(&["next"]),
            vec![EntityId::from("9")]
        );
    }
}
