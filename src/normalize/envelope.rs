//! Paged-list envelopes and single-entity wrappers.
//!
//! List endpoints answer with a bare array, `{ items, total }`,
//! `{ data, pagination: { total } }`, an entity-keyed object such as
//! `{ customers, totalCount }`, or a `data` object wrapping one of those.

use serde_json::{Map, Value};

use super::{RawRecord, Sources};
use crate::domain::{PageRequest, PageResult, slice_locally};
use crate::error::ConsoleError;

/// Generic keys that may hold the item array, after the entity key.
const ITEM_SOURCES: Sources = &["items", "data", "results", "rows"];

/// Keys that may hold the collection size.
const TOTAL_SOURCES: Sources = &["total", "totalItems", "totalCount", "count"];

/// Nested objects that may carry the collection size.
const META_SOURCES: Sources = &["pagination", "meta"];

/// Normalizes a list response into a [`PageResult`].
///
/// `entity_key` is the entity-specific collection key (e.g.
/// `"paymentMethods"`) tried before the generic ones. When no total is
/// present the item count is used.
///
/// # Errors
///
/// Returns [`ConsoleError::Decode`] when no item array can be found.
pub fn normalize_page<T>(
    body: &Value,
    entity_key: &str,
    normalize: impl Fn(&Value) -> T,
) -> Result<PageResult<T>, ConsoleError> {
    let (entries, total) = locate_items(body, entity_key)?;
    let items: Vec<T> = entries.iter().map(normalize).collect();
    let total = total.unwrap_or(items.len() as u64);
    Ok(PageResult::new(items, total))
}

/// Normalizes the response of a server-paged list endpoint.
///
/// Behaves like [`normalize_page`], except that a response holding more
/// than `request.limit` items is taken as the whole collection (the
/// backend ignored `page`/`limit`): the requested page is sliced locally
/// and `total` is at least the unsliced size.
///
/// # Errors
///
/// Returns [`ConsoleError::Decode`] when no item array can be found.
pub fn normalize_server_page<T>(
    body: &Value,
    entity_key: &str,
    request: PageRequest,
    normalize: impl Fn(&Value) -> T,
) -> Result<PageResult<T>, ConsoleError> {
    let (entries, total) = locate_items(body, entity_key)?;
    if entries.len() <= request.limit as usize {
        let items: Vec<T> = entries.iter().map(normalize).collect();
        let total = total.unwrap_or(items.len() as u64);
        return Ok(PageResult::new(items, total));
    }

    tracing::debug!(
        entity_key,
        received = entries.len(),
        limit = request.limit,
        "list response not paged, slicing locally"
    );
    let sliced = slice_locally(entries.iter().collect::<Vec<&Value>>(), request);
    let total = sliced.total.max(total.unwrap_or(0));
    Ok(PageResult::new(
        sliced.items.into_iter().map(normalize).collect(),
        total,
    ))
}

fn locate_items<'a>(
    body: &'a Value,
    entity_key: &str,
) -> Result<(&'a Vec<Value>, Option<u64>), ConsoleError> {
    match body {
        Value::Array(entries) => Ok((entries, None)),
        Value::Object(map) => {
            let total = envelope_total(map);
            if let Some(Value::Array(entries)) = map.get(entity_key) {
                return Ok((entries, total));
            }
            for key in ITEM_SOURCES {
                match map.get(*key) {
                    Some(Value::Array(entries)) => return Ok((entries, total)),
                    Some(nested @ Value::Object(_)) => {
                        let (entries, nested_total) = locate_items(nested, entity_key)?;
                        return Ok((entries, total.or(nested_total)));
                    }
                    _ => {}
                }
            }
            Err(ConsoleError::Decode(format!(
                "list response has no `{entity_key}` or items array"
            )))
        }
        other => Err(ConsoleError::Decode(format!(
            "expected a list response, got {}",
            json_kind(other)
        ))),
    }
}

fn envelope_total(map: &Map<String, Value>) -> Option<u64> {
    let record = RawRecord { fields: Some(map) };
    record
        .integer(TOTAL_SOURCES)
        .or_else(|| {
            META_SOURCES.iter().find_map(|key| {
                map.get(*key)
                    .and_then(|meta| RawRecord::new(meta).integer(TOTAL_SOURCES))
            })
        })
        .and_then(|total| u64::try_from(total).ok())
}

/// Unwraps a single-entity response: `{ data: {...} }` or
/// `{ <entity_key>: {...} }` yield the inner object, anything else is
/// returned as is.
#[must_use]
pub fn unwrap_entity<'a>(body: &'a Value, entity_key: &str) -> &'a Value {
    let Some(map) = body.as_object() else {
        return body;
    };
    [entity_key, "data"]
        .iter()
        .find_map(|key| map.get(*key).filter(|inner| inner.is_object()))
        .unwrap_or(body)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use serde_json::json;

    fn names(body: &Value, key: &str) -> Result<PageResult<String>, ConsoleError> {
        normalize_page(body, key, |raw| {
            RawRecord::new(raw).text(&["name"]).unwrap_or_default()
        })
    }

    #[test]
    fn bare_array_uses_length_as_total() {
        let Ok(page) = names(&json!([{ "name": "a" }, { "name": "b" }]), "customers") else {
            panic!("array should normalize");
        };
        assert_eq!(page.items, vec!["a", "b"]);
        assert_eq!(page.total, 2);
    }

    #[test]
    fn entity_keyed_envelope_with_total() {
        let body = json!({ "customers": [{ "name": "a" }], "total": 35 });
        let Ok(page) = names(&body, "customers") else {
            panic!("envelope should normalize");
        };
        assert_eq!(page.items, vec!["a"]);
        assert_eq!(page.total, 35);
    }

    #[test]
    fn data_with_pagination_meta() {
        let body = json!({ "data": [{ "name": "a" }], "pagination": { "total": "12", "page": 2 } });
        let Ok(page) = names(&body, "paymentMethods") else {
            panic!("envelope should normalize");
        };
        assert_eq!(page.total, 12);
    }

    #[test]
    fn nested_data_envelope() {
        let body = json!({ "success": true, "data": { "items": [{ "name": "x" }], "totalItems": 7 } });
        let Ok(page) = names(&body, "orderStatuses") else {
            panic!("nested envelope should normalize");
        };
        assert_eq!(page.items, vec!["x"]);
        assert_eq!(page.total, 7);
    }

    #[test]
    fn missing_items_is_a_decode_error() {
        let result = names(&json!({ "total": 3 }), "customers");
        assert!(matches!(result, Err(ConsoleError::Decode(_))));
        let result = names(&json!("nope"), "customers");
        assert!(matches!(result, Err(ConsoleError::Decode(_))));
    }

    #[test]
    fn unpaged_response_is_sliced_to_request() {
        let all: Vec<Value> = (1..=30).map(|n| json!({ "name": n.to_string() })).collect();
        let body = Value::Array(all);
        let Ok(page) = normalize_server_page(&body, "customers", PageRequest::new(2, 10), |raw| {
            RawRecord::new(raw).text(&["name"]).unwrap_or_default()
        }) else {
            panic!("array should normalize");
        };
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.items.first().map(String::as_str), Some("11"));
        assert_eq!(page.total, 30);
    }

    #[test]
    fn paged_response_is_kept_as_is() {
        let body = json!({ "items": [{ "name": "k" }], "total": 31 });
        let Ok(page) = normalize_server_page(&body, "customers", PageRequest::new(4, 10), |raw| {
            RawRecord::new(raw).text(&["name"]).unwrap_or_default()
        }) else {
            panic!("envelope should normalize");
        };
        assert_eq!(page.items, vec!["k"]);
        assert_eq!(page.total, 31);
    }

    #[test]
    fn unwrap_entity_variants() {
        let wrapped = json!({ "data": { "name": "a" } });
        assert_eq!(unwrap_entity(&wrapped, "orderStatus"), &json!({ "name": "a" }));
        let keyed = json!({ "orderStatus": { "name": "b" }, "message": "created" });
        assert_eq!(unwrap_entity(&keyed, "orderStatus"), &json!({ "name": "b" }));
        let bare = json!({ "name": "c" });
        assert_eq!(unwrap_entity(&bare, "orderStatus"), &bare);
    }
}
