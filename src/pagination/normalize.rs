//! Maps the backend's assorted list-response shapes onto one page model.
//!
//! Collection endpoints answer in one of three shapes:
//!
//! * `{"data": {"<alias>": [...], "pagination": {...}}}`
//! * `{"<alias>": [...], "pagination": {...}}`
//! * a bare array
//!
//! where `<alias>` depends on the collection. Anything else is reported as a
//! [`FetchError::Shape`] instead of being rendered as an empty list.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::source::FetchError;

/// Collection field names, in the order they are tried.
pub const COLLECTION_ALIASES: [&str; 7] = [
    "items",
    "products",
    "users",
    "categories",
    "orders",
    "recoveries",
    "shopkeeperOrders",
];

const CURRENT_KEYS: [&str; 2] = ["current", "page"];
const PAGES_KEYS: [&str; 2] = ["pages", "totalPages"];
const TOTAL_KEYS: [&str; 1] = ["total"];

/// Pagination metadata after defaults have been filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMeta {
    pub current: usize,
    pub pages: usize,
    pub total: usize,
}

/// One decoded page of records.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPage<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

/// Normalizes `body` into a page of `T`.
///
/// `requested_page` stands in for a missing current-page field and
/// `page_size` is used to derive the page count when the backend omits it.
pub fn normalize_response<T: DeserializeOwned>(
    body: &Value,
    requested_page: usize,
    page_size: usize,
) -> Result<NormalizedPage<T>, FetchError> {
    let (container, records) = locate_collection(body).ok_or_else(|| {
        let keys = body
            .as_object()
            .map(|map| map.keys().cloned().collect::<Vec<_>>().join(", "))
            .unwrap_or_default();
        log::warn!("no collection found in response (top-level keys: [{keys}])");
        FetchError::Shape(format!("no recognised collection among keys [{keys}]"))
    })?;

    let meta_source = locate_meta(body).or_else(|| container.is_object().then_some(container));

    let total = read_count(meta_source, &TOTAL_KEYS).unwrap_or(records.len());
    let pages = read_count(meta_source, &PAGES_KEYS)
        .unwrap_or_else(|| total.div_ceil(page_size.max(1)))
        .max(1);
    let current = read_count(meta_source, &CURRENT_KEYS).unwrap_or(requested_page);

    let items = records
        .iter()
        .cloned()
        .map(serde_json::from_value::<T>)
        .collect::<Result<Vec<T>, _>>()
        .map_err(|e| {
            log::warn!("failed to decode record: {e}");
            FetchError::Shape(format!("undecodable record: {e}"))
        })?;

    Ok(NormalizedPage {
        items,
        meta: PageMeta {
            current,
            pages,
            total,
        },
    })
}

/// Returns the object holding the collection together with the collection.
fn locate_collection(body: &Value) -> Option<(&Value, &Vec<Value>)> {
    let wrapper = body.get("data").filter(|data| data.is_object());

    for container in [wrapper, Some(body)].into_iter().flatten() {
        for alias in COLLECTION_ALIASES {
            if let Some(Value::Array(records)) = container.get(alias) {
                return Some((container, records));
            }
        }
    }

    if let Some(Value::Array(records)) = body.get("data") {
        return Some((body, records));
    }

    match body {
        Value::Array(records) => Some((body, records)),
        _ => None,
    }
}

fn locate_meta(body: &Value) -> Option<&Value> {
    let wrapper = body.get("data").filter(|data| data.is_object());

    [wrapper, Some(body)]
        .into_iter()
        .flatten()
        .find_map(|container| container.get("pagination").filter(|meta| meta.is_object()))
}

fn read_count(meta: Option<&Value>, keys: &[&str]) -> Option<usize> {
    let meta = meta?;
    keys.iter().find_map(|key| meta.get(*key).and_then(as_count))
}

/// Accepts non-negative integers sent either as numbers or numeric strings.
fn as_count(value: &Value) -> Option<usize> {
    match value {
        Value::Number(number) => number
            .as_u64()
            .or_else(|| {
                number
                    .as_f64()
                    .filter(|f| *f >= 0.0 && f.fract() == 0.0)
                    .map(|f| f as u64)
            })
            .and_then(|n| usize::try_from(n).ok()),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    fn page(body: Value, requested: usize, size: usize) -> NormalizedPage<Value> {
        normalize_response(&body, requested, size).unwrap()
    }

    #[test]
    fn wrapped_collection_with_pagination() {
        let body = json!({
            "data": {
                "recoveries": [{"_id": "a"}, {"_id": "b"}],
                "pagination": {"page": 2, "pages": 5, "total": 47}
            }
        });

        let result = page(body, 1, 10);

        assert_eq!(result.items.len(), 2);
        assert_eq!(
            result.meta,
            PageMeta {
                current: 2,
                pages: 5,
                total: 47
            }
        );
    }

    #[test]
    fn bare_sequence_uses_length_as_total() {
        let result = page(json!([1, 2, 3]), 1, 10);

        assert_eq!(result.items, vec![json!(1), json!(2), json!(3)]);
        assert_eq!(
            result.meta,
            PageMeta {
                current: 1,
                pages: 1,
                total: 3
            }
        );
    }

    #[test]
    fn top_level_alias_derives_page_count() {
        let body = json!({
            "products": [{"name": "Chakli"}],
            "pagination": {"current": "3", "total": 41}
        });

        let result = page(body, 1, 20);

        assert_eq!(result.meta.current, 3);
        assert_eq!(result.meta.pages, 3);
        assert_eq!(result.meta.total, 41);
    }

    #[test]
    fn aliases_are_tried_in_priority_order() {
        let body = json!({
            "data": {
                "orders": [{"id": "o"}],
                "items": [{"id": "i1"}, {"id": "i2"}]
            }
        });

        let result = page(body, 1, 10);

        assert_eq!(result.items, vec![json!({"id": "i1"}), json!({"id": "i2"})]);
    }

    #[test]
    fn wrapper_wins_over_top_level() {
        let body = json!({
            "users": [{"id": "outer"}],
            "data": {"shopkeeperOrders": [{"id": "inner"}]}
        });

        let result = page(body, 1, 10);

        assert_eq!(result.items, vec![json!({"id": "inner"})]);
    }

    #[test]
    fn data_array_is_the_collection() {
        let body = json!({"data": [{"id": 1}], "total": 11, "totalPages": 2});

        let result = page(body, 1, 10);

        assert_eq!(result.items.len(), 1);
        assert_eq!(result.meta.total, 11);
        assert_eq!(result.meta.pages, 2);
    }

    #[test]
    fn empty_total_still_yields_one_page() {
        let result = page(json!({"categories": []}), 1, 10);

        assert_eq!(result.meta.pages, 1);
        assert_eq!(result.meta.total, 0);
    }

    #[test]
    fn unknown_shape_is_an_error() {
        let result = normalize_response::<Value>(&json!({"message": "ok"}), 1, 10);

        assert!(matches!(result, Err(FetchError::Shape(_))));
    }

    #[test]
    fn records_decode_into_typed_items() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Category {
            name: String,
        }

        let ok: NormalizedPage<Category> =
            normalize_response(&json!({"categories": [{"name": "Namkeen"}]}), 1, 10).unwrap();
        assert_eq!(
            ok.items,
            vec![Category {
                name: "Namkeen".into()
            }]
        );

        let bad = normalize_response::<Category>(&json!({"categories": [{"title": 1}]}), 1, 10);
        assert!(matches!(bad, Err(FetchError::Shape(_))));
    }
}
