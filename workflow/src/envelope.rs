//! Normalized list-response envelope.
//!
//! The API answers list requests with `{items, total, page, pages}`, some
//! endpoints with `{data: [...]}` and older ones with a bare array. Everything
//! is normalized here, once, at the fetch boundary.

#[cfg(test)]
#[path = "envelope_test.rs"]
mod envelope_test;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ApiError;

const ITEM_KEYS: [&str; 3] = ["items", "data", "results"];
const ENVELOPE_KEYS: [&str; 7] = ["items", "data", "results", "total", "page", "pages", "total_pages"];

/// One fetched page of entities.
#[derive(Clone, Debug, PartialEq)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub total: u64,
    /// Always at least 1, even for an empty result.
    pub total_pages: u32,
    /// Page the server says it returned.
    pub page: u32,
    /// Extra top-level fields (counters, cycle info) passed through untouched.
    pub meta: Map<String, Value>,
}

impl<T> Default for ListPage<T> {
    fn default() -> Self {
        Self { items: Vec::new(), total: 0, total_pages: 1, page: 1, meta: Map::new() }
    }
}

impl<T: DeserializeOwned> ListPage<T> {
    /// Normalize any accepted response shape. Items that fail to decode are
    /// skipped with a warning instead of failing the whole page.
    pub fn normalize(value: Value) -> Self {
        match value {
            Value::Array(raw) => {
                let items = decode_items(raw);
                let total = items.len() as u64;
                Self { items, total, ..Self::default() }
            }
            Value::Object(mut map) => {
                let raw = ITEM_KEYS
                    .iter()
                    .find_map(|key| match map.get_mut(*key) {
                        Some(Value::Array(items)) => Some(std::mem::take(items)),
                        _ => None,
                    })
                    .unwrap_or_default();
                let items = decode_items(raw);
                let total = map.get("total").and_then(Value::as_u64).unwrap_or(items.len() as u64);
                let total_pages = ["pages", "total_pages"]
                    .iter()
                    .find_map(|key| map.get(*key).and_then(Value::as_u64))
                    .map_or(1, |pages| u32::try_from(pages).unwrap_or(u32::MAX).max(1));
                let page = map
                    .get("page")
                    .and_then(Value::as_u64)
                    .map_or(1, |page| u32::try_from(page).unwrap_or(u32::MAX).max(1));
                map.retain(|key, _| !ENVELOPE_KEYS.contains(&key.as_str()));
                Self { items, total, total_pages, page, meta: map }
            }
            other => {
                tracing::warn!(kind = value_kind(&other), "unexpected list response shape");
                Self::default()
            }
        }
    }
}

/// Decode a successful body: empty is `null`, JSON is parsed, anything else
/// is kept as a string.
pub fn parse_body(text: &str) -> Value {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(trimmed).unwrap_or_else(|_| Value::String(trimmed.to_owned()))
}

/// Unwrap `{ "data": {...} }` single-entity responses.
pub fn unwrap_data(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.len() == 1 && map.get("data").is_some_and(Value::is_object) => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Deserialize a response value into `T`.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] when the shape does not match.
pub fn decode_value<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

fn decode_items<T: DeserializeOwned>(raw: Vec<Value>) -> Vec<T> {
    raw.into_iter()
        .filter_map(|value| match serde_json::from_value::<T>(value) {
            Ok(item) => Some(item),
            Err(error) => {
                tracing::warn!(%error, "skipping undecodable list item");
                None
            }
        })
        .collect()
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
