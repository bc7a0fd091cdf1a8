//! Request argument extraction.
//!
//! Three independent maps are derived for every matched request: route
//! parameters (bound by the matched [`SubRoute`](super::SubRoute)), query
//! parameters, and the decoded JSON body. Each extraction is pure; the
//! body decode is the only one that can observe malformed input, and it
//! recovers by handing the handler an absent body.

use std::collections::HashMap;

use serde_json::{Map, Value};
use url::form_urlencoded;

/// Argument bundle handed to every invoked route handler.
///
/// Built by the sub-router after a successful match and before the
/// handler runs. All three maps are independent of each other.
#[derive(Debug, Clone, Default)]
pub struct RequestArgs {
    /// Route parameters bound by `:name` pattern segments.
    pub route: HashMap<String, String>,
    /// Query parameters; a key with one value maps to a JSON string, a
    /// key with two or more values maps to a JSON array of strings.
    pub query: Map<String, Value>,
    /// Decoded JSON request body, or `None` when the body is absent or
    /// could not be decoded.
    pub body: Option<Value>,
}

/// Parses a raw query string into the query-parameter map.
///
/// A key appearing once maps to a plain string; a repeated key maps to
/// an array of its values in order of appearance. This string-vs-list
/// asymmetry is a deliberate ergonomic choice for handlers and is part
/// of the handler contract.
#[must_use]
pub fn query_params(raw_query: Option<&str>) -> Map<String, Value> {
    let mut params = Map::new();
    for (key, value) in form_urlencoded::parse(raw_query.unwrap_or("").as_bytes()) {
        let value = Value::String(value.into_owned());
        match params.get_mut(key.as_ref()) {
            None => {
                params.insert(key.into_owned(), value);
            }
            Some(Value::Array(values)) => values.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
        }
    }
    params
}

/// Decodes a request body as JSON.
///
/// An empty body yields `None` without comment; a malformed body is
/// logged and also yields `None`, so a bad payload never aborts the
/// request.
#[must_use]
pub fn decode_body(bytes: &[u8]) -> Option<Value> {
    if bytes.is_empty() {
        return None;
    }
    match serde_json::from_slice(bytes) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(%err, "failed to decode request body as JSON");
            None
        }
    }
}
