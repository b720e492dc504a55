/*
[INPUT]:  Flat filter/pagination parameters (structs or ad hoc key/value pairs)
[OUTPUT]: URL query strings ("" or "?k=v&...") and encoded path segments
[POS]:    HTTP layer - shared request building helpers
[UPDATE]: When changing query encoding or supported parameter shapes
*/

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use url::form_urlencoded;

use crate::http::{GovernanceError, Result};

/// A single scalar query parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Str(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Str(value) => f.write_str(value),
            QueryValue::Int(value) => write!(f, "{value}"),
            QueryValue::UInt(value) => write!(f, "{value}"),
            QueryValue::Float(value) => write!(f, "{value}"),
            QueryValue::Bool(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Str(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Str(value)
    }
}

impl From<&String> for QueryValue {
    fn from(value: &String) -> Self {
        QueryValue::Str(value.clone())
    }
}

impl From<i32> for QueryValue {
    fn from(value: i32) -> Self {
        QueryValue::Int(value.into())
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        QueryValue::Int(value)
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        QueryValue::UInt(value.into())
    }
}

impl From<u64> for QueryValue {
    fn from(value: u64) -> Self {
        QueryValue::UInt(value)
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        QueryValue::Float(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Bool(value)
    }
}

/// Ordered query-string builder that skips absent values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryBuilder {
    pairs: Vec<(String, String)>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `key=value` when `value` is present
    pub fn push<V: Into<QueryValue>>(mut self, key: &str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.append(key, value);
        }
        self
    }

    /// Add `key=value` unconditionally
    pub fn append<V: Into<QueryValue>>(&mut self, key: &str, value: V) {
        self.pairs.push((key.to_string(), value.into().to_string()));
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Render as `?k=v&...`, or an empty string when nothing was added
    pub fn build(&self) -> String {
        if self.pairs.is_empty() {
            return String::new();
        }
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
        format!("?{}", serializer.finish())
    }
}

/// Flatten a serializable filter struct into a query string.
///
/// Fields that serialize to `null` are skipped, scalars are stringified in
/// declaration order. Arrays and nested objects are rejected.
pub fn build_query<T: Serialize + ?Sized>(params: &T) -> Result<String> {
    let map = match serde_json::to_value(params)? {
        Value::Object(map) => map,
        Value::Null => return Ok(String::new()),
        other => {
            return Err(GovernanceError::InvalidQuery(format!(
                "expected a flat object, got {}",
                value_kind(&other)
            )));
        }
    };

    let mut builder = QueryBuilder::new();
    for (key, value) in map {
        match value {
            Value::Null => {}
            Value::String(value) => builder.append(&key, value),
            Value::Bool(value) => builder.append(&key, value),
            Value::Number(value) => builder.append(&key, value.to_string()),
            other => {
                return Err(GovernanceError::InvalidQuery(format!(
                    "parameter `{key}` must be a scalar, got {}",
                    value_kind(&other)
                )));
            }
        }
    }
    Ok(builder.build())
}

/// Percent-encode a value for use as a single path segment
pub fn encode_segment(segment: &str) -> String {
    form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
