//! Free-form JSON records with shallow-merge updates.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A JSON object stored as-is by the fixture.
///
/// Profiles and items accept arbitrary client fields, so they are kept as a
/// string-keyed map of JSON values rather than a fixed struct. Updates use
/// [`Record::merge`]: top-level keys are overwritten, nested objects are
/// replaced wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Parse a request body.
    ///
    /// Anything that is not a JSON object (invalid JSON, arrays, scalars,
    /// an empty body) reads as an empty record, so missing fields fall
    /// through to the caller's validation instead of failing at parse time.
    #[must_use]
    pub fn from_json_bytes(bytes: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(map)) => Self(map),
            _ => Self::new(),
        }
    }

    /// Get a field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Get a field if it is a string.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Get a field, treating an absent key as JSON `null`.
    #[must_use]
    pub fn get_or_null(&self, key: &str) -> Value {
        self.0.get(key).cloned().unwrap_or(Value::Null)
    }

    /// Set a field, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Shallow merge: every top-level key of `other` overwrites this record's.
    pub fn merge(&mut self, other: Self) {
        for (key, value) in other.0 {
            self.0.insert(key, value);
        }
    }

    /// Number of top-level fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Self::Object(record.0)
    }
}

/// Render a JSON value the way a loosely typed client would stringify it.
///
/// Used to match an item's `store_id` against a store's string id: `1` and
/// `"1"` both render as `1`, while `null` renders as `None` and never matches
/// a counter-issued id.
#[must_use]
pub fn loose_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        other => other.to_string(),
    }
}

/// Whether a loosely typed client would treat `value` as "present".
///
/// `null`, `false`, zero, `""`, `[]` and `{}` are blank; everything else
/// counts as set.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Compare two JSON values, treating numbers by value (`1 == 1.0`).
#[must_use]
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x == y || x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}
