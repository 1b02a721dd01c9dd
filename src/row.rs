//! Input rows and the loose field access the view map relies on.
//!
//! A row is any element of the input array. Lookups never fail: a missing key, or a
//! key looked up on something that is not an object, reads as absent. Only a `null`
//! row has no fields at all; the view map rejects it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One record of the input dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(Value);

impl Row {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        member(&self.0, key)
    }

    /// Returns the field only when it is present and truthy.
    #[must_use]
    pub fn truthy(&self, key: &str) -> Option<&Value> {
        self.get(key).filter(|v| is_truthy(v))
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }
}

impl From<Value> for Row {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// JavaScript truthiness for a JSON value.
///
/// `null`, `false`, `0`, `-0`, `NaN` and the empty string are falsy; every
/// other value, including empty objects and arrays, is truthy.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Property lookup on an arbitrary value; non-objects have no properties.
#[must_use]
pub fn member<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.as_object().and_then(|o| o.get(key))
}

/// Short type name used in diagnostics.
#[must_use]
pub fn type_name(value: Option<&Value>) -> &'static str {
    match value {
        None => "undefined",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "a boolean",
        Some(Value::Number(_)) => "a number",
        Some(Value::String(_)) => "a string",
        Some(Value::Array(_)) => "an array",
        Some(Value::Object(_)) => "an object",
    }
}
