//! The confd boolean dialect.
//!
//! The daemon does not use JSON booleans. A value is false when it encodes
//! as the empty string, the number zero, or nothing at all; every other
//! string, number, array, or object is true. On the wire booleans are
//! emitted as the integers `0` and `1`.

use std::fmt;

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use serde_json::Value;

/// A boolean in the daemon's encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Boolean(pub bool);

/// The wire representation of a bool: `1` for true, `0` for false.
pub fn bool_value(value: bool) -> u8 {
    if value { 1 } else { 0 }
}

impl From<bool> for Boolean {
    fn from(value: bool) -> Boolean {
        Boolean(value)
    }
}

impl From<Boolean> for bool {
    fn from(value: Boolean) -> bool {
        value.0
    }
}

impl fmt::Display for Boolean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", bool_value(self.0))
    }
}

impl Serialize for Boolean {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(bool_value(self.0))
    }
}

impl<'de> Deserialize<'de> for Boolean {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Boolean, D::Error> {
        let decoded = Value::deserialize(deserializer)?;
        let value = match decoded {
            Value::Null => false,
            Value::String(text) => !text.is_empty(),
            Value::Number(number) => number.as_f64() != Some(0.0),
            Value::Bool(value) => value,
            Value::Array(_) | Value::Object(_) => true,
        };
        Ok(Boolean(value))
    }
}
