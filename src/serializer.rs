//! Serialization layer. JSON via serde_json, compact or indented.
//!
//! Implement [`Serializer`] if you need a different format (RON, TOML, etc.).
//! Whatever the format, the top level must decode to a keyed mapping — a
//! scalar or sequence there is a [`Error::Format`](crate::Error::Format).

use crate::error::{Error, Result};
use serde_json::{Map, Value};

/// Converts mirror snapshots to/from bytes for persistence.
pub trait Serializer: Send + Sync {
    /// Encode a mapping to bytes.
    fn serialize(&self, data: &Map<String, Value>) -> Result<Vec<u8>>;

    /// Decode bytes back into a mapping. Must reject top-level values that
    /// are not keyed mappings.
    fn deserialize(&self, bytes: &[u8]) -> Result<Map<String, Value>>;
}

/// JSON serializer with optional indentation.
#[derive(Clone, Default)]
pub struct JsonSerializer {
    indented: bool,
}

impl JsonSerializer {
    /// Compact JSON (single line, no extra whitespace).
    pub fn new() -> Self {
        Self::default()
    }

    /// Indented JSON — easier to read and diff by hand.
    pub fn indented() -> Self {
        Self { indented: true }
    }
}

impl Serializer for JsonSerializer {
    fn serialize(&self, data: &Map<String, Value>) -> Result<Vec<u8>> {
        let bytes = if self.indented {
            serde_json::to_vec_pretty(data)
        } else {
            serde_json::to_vec(data)
        };
        bytes.map_err(Error::from)
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<Map<String, Value>> {
        match serde_json::from_slice::<Value>(bytes)? {
            Value::Object(map) => Ok(map),
            other => Err(Error::Format(format!(
                "expected a JSON object at the top level, got {}",
                json_kind(&other)
            ))),
        }
    }
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
