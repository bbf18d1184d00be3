//! JSON interchange for trace maps
//!
//! Trace maps can be loaded from JSON documents, which is how the CLI takes
//! its specification. Reserved keys carry the markers; every other key is a
//! child property path:
//!
//! ```json
//! {
//!   "console": {
//!     "log": { "$call": { "level": "warn" } }
//!   },
//!   "some-module": { "$esm": true, "helper": { "$read": true } }
//! }
//! ```

use super::TraceMap;
use crate::error::{Error, Result};
use serde_json::Value;

const KEY_READ: &str = "$read";
const KEY_CALL: &str = "$call";
const KEY_CONSTRUCT: &str = "$construct";
const KEY_ESM: &str = "$esm";

impl TraceMap<Value> {
    /// Build a trace map from a JSON object, treating the reserved
    /// `$read`/`$call`/`$construct`/`$esm` keys as markers
    pub fn from_json(value: &Value) -> Result<Self> {
        let Value::Object(object) = value else {
            return Err(Error::trace_map(format!(
                "expected a JSON object, got {}",
                json_type_name(value)
            )));
        };

        let mut map = TraceMap::new();
        for (key, child) in object {
            match key.as_str() {
                KEY_READ => map.read = Some(child.clone()),
                KEY_CALL => map.call = Some(child.clone()),
                KEY_CONSTRUCT => map.construct = Some(child.clone()),
                KEY_ESM => {
                    map.esm = child.as_bool().ok_or_else(|| {
                        Error::trace_map(format!(
                            "\"$esm\" must be a boolean, got {}",
                            json_type_name(child)
                        ))
                    })?;
                }
                _ => {
                    let parsed = TraceMap::from_json(child).map_err(|err| match err {
                        Error::TraceMap { message } => {
                            Error::trace_map(format!("in \"{key}\": {message}"))
                        }
                        other => other,
                    })?;
                    map.children.insert(key.clone(), parsed);
                }
            }
        }
        Ok(map)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
