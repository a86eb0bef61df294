//! # Engine Configuration
//!
//! Per-registry switches that change how ingestion builds the registry and
//! how the engine assembles objects. Read from a JSON or YAML mapping;
//! absent keys take their defaults and unknown keys are tolerated with a
//! warning, so a configuration shared with other layers (validation,
//! transport) can be passed in unchanged.

use serde::Deserialize;
use serde_json::Value;

use crate::error::SchemaError;

const KNOWN_KEYS: &[&str] = &[
    "use_models",
    "include_missing_properties",
    "default_type_to_object",
];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Bind objects of named definitions to record types. When off, no
    /// record descriptors are built and every object unmarshals to a plain
    /// mapping.
    pub use_models: bool,
    /// Reintroduce declared-but-absent properties as null. When off, absent
    /// properties are left out of the output and skip the null gate.
    pub include_missing_properties: bool,
    /// Treat schemas without a `type` as objects instead of passing values
    /// through.
    pub default_type_to_object: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            use_models: true,
            include_missing_properties: true,
            default_type_to_object: false,
        }
    }
}

impl Config {
    /// Read a configuration mapping.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidConfig`] if `value` is not a mapping or
    /// a known key holds a value of the wrong type.
    pub fn from_value(value: &Value) -> Result<Self, SchemaError> {
        let Value::Object(entries) = value else {
            return Err(SchemaError::InvalidConfig(format!(
                "expected a mapping, got {value}"
            )));
        };

        for key in entries.keys() {
            if !KNOWN_KEYS.contains(&key.as_str()) {
                tracing::warn!(key = key.as_str(), "ignoring unknown configuration key");
            }
        }

        Config::deserialize(value).map_err(|e| SchemaError::InvalidConfig(e.to_string()))
    }

    /// Read a configuration mapping from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, SchemaError> {
        let value: Value = serde_yaml::from_str(text)?;
        Self::from_value(&value)
    }
}
