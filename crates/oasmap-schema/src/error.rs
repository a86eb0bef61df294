//! Errors raised while ingesting a schema document or configuration.

use thiserror::Error;

/// Error during schema ingestion.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The document as a whole has the wrong shape.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// A schema fragment could not be interpreted.
    #[error("invalid schema at '{pointer}': {reason}")]
    InvalidSchema {
        /// JSON Pointer to the fragment inside the document.
        pointer: String,
        /// Reason the fragment was rejected.
        reason: String,
    },

    /// The engine configuration could not be read.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON text could not be parsed.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML text could not be parsed.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl SchemaError {
    pub(crate) fn invalid(pointer: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSchema {
            pointer: pointer.to_string(),
            reason: reason.into(),
        }
    }
}
