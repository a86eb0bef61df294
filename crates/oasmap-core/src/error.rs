//! # Error Types: Mapping Failures
//!
//! Defines the single error type raised by the unmarshaling engine. All
//! errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - Every error aborts the whole transformation; there are no partial
//!   results.
//! - Every variant carries the [`ValuePath`] of the offending value.
//! - Errors are deterministic functions of (schema, value) and are never
//!   retried.

use std::fmt;

use thiserror::Error;

use crate::path::{ValueKind, ValuePath};

/// Container shape a schema demanded from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpectedKind {
    /// An object schema requires a mapping.
    Mapping,
    /// An array schema requires a sequence.
    Sequence,
}

impl fmt::Display for ExpectedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mapping => f.write_str("mapping-like value for object schema"),
            Self::Sequence => f.write_str("sequence-like value for array schema"),
        }
    }
}

/// Failure while unmarshaling a raw value against a schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// The input's dynamic shape disagrees with the resolved schema kind.
    #[error("expected {expected}, got {actual} at {path}")]
    TypeMismatch {
        /// Shape the schema required.
        expected: ExpectedKind,
        /// Shape actually found.
        actual: ValueKind,
        /// Location of the value.
        path: ValuePath,
    },

    /// Explicit or implicit null for a required, non-nullable property.
    #[error("{field} is a required value (at {path})")]
    RequiredValueMissing {
        /// Property name.
        field: String,
        /// Location of the property.
        path: ValuePath,
    },

    /// A `$ref` path that the registry does not know.
    #[error("unresolved reference '{reference}' at {path}")]
    UnresolvedReference {
        /// The reference string, e.g. `#/definitions/Location`.
        reference: String,
        /// Location of the value being unmarshaled against it.
        path: ValuePath,
    },

    /// A chain made only of references that loops back on itself.
    #[error("reference '{reference}' resolves back to itself without reaching a schema, at {path}")]
    CircularReference {
        /// First reference revisited in the chain.
        reference: String,
        /// Location of the value being unmarshaled against it.
        path: ValuePath,
    },
}

impl MappingError {
    /// Location of the value that caused the failure.
    pub fn path(&self) -> &ValuePath {
        match self {
            Self::TypeMismatch { path, .. }
            | Self::RequiredValueMissing { path, .. }
            | Self::UnresolvedReference { path, .. }
            | Self::CircularReference { path, .. } => path,
        }
    }
}
