//! # oasmap-unmarshal: Schema-Driven Unmarshaling
//!
//! Walks a raw `serde_json::Value` against a [`SchemaNode`] and produces an
//! [`Unmarshaled`] output tree: object branches are bound against their
//! declared properties, array branches are transformed element-wise, and
//! leaves pass through unchanged. Objects of named definitions that carry a
//! record type come back as [`oasmap_core::Record`]s.
//!
//! ## Pipeline
//!
//! ```text
//! dispatch ──► resolve ($ref chain) ──► null gate ──┬─► object ──► binder
//!    ▲                                              ├─► array
//!    └──────────── per property / item ─────────────┴─► pass-through
//! ```
//!
//! ## Guarantees
//!
//! - Schema and registry are only read. The input value is only read.
//! - References are resolved lazily on every visit, so self-referencing
//!   definitions terminate as soon as the data runs out.
//! - The first [`MappingError`] aborts the whole call; there is no partial
//!   output.
//! - No global state: every call is reentrant and a registry can serve many
//!   threads at once.

mod array;
mod binder;
mod dispatch;
mod gate;
mod object;
mod primitive;
mod resolve;

pub use binder::Binding;
pub use dispatch::Unmarshaler;
pub use gate::{null_gate, Gate};
pub use primitive::pass_through;
pub use resolve::{resolve, Concrete, Resolved};

use oasmap_core::{MappingError, Unmarshaled};
use oasmap_schema::{ArraySchema, ObjectSchema, Registry, SchemaNode};
use serde_json::Value;

/// Unmarshal `value` against `schema`.
///
/// This is the sole entry point most callers need. The top-level value is
/// never "required": a null input yields `Unmarshaled::Null`.
///
/// # Errors
///
/// See [`MappingError`]; every variant carries the path of the offending
/// value.
pub fn unmarshal<R: Registry + ?Sized>(
    registry: &R,
    schema: &SchemaNode,
    value: &Value,
) -> Result<Unmarshaled, MappingError> {
    Unmarshaler::new(registry).unmarshal(schema, value)
}

/// Unmarshal `value` as an instance of an object schema.
pub fn unmarshal_object<R: Registry + ?Sized>(
    registry: &R,
    object: &ObjectSchema,
    value: &Value,
) -> Result<Unmarshaled, MappingError> {
    Unmarshaler::new(registry).unmarshal_object(object, value)
}

/// Unmarshal `value` as an instance of an array schema.
pub fn unmarshal_array<R: Registry + ?Sized>(
    registry: &R,
    array: &ArraySchema,
    value: &Value,
) -> Result<Unmarshaled, MappingError> {
    Unmarshaler::new(registry).unmarshal_array(array, value)
}
