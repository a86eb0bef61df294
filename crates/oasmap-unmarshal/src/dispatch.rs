//! # Dispatcher
//!
//! Recursive entry point. For every node of the input tree:
//!
//! 1. resolve the schema's `$ref` chain ([`resolve`]);
//! 2. apply the null/required gate ([`null_gate`]);
//! 3. route on the concrete kind: object, array, or pass-through.
//!
//! Recursion depth follows the input value, not the schema graph.

use oasmap_core::{MappingError, Unmarshaled, ValuePath};
use oasmap_schema::{ArraySchema, ObjectSchema, Registry, SchemaNode};
use serde_json::Value;

use crate::gate::{null_gate, Gate};
use crate::primitive::pass_through;
use crate::resolve::{resolve, Concrete};

/// Unmarshaler bound to one registry.
///
/// Holds nothing but a shared reference, so it is `Copy`-cheap to create
/// per call and safe to use from many threads when `R: Sync`.
#[derive(Debug)]
pub struct Unmarshaler<'r, R: Registry + ?Sized> {
    pub(crate) registry: &'r R,
}

impl<'r, R: Registry + ?Sized> Clone for Unmarshaler<'r, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'r, R: Registry + ?Sized> Copy for Unmarshaler<'r, R> {}

impl<'r, R: Registry + ?Sized> Unmarshaler<'r, R> {
    pub fn new(registry: &'r R) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r R {
        self.registry
    }

    /// Unmarshal a top-level value. The top level is never required.
    pub fn unmarshal(&self, schema: &SchemaNode, value: &Value) -> Result<Unmarshaled, MappingError> {
        self.dispatch(schema, value, false, &ValuePath::root())
    }

    /// Unmarshal a top-level value against an object schema that is already
    /// at hand. A null value yields `Null`.
    pub fn unmarshal_object(
        &self,
        object: &ObjectSchema,
        value: &Value,
    ) -> Result<Unmarshaled, MappingError> {
        let path = ValuePath::root();
        match null_gate(value, false, false, &path)? {
            Gate::Null => Ok(Unmarshaled::Null),
            Gate::Proceed => self.unmarshal_properties(object, value, &path),
        }
    }

    /// Unmarshal a top-level value against an array schema that is already
    /// at hand. A null value yields `Null`.
    pub fn unmarshal_array(
        &self,
        array: &ArraySchema,
        value: &Value,
    ) -> Result<Unmarshaled, MappingError> {
        let path = ValuePath::root();
        match null_gate(value, false, false, &path)? {
            Gate::Null => Ok(Unmarshaled::Null),
            Gate::Proceed => self.unmarshal_items(array, value, &path),
        }
    }

    pub(crate) fn dispatch(
        &self,
        schema: &SchemaNode,
        value: &Value,
        required: bool,
        path: &ValuePath,
    ) -> Result<Unmarshaled, MappingError> {
        let resolved = resolve(self.registry, schema, path)?;

        if null_gate(value, resolved.nullable, required, path)? == Gate::Null {
            tracing::trace!(
                %path,
                schema = schema.kind_name(),
                nullable = resolved.nullable,
                required,
                "null value"
            );
            return Ok(Unmarshaled::Null);
        }

        match resolved.concrete {
            Concrete::Object(object) => {
                tracing::trace!(%path, properties = object.properties.len(), "object");
                self.unmarshal_properties(object, value, path)
            }
            Concrete::Array(array) => {
                tracing::trace!(%path, "array");
                self.unmarshal_items(array, value, path)
            }
            Concrete::Primitive(_) | Concrete::Untyped => {
                tracing::trace!(%path, schema = schema.kind_name(), "pass-through");
                Ok(pass_through(value))
            }
        }
    }
}
