//! # Object Unmarshaling
//!
//! 1. Every declared property is dispatched against its schema. Absent
//!    properties are dispatched as null, which reintroduces them in the
//!    output and lets the gate reject a missing required, non-nullable
//!    property. With `include_missing_properties` off they are skipped.
//! 2. Undeclared keys follow the additional-properties policy: dropped,
//!    copied verbatim, or dispatched against the catch-all schema.
//! 3. The assembled mapping goes through the model binder.

use oasmap_core::{ExpectedKind, Mapping, MappingError, Unmarshaled, ValueKind, ValuePath};
use oasmap_schema::{AdditionalPolicy, ObjectSchema, Registry};
use serde_json::Value;

use crate::dispatch::Unmarshaler;

/// Stand-in for absent properties.
static ABSENT: Value = Value::Null;

impl<'r, R: Registry + ?Sized> Unmarshaler<'r, R> {
    pub(crate) fn unmarshal_properties(
        &self,
        object: &ObjectSchema,
        value: &Value,
        path: &ValuePath,
    ) -> Result<Unmarshaled, MappingError> {
        let Value::Object(input) = value else {
            return Err(MappingError::TypeMismatch {
                expected: ExpectedKind::Mapping,
                actual: ValueKind::of(value),
                path: path.clone(),
            });
        };

        let binding = self.binding_for(object);
        let include_missing = self.registry.config().include_missing_properties;
        let mut result = Mapping::new();

        for (name, schema) in &object.properties {
            let raw = match input.get(name) {
                Some(raw) => raw,
                None if include_missing => &ABSENT,
                None => continue,
            };
            let output = self.dispatch(schema, raw, object.is_required(name), &path.key(name))?;
            result.insert(name.clone(), output);
        }

        for (key, raw) in input {
            if object.declares(key) {
                continue;
            }
            match &object.additional {
                AdditionalPolicy::Forbidden => {
                    tracing::debug!(%path, key = key.as_str(), "dropping undeclared property");
                }
                AdditionalPolicy::Allowed => {
                    result.insert(key.clone(), Unmarshaled::from_json(raw));
                }
                AdditionalPolicy::Typed(schema) => {
                    let output = self.dispatch(schema, raw, false, &path.key(key))?;
                    result.insert(key.clone(), output);
                }
            }
        }

        Ok(binding.finish(self.registry, result))
    }
}
