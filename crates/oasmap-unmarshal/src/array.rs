//! Array unmarshaling: element-wise, order- and length-preserving.

use oasmap_core::{ExpectedKind, MappingError, Unmarshaled, ValueKind, ValuePath};
use oasmap_schema::{ArraySchema, Registry};
use serde_json::Value;

use crate::dispatch::Unmarshaler;

impl<'r, R: Registry + ?Sized> Unmarshaler<'r, R> {
    /// Array elements are never required; a null element only meets the
    /// item schema's own `nullable` flag, which accepts it either way.
    pub(crate) fn unmarshal_items(
        &self,
        array: &ArraySchema,
        value: &Value,
        path: &ValuePath,
    ) -> Result<Unmarshaled, MappingError> {
        let Value::Array(items) = value else {
            return Err(MappingError::TypeMismatch {
                expected: ExpectedKind::Sequence,
                actual: ValueKind::of(value),
                path: path.clone(),
            });
        };

        items
            .iter()
            .enumerate()
            .map(|(i, item)| self.dispatch(&array.items, item, false, &path.index(i)))
            .collect::<Result<Vec<_>, _>>()
            .map(Unmarshaled::Sequence)
    }
}
