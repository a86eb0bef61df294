//! Null/required gate.
//!
//! | value    | nullable | required | outcome                  |
//! |----------|----------|----------|--------------------------|
//! | non-null | any      | any      | proceed                  |
//! | null     | true     | any      | null                     |
//! | null     | false    | false    | null                     |
//! | null     | false    | true     | `RequiredValueMissing`   |
//!
//! Absent properties reach the gate as null. `required` belongs to the
//! parent object's required set and is always false at the top level and
//! for array items.

use oasmap_core::{MappingError, ValuePath};
use serde_json::Value;

/// What the dispatcher should do with a value after gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Dispatch on the schema kind.
    Proceed,
    /// Emit null and stop.
    Null,
}

/// Gate `value` on the resolved schema's `nullable` flag and the parent's
/// `required` flag.
///
/// # Errors
///
/// [`MappingError::RequiredValueMissing`] for a null value on a required,
/// non-nullable property; `field` is the last segment of `path`.
pub fn null_gate(
    value: &Value,
    nullable: bool,
    required: bool,
    path: &ValuePath,
) -> Result<Gate, MappingError> {
    if !value.is_null() {
        return Ok(Gate::Proceed);
    }
    if nullable || !required {
        return Ok(Gate::Null);
    }
    Err(MappingError::RequiredValueMissing {
        field: path.field_name(),
        path: path.clone(),
    })
}
