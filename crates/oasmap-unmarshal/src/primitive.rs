//! Primitive pass-through.
//!
//! Scalar-typed and untyped schemas return the input as-is: no coercion and
//! no enum/format/range checks. Untyped schemas pass mappings and sequences
//! through without recursing into them.

use oasmap_core::Unmarshaled;
use serde_json::Value;

pub fn pass_through(value: &Value) -> Unmarshaled {
    Unmarshaled::from_json(value)
}
