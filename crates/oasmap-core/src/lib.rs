//! # oasmap-core: Foundational Types for Schema-Driven Unmarshaling
//!
//! This crate is the leaf of the oasmap workspace. It defines the value
//! and error primitives shared by the schema registry (`oasmap-schema`) and
//! the unmarshaling engine (`oasmap-unmarshal`); it depends on nothing
//! internal.
//!
//! ## Key Design Principles
//!
//! 1. **One error type for the engine.** [`MappingError`] is a closed enum.
//!    Every variant carries the [`ValuePath`] from the root of the input
//!    tree to the offending value, so a failure deep inside a nested
//!    payload can be located without re-walking it.
//!
//! 2. **A dedicated output tree.** [`Unmarshaled`] mirrors
//!    `serde_json::Value` but adds a [`Record`] variant. The same traversal
//!    yields a plain mapping or a typed record depending on registry state,
//!    and callers match on the result instead of inspecting it at runtime.
//!
//! 3. **Records are immutable.** A [`Record`] is built once from a
//!    [`RecordDescriptor`] and a field mapping; fields keep descriptor order.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `oasmap-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod path;
pub mod record;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use error::{ExpectedKind, MappingError};
pub use path::{PathSegment, ValuePath, ValueKind};
pub use record::{Record, RecordDescriptor};
pub use value::{Mapping, Unmarshaled};
