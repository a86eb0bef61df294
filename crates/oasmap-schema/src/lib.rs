//! # oasmap-schema: Schema Model & Registry
//!
//! Holds everything the unmarshaling engine reads but never writes.
//!
//! ## Schema Model (`node`)
//!
//! [`SchemaNode`] is a closed sum type over the structural schema kinds
//! (reference, object, array, primitive, untyped) plus a `nullable` flag.
//! The engine matches on [`SchemaKind`] exhaustively, so adding a kind is a
//! compile-time decision point.
//!
//! ## Registry (`registry`)
//!
//! The [`Registry`] trait is the lookup contract the engine consumes:
//! reference resolution, record descriptor lookup, record construction, and
//! configuration. [`SchemaRegistry`] is the concrete, immutable
//! implementation.
//!
//! ## Ingestion (`ingest`)
//!
//! Builds a [`SchemaRegistry`] from a Swagger 2.0 document held in memory
//! (JSON value, JSON text, or YAML text) and decides which named
//! definitions acquire a record type. No constraint validation (enum,
//! pattern, numeric range) happens here or anywhere else in the workspace.
//!
//! ## Crate Policy
//!
//! - Depends only on `oasmap-core` internally.
//! - Registries are immutable once built and are `Send + Sync`.
//! - Ingestion failures are reported with the JSON Pointer of the offending
//!   schema fragment.

pub mod config;
pub mod error;
pub mod ingest;
pub mod node;
pub mod registry;

pub use config::Config;
pub use error::SchemaError;
pub use ingest::{parse_schema, DEFINITIONS_PREFIX};
pub use node::{
    AdditionalPolicy, ArraySchema, ObjectSchema, PrimitiveType, SchemaId, SchemaKind, SchemaNode,
};
pub use registry::{Registry, SchemaRegistry};
