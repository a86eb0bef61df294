//! Reference resolution.
//!
//! Follows a chain of `$ref` nodes through the registry until a concrete
//! schema is reached. Nothing is cached: every visit re-resolves, which is
//! what lets a self-referencing definition be walked to whatever depth the
//! data has.

use oasmap_core::{MappingError, ValuePath};
use oasmap_schema::{ArraySchema, ObjectSchema, PrimitiveType, Registry, SchemaKind, SchemaNode};

/// A schema kind that is not a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Concrete<'a> {
    Object(&'a ObjectSchema),
    Array(&'a ArraySchema),
    Primitive(PrimitiveType),
    Untyped,
}

/// Outcome of resolving a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<'a> {
    pub concrete: Concrete<'a>,
    /// `nullable` of the concrete node OR-ed with every reference on the
    /// way to it.
    pub nullable: bool,
}

/// Resolve `node` to a concrete schema.
///
/// `path` only labels errors.
///
/// # Errors
///
/// - [`MappingError::UnresolvedReference`] if a reference is not in the
///   registry.
/// - [`MappingError::CircularReference`] if the chain revisits a reference
///   before reaching a concrete node.
pub fn resolve<'a, R: Registry + ?Sized>(
    registry: &'a R,
    node: &'a SchemaNode,
    path: &ValuePath,
) -> Result<Resolved<'a>, MappingError> {
    let mut current = node;
    let mut nullable = node.nullable;
    let mut chain: Vec<&'a str> = Vec::new();

    loop {
        let concrete = match &current.kind {
            SchemaKind::Reference(reference) => {
                if chain.contains(&reference.as_str()) {
                    return Err(MappingError::CircularReference {
                        reference: reference.clone(),
                        path: path.clone(),
                    });
                }
                chain.push(reference);
                current = registry.resolve_reference(reference).ok_or_else(|| {
                    MappingError::UnresolvedReference {
                        reference: reference.clone(),
                        path: path.clone(),
                    }
                })?;
                nullable |= current.nullable;
                continue;
            }
            SchemaKind::Object(object) => Concrete::Object(object),
            SchemaKind::Array(array) => Concrete::Array(array),
            SchemaKind::Primitive(ty) => Concrete::Primitive(*ty),
            SchemaKind::Untyped => Concrete::Untyped,
        };
        return Ok(Resolved { concrete, nullable });
    }
}
