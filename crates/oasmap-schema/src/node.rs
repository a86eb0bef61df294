//! # Schema Nodes
//!
//! In-memory form of one schema fragment. Nodes are built once by ingestion
//! (or directly by callers) and never mutated afterwards.
//!
//! ## Invariants
//!
//! - A [`SchemaKind::Reference`] carries only its target path and the
//!   node-level `nullable` flag.
//! - Reference cycles are legal. Nodes hold reference *strings*, not
//!   pointers, so a self-referencing definition is an ordinary finite value
//!   and is only expanded lazily while data is being walked.
//! - Only object nodes created from a named definition carry a
//!   [`SchemaId`]; inline object schemas have none and never bind to a
//!   record type.

use std::collections::BTreeSet;
use std::fmt;

/// Identity of a named object definition, e.g. `Location`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaId(String);

impl SchemaId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SchemaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Declared scalar type of a primitive schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    String,
    Number,
    Integer,
    Boolean,
    File,
}

impl PrimitiveType {
    /// Parse a Swagger `type` keyword. Returns `None` for container types
    /// and unknown names.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(Self::String),
            "number" => Some(Self::Number),
            "integer" => Some(Self::Integer),
            "boolean" => Some(Self::Boolean),
            "file" => Some(Self::File),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::File => "file",
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule for mapping keys an object schema does not declare.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AdditionalPolicy {
    /// Undeclared keys are dropped from the output.
    Forbidden,
    /// Undeclared keys are copied verbatim.
    #[default]
    Allowed,
    /// Undeclared keys are unmarshaled against a catch-all schema.
    Typed(Box<SchemaNode>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectSchema {
    /// Set for named definitions only.
    pub identity: Option<SchemaId>,
    /// Declared properties in declaration order.
    pub properties: Vec<(String, SchemaNode)>,
    pub required: BTreeSet<String>,
    pub additional: AdditionalPolicy,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: declare a property. Redeclaring a name replaces it in place.
    pub fn property(mut self, name: impl Into<String>, schema: SchemaNode) -> Self {
        let name = name.into();
        match self.properties.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = schema,
            None => self.properties.push((name, schema)),
        }
        self
    }

    /// Builder: mark a property as required.
    pub fn require(mut self, name: impl Into<String>) -> Self {
        self.required.insert(name.into());
        self
    }

    /// Builder: set the additional-properties policy.
    pub fn additional(mut self, policy: AdditionalPolicy) -> Self {
        self.additional = policy;
        self
    }

    /// Builder: attach a definition identity.
    pub fn identity(mut self, id: SchemaId) -> Self {
        self.identity = Some(id);
        self
    }

    pub fn get_property(&self, name: &str) -> Option<&SchemaNode> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, schema)| schema)
    }

    pub fn declares(&self, name: &str) -> bool {
        self.get_property(name).is_some()
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.contains(name)
    }

    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|(n, _)| n.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArraySchema {
    pub items: Box<SchemaNode>,
}

/// Structural kind of a schema node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaKind {
    /// Indirection to a named definition, e.g. `#/definitions/Node`.
    Reference(String),
    Object(ObjectSchema),
    Array(ArraySchema),
    Primitive(PrimitiveType),
    /// No declared type; values pass through without recursion.
    Untyped,
}

/// One schema fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaNode {
    pub kind: SchemaKind,
    /// Explicit opt-in to null values (`x-nullable`).
    pub nullable: bool,
}

impl SchemaNode {
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            nullable: false,
        }
    }

    pub fn reference(path: impl Into<String>) -> Self {
        Self::new(SchemaKind::Reference(path.into()))
    }

    pub fn object(schema: ObjectSchema) -> Self {
        Self::new(SchemaKind::Object(schema))
    }

    pub fn array(items: SchemaNode) -> Self {
        Self::new(SchemaKind::Array(ArraySchema {
            items: Box::new(items),
        }))
    }

    pub fn primitive(ty: PrimitiveType) -> Self {
        Self::new(SchemaKind::Primitive(ty))
    }

    pub fn untyped() -> Self {
        Self::new(SchemaKind::Untyped)
    }

    /// Builder: set the `nullable` flag.
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn as_object(&self) -> Option<&ObjectSchema> {
        match &self.kind {
            SchemaKind::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<&str> {
        match &self.kind {
            SchemaKind::Reference(path) => Some(path),
            _ => None,
        }
    }

    /// Short name of the structural kind, for logs.
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            SchemaKind::Reference(_) => "reference",
            SchemaKind::Object(_) => "object",
            SchemaKind::Array(_) => "array",
            SchemaKind::Primitive(ty) => ty.as_str(),
            SchemaKind::Untyped => "untyped",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_type_names_round_trip() {
        for ty in [
            PrimitiveType::String,
            PrimitiveType::Number,
            PrimitiveType::Integer,
            PrimitiveType::Boolean,
            PrimitiveType::File,
        ] {
            assert_eq!(PrimitiveType::from_name(ty.as_str()), Some(ty));
        }
        assert_eq!(PrimitiveType::from_name("object"), None);
        assert_eq!(PrimitiveType::from_name("array"), None);
        assert_eq!(PrimitiveType::from_name("date"), None);
    }

    #[test]
    fn object_builder_keeps_declaration_order() {
        let schema = ObjectSchema::new()
            .property("number", SchemaNode::primitive(PrimitiveType::Number))
            .property("street_name", SchemaNode::primitive(PrimitiveType::String))
            .property("street_type", SchemaNode::primitive(PrimitiveType::String))
            .require("number");

        let names: Vec<&str> = schema.property_names().collect();
        assert_eq!(names, ["number", "street_name", "street_type"]);
        assert!(schema.is_required("number"));
        assert!(!schema.is_required("street_name"));
        assert!(schema.declares("street_type"));
        assert!(!schema.declares("city"));
        assert_eq!(schema.additional, AdditionalPolicy::Allowed);
        assert!(schema.identity.is_none());
    }

    #[test]
    fn redeclaring_a_property_replaces_it_in_place() {
        let schema = ObjectSchema::new()
            .property("a", SchemaNode::untyped())
            .property("b", SchemaNode::untyped())
            .property("a", SchemaNode::primitive(PrimitiveType::Integer));

        let names: Vec<&str> = schema.property_names().collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(
            schema.get_property("a"),
            Some(&SchemaNode::primitive(PrimitiveType::Integer))
        );
    }

    #[test]
    fn nodes_default_to_not_nullable() {
        let node = SchemaNode::reference("#/definitions/Node");
        assert!(!node.nullable);
        assert_eq!(node.as_reference(), Some("#/definitions/Node"));
        assert!(node.clone().with_nullable(true).nullable);
        assert_eq!(node.kind_name(), "reference");
        assert_eq!(SchemaNode::untyped().kind_name(), "untyped");
        assert_eq!(
            SchemaNode::primitive(PrimitiveType::Boolean).kind_name(),
            "boolean"
        );
    }
}
