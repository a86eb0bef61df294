//! # Schema Registry
//!
//! The [`Registry`] trait is the lookup contract consumed by the engine.
//! [`SchemaRegistry`] implements it over named definitions keyed by their
//! reference path (`#/definitions/<Name>`).
//!
//! ## Thread Safety
//!
//! `SchemaRegistry` is `Send + Sync` and immutable once built. Any number
//! of transformations may read one concurrently without synchronization.
//! Population happens before the registry is shared.

use std::collections::HashMap;

use oasmap_core::{Mapping, Record, RecordDescriptor};

use crate::config::Config;
use crate::ingest::DEFINITIONS_PREFIX;
use crate::node::{SchemaId, SchemaKind, SchemaNode};

/// Read-only context for one or more transformations.
pub trait Registry {
    /// Look up the node a reference path designates.
    fn resolve_reference(&self, reference: &str) -> Option<&SchemaNode>;

    /// Record type bound to an object schema identity, if any.
    fn record_descriptor_for(&self, identity: &SchemaId) -> Option<&RecordDescriptor>;

    /// Build a record instance from an assembled field mapping.
    fn construct_record(&self, descriptor: &RecordDescriptor, fields: Mapping) -> Record {
        Record::from_fields(descriptor, fields)
    }

    fn config(&self) -> &Config;
}

/// Registry of named definitions and the record types generated for them.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    /// Reference path → definition node.
    definitions: HashMap<String, SchemaNode>,
    /// Definition identity → record type.
    descriptors: HashMap<SchemaId, RecordDescriptor>,
    config: Config,
}

impl SchemaRegistry {
    /// An empty registry with the given configuration.
    pub fn new(config: Config) -> Self {
        Self {
            definitions: HashMap::new(),
            descriptors: HashMap::new(),
            config,
        }
    }

    /// Reference path of a named definition.
    pub fn reference_for(name: &str) -> String {
        format!("{DEFINITIONS_PREFIX}{name}")
    }

    /// Register a named definition.
    ///
    /// Object definitions without an identity are stamped with
    /// `SchemaId(name)`, which is what makes them eligible for a record
    /// type. Returns the reference path the definition is reachable under.
    pub fn insert_definition(&mut self, name: &str, mut node: SchemaNode) -> String {
        if let SchemaKind::Object(object) = &mut node.kind {
            if object.identity.is_none() {
                object.identity = Some(SchemaId::new(name));
            }
        }
        let reference = Self::reference_for(name);
        self.definitions.insert(reference.clone(), node);
        reference
    }

    /// Generate a record type for the named object definition.
    ///
    /// Returns `false` (and registers nothing) when models are disabled,
    /// the definition is unknown, or it is not an object.
    pub fn register_model(&mut self, definition: &str, model_name: &str) -> bool {
        if !self.config.use_models {
            return false;
        }
        let Some(object) = self
            .definitions
            .get(&Self::reference_for(definition))
            .and_then(SchemaNode::as_object)
        else {
            tracing::debug!(definition, "no object definition to build a model for");
            return false;
        };
        let Some(identity) = object.identity.clone() else {
            return false;
        };

        let descriptor = RecordDescriptor::new(model_name, object.property_names());
        tracing::debug!(
            definition,
            model = model_name,
            fields = descriptor.fields().len(),
            "registered model"
        );
        self.descriptors.insert(identity, descriptor);
        true
    }

    /// Definition registered under `name`, e.g. `Location`.
    pub fn definition(&self, name: &str) -> Option<&SchemaNode> {
        self.definitions.get(&Self::reference_for(name))
    }

    /// Names of all definitions, sorted alphabetically.
    pub fn definition_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .definitions
            .keys()
            .filter_map(|r| r.strip_prefix(DEFINITIONS_PREFIX))
            .collect();
        names.sort();
        names
    }

    /// Names of all generated record types, sorted alphabetically.
    pub fn model_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.descriptors.values().map(RecordDescriptor::name).collect();
        names.sort();
        names
    }

    /// Record type generated for the named definition, if any.
    pub fn model(&self, definition: &str) -> Option<&RecordDescriptor> {
        self.descriptors.get(&SchemaId::new(definition))
    }
}

impl Registry for SchemaRegistry {
    fn resolve_reference(&self, reference: &str) -> Option<&SchemaNode> {
        self.definitions.get(reference)
    }

    fn record_descriptor_for(&self, identity: &SchemaId) -> Option<&RecordDescriptor> {
        self.descriptors.get(identity)
    }

    fn config(&self) -> &Config {
        &self.config
    }
}
