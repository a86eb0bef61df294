//! # Model Binder
//!
//! Decides, once per object schema visit, whether the assembled mapping
//! becomes a [`oasmap_core::Record`] or stays a plain mapping. The decision
//! is a registry lookup keyed by the schema's identity, so the object
//! algorithm itself never branches on it.

use oasmap_core::{Mapping, RecordDescriptor, Unmarshaled};
use oasmap_schema::{ObjectSchema, Registry};

use crate::dispatch::Unmarshaler;

/// Output strategy for one object schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding<'r> {
    /// Return the assembled mapping.
    Plain,
    /// Construct a record of this type.
    Record(&'r RecordDescriptor),
}

impl<'r> Binding<'r> {
    /// Look up the strategy for `object`.
    ///
    /// Inline objects (no identity), identities without a descriptor, and
    /// registries with `use_models` off all bind plainly.
    pub fn for_object<R: Registry + ?Sized>(registry: &'r R, object: &ObjectSchema) -> Self {
        if !registry.config().use_models {
            return Self::Plain;
        }
        object
            .identity
            .as_ref()
            .and_then(|identity| registry.record_descriptor_for(identity))
            .map_or(Self::Plain, Self::Record)
    }

    /// Apply the strategy to an assembled mapping.
    ///
    /// With `include_missing_properties` on, every descriptor field is
    /// expected in `fields`; one that is not is filled with null and logged.
    /// With it off, absent fields stay absent in the record too.
    pub fn finish<R: Registry + ?Sized>(self, registry: &R, mut fields: Mapping) -> Unmarshaled {
        match self {
            Self::Plain => Unmarshaled::Mapping(fields),
            Self::Record(descriptor) => {
                if registry.config().include_missing_properties {
                    for name in descriptor.fields() {
                        if !fields.contains_key(name) {
                            tracing::warn!(
                                model = descriptor.name(),
                                field = name.as_str(),
                                "record field missing from assembled mapping; filling with null"
                            );
                            fields.insert(name.clone(), Unmarshaled::Null);
                        }
                    }
                }
                tracing::debug!(model = descriptor.name(), fields = fields.len(), "binding record");
                Unmarshaled::Record(registry.construct_record(descriptor, fields))
            }
        }
    }
}

impl<'r, R: Registry + ?Sized> Unmarshaler<'r, R> {
    pub(crate) fn binding_for(&self, object: &ObjectSchema) -> Binding<'r> {
        Binding::for_object(self.registry, object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oasmap_core::Record;
    use oasmap_schema::{Config, PrimitiveType, SchemaId, SchemaNode, SchemaRegistry};
    use serde_json::json;

    fn location() -> SchemaNode {
        SchemaNode::object(
            ObjectSchema::new()
                .property("longitude", SchemaNode::primitive(PrimitiveType::Number))
                .property("latitude", SchemaNode::primitive(PrimitiveType::Number)),
        )
    }

    fn registry_with_model(config: Config) -> SchemaRegistry {
        let mut registry = SchemaRegistry::new(config);
        registry.insert_definition("Location", location());
        registry.register_model("Location", "Location");
        registry
    }

    fn fields() -> Mapping {
        match Unmarshaled::from(json!({"longitude": 100.1, "latitude": 99.9})) {
            Unmarshaled::Mapping(m) => m,
            other => panic!("expected mapping, got {other:?}"),
        }
    }

    #[test]
    fn inline_objects_bind_plainly() {
        let registry = registry_with_model(Config::default());
        let inline = location();
        let binding = Binding::for_object(&registry, inline.as_object().expect("object"));
        assert_eq!(binding, Binding::Plain);
        assert!(binding.finish(&registry, fields()).as_mapping().is_some());
    }

    #[test]
    fn named_definition_with_descriptor_binds_a_record() {
        let registry = registry_with_model(Config::default());
        let object = registry
            .definition("Location")
            .and_then(SchemaNode::as_object)
            .expect("object");
        let binding = Binding::for_object(&registry, object);
        assert!(matches!(binding, Binding::Record(d) if d.name() == "Location"));

        let out = binding.finish(&registry, fields());
        let record = out.as_record().expect("record");
        assert_eq!(record.model(), "Location");
        assert_eq!(record.get("latitude").map(Unmarshaled::to_json), Some(json!(99.9)));
    }

    #[test]
    fn identity_without_descriptor_binds_plainly() {
        let registry = SchemaRegistry::default();
        let object = ObjectSchema::new().identity(SchemaId::new("Location"));
        assert_eq!(Binding::for_object(&registry, &object), Binding::Plain);
    }

    #[test]
    fn absent_fields_follow_include_missing_properties() {
        let partial = || match Unmarshaled::from(json!({"longitude": 1.5})) {
            Unmarshaled::Mapping(m) => m,
            other => panic!("expected mapping, got {other:?}"),
        };

        let registry = registry_with_model(Config::default());
        let binding = Binding::Record(registry.model("Location").expect("model"));
        let out = binding.finish(&registry, partial());
        assert_eq!(out.get("latitude"), Some(&Unmarshaled::Null));

        let registry = registry_with_model(Config {
            include_missing_properties: false,
            ..Config::default()
        });
        let binding = Binding::Record(registry.model("Location").expect("model"));
        let out = binding.finish(&registry, partial());
        assert!(out.as_record().is_some());
        assert_eq!(out.get("latitude"), None);
        assert_eq!(out.to_json(), json!({"longitude": 1.5}));
    }

    struct CountingRegistry {
        inner: SchemaRegistry,
        built: std::cell::Cell<usize>,
    }

    impl Registry for CountingRegistry {
        fn resolve_reference(&self, reference: &str) -> Option<&SchemaNode> {
            self.inner.resolve_reference(reference)
        }

        fn record_descriptor_for(&self, identity: &SchemaId) -> Option<&RecordDescriptor> {
            self.inner.record_descriptor_for(identity)
        }

        fn construct_record(&self, descriptor: &RecordDescriptor, fields: Mapping) -> Record {
            self.built.set(self.built.get() + 1);
            Record::from_fields(descriptor, fields)
        }

        fn config(&self) -> &Config {
            self.inner.config()
        }
    }

    #[test]
    fn records_are_built_through_the_registry() {
        let registry = CountingRegistry {
            inner: registry_with_model(Config::default()),
            built: std::cell::Cell::new(0),
        };
        let object = registry
            .inner
            .definition("Location")
            .and_then(SchemaNode::as_object)
            .expect("object");
        Binding::for_object(&registry, object).finish(&registry, fields());
        assert_eq!(registry.built.get(), 1);
    }
}
