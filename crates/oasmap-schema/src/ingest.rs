//! # Swagger Definition Ingestion
//!
//! Turns a Swagger 2.0 document held in memory into a [`SchemaRegistry`].
//!
//! ## Parsing Rules
//!
//! | Fragment | Node |
//! |---|---|
//! | `{"$ref": "..."}` | `Reference` (sibling `x-nullable` honoured, other keys ignored) |
//! | `type: object` | `Object`; `additionalProperties` absent/`true` → `Allowed`, `false` → `Forbidden`, schema → `Typed` |
//! | `type: array` | `Array`; missing `items` → untyped items |
//! | `type: string/number/integer/boolean/file` | `Primitive` |
//! | no `type` | `Untyped`, or `Object` when `default_type_to_object` is set |
//!
//! `x-nullable` (Swagger) and `nullable` (OpenAPI 3) both set the node's
//! `nullable` flag.
//!
//! ## Model Discovery
//!
//! A named object definition gets a record type when it is referenced from
//! `paths` or the shared `responses` and `parameters` sections, directly or
//! through other definitions reachable from there, or
//! when it carries an `x-model` tag (whose string value, if any, names the
//! model). Definitions only referenced by inline schemas stay plain.

use std::collections::{BTreeSet, VecDeque};

use serde_json::{Map, Value};

use crate::config::Config;
use crate::error::SchemaError;
use crate::node::{
    AdditionalPolicy, ArraySchema, ObjectSchema, PrimitiveType, SchemaKind, SchemaNode,
};
use crate::registry::SchemaRegistry;

/// Prefix of local definition references.
pub const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// Parse an inline schema fragment.
///
/// # Errors
///
/// Returns [`SchemaError::InvalidSchema`] with the JSON Pointer (relative to
/// `schema`) of the first fragment that cannot be interpreted.
pub fn parse_schema(schema: &Value, config: &Config) -> Result<SchemaNode, SchemaError> {
    parse_at(schema, "", config)
}

impl SchemaRegistry {
    /// Build a registry from a Swagger document with the default
    /// configuration.
    pub fn from_document(document: &Value) -> Result<Self, SchemaError> {
        Self::from_document_with_config(document, Config::default())
    }

    /// Build a registry from a Swagger document.
    ///
    /// Parses every entry of `definitions`, then runs model discovery.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidDocument`] if the document or its
    /// `definitions` section is not a mapping, and
    /// [`SchemaError::InvalidSchema`] for the first malformed definition.
    pub fn from_document_with_config(document: &Value, config: Config) -> Result<Self, SchemaError> {
        let Value::Object(root) = document else {
            return Err(SchemaError::InvalidDocument(
                "document root must be a mapping".to_string(),
            ));
        };
        let empty = Map::new();
        let definitions = match root.get("definitions") {
            None | Some(Value::Null) => &empty,
            Some(Value::Object(definitions)) => definitions,
            Some(_) => {
                return Err(SchemaError::InvalidDocument(
                    "'definitions' must be a mapping".to_string(),
                ))
            }
        };

        let mut registry = SchemaRegistry::new(config.clone());
        for (name, raw) in definitions {
            let pointer = format!("/definitions/{}", escape_pointer(name));
            let node = parse_at(raw, &pointer, &config)?;
            registry.insert_definition(name, node);
        }

        for (definition, model) in discover_models(root, definitions) {
            registry.register_model(&definition, &model);
        }

        tracing::debug!(
            definitions = definitions.len(),
            models = registry.model_names().len(),
            "ingested schema document"
        );
        Ok(registry)
    }

    /// Build a registry from JSON text.
    pub fn from_json_str(text: &str, config: Config) -> Result<Self, SchemaError> {
        let document: Value = serde_json::from_str(text)?;
        Self::from_document_with_config(&document, config)
    }

    /// Build a registry from YAML text.
    pub fn from_yaml_str(text: &str, config: Config) -> Result<Self, SchemaError> {
        let document: Value = serde_yaml::from_str(text)?;
        Self::from_document_with_config(&document, config)
    }
}

fn parse_at(value: &Value, pointer: &str, config: &Config) -> Result<SchemaNode, SchemaError> {
    let Value::Object(schema) = value else {
        return Err(SchemaError::invalid(pointer, "schema must be a mapping"));
    };

    let nullable = flag(schema, "x-nullable", pointer)? || flag(schema, "nullable", pointer)?;

    if let Some(reference) = schema.get("$ref") {
        let reference = reference
            .as_str()
            .ok_or_else(|| SchemaError::invalid(pointer, "'$ref' must be a string"))?;
        return Ok(SchemaNode::reference(reference).with_nullable(nullable));
    }

    let kind = match schema.get("type") {
        None if config.default_type_to_object => {
            SchemaKind::Object(parse_object(schema, pointer, config)?)
        }
        None => SchemaKind::Untyped,
        Some(Value::String(ty)) => match ty.as_str() {
            "object" => SchemaKind::Object(parse_object(schema, pointer, config)?),
            "array" => SchemaKind::Array(parse_array(schema, pointer, config)?),
            other => PrimitiveType::from_name(other)
                .map(SchemaKind::Primitive)
                .ok_or_else(|| SchemaError::invalid(pointer, format!("unsupported type '{other}'")))?,
        },
        Some(_) => return Err(SchemaError::invalid(pointer, "'type' must be a string")),
    };

    Ok(SchemaNode::new(kind).with_nullable(nullable))
}

fn parse_object(
    schema: &Map<String, Value>,
    pointer: &str,
    config: &Config,
) -> Result<ObjectSchema, SchemaError> {
    let mut object = ObjectSchema::new();

    match schema.get("properties") {
        None => {}
        Some(Value::Object(properties)) => {
            for (name, raw) in properties {
                let child = format!("{pointer}/properties/{}", escape_pointer(name));
                object = object.property(name.clone(), parse_at(raw, &child, config)?);
            }
        }
        Some(_) => return Err(SchemaError::invalid(pointer, "'properties' must be a mapping")),
    }

    match schema.get("required") {
        None => {}
        Some(Value::Array(names)) => {
            for name in names {
                let name = name.as_str().ok_or_else(|| {
                    SchemaError::invalid(pointer, "'required' entries must be strings")
                })?;
                object = object.require(name);
            }
        }
        Some(_) => return Err(SchemaError::invalid(pointer, "'required' must be a list")),
    }

    object.additional = match schema.get("additionalProperties") {
        None | Some(Value::Bool(true)) => AdditionalPolicy::Allowed,
        Some(Value::Bool(false)) => AdditionalPolicy::Forbidden,
        Some(raw @ Value::Object(_)) => {
            let child = format!("{pointer}/additionalProperties");
            AdditionalPolicy::Typed(Box::new(parse_at(raw, &child, config)?))
        }
        Some(_) => {
            return Err(SchemaError::invalid(
                pointer,
                "'additionalProperties' must be a boolean or a schema",
            ))
        }
    };

    Ok(object)
}

fn parse_array(
    schema: &Map<String, Value>,
    pointer: &str,
    config: &Config,
) -> Result<ArraySchema, SchemaError> {
    let items = match schema.get("items") {
        None => SchemaNode::untyped(),
        Some(raw @ Value::Object(_)) => parse_at(raw, &format!("{pointer}/items"), config)?,
        Some(_) => return Err(SchemaError::invalid(pointer, "'items' must be a single schema")),
    };
    Ok(ArraySchema {
        items: Box::new(items),
    })
}

fn flag(schema: &Map<String, Value>, key: &str, pointer: &str) -> Result<bool, SchemaError> {
    match schema.get(key) {
        None => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(SchemaError::invalid(pointer, format!("'{key}' must be a boolean"))),
    }
}

fn escape_pointer(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

/// Definition names referenced anywhere inside `value`.
fn collect_references(value: &Value, out: &mut BTreeSet<String>) {
    match value {
        Value::Object(map) => {
            if let Some(name) = map
                .get("$ref")
                .and_then(Value::as_str)
                .and_then(|r| r.strip_prefix(DEFINITIONS_PREFIX))
            {
                out.insert(name.to_string());
            }
            for child in map.values() {
                collect_references(child, out);
            }
        }
        Value::Array(items) => {
            for child in items {
                collect_references(child, out);
            }
        }
        _ => {}
    }
}

/// Document sections whose references seed model discovery. Shared
/// `responses` and `parameters` are reachable from operations through
/// `#/responses/...` and `#/parameters/...` references.
const ROOT_SECTIONS: &[&str] = &["paths", "responses", "parameters"];

/// `(definition, model name)` pairs that should get a record type.
fn discover_models(
    root: &Map<String, Value>,
    definitions: &Map<String, Value>,
) -> Vec<(String, String)> {
    let mut roots = BTreeSet::new();
    for section in ROOT_SECTIONS {
        if let Some(value) = root.get(*section) {
            collect_references(value, &mut roots);
        }
    }

    let mut reachable = BTreeSet::new();
    let mut queue: VecDeque<String> = roots.into_iter().collect();
    while let Some(name) = queue.pop_front() {
        if reachable.contains(&name) {
            continue;
        }
        let Some(raw) = definitions.get(&name) else {
            tracing::warn!(definition = name.as_str(), "reference to unknown definition");
            continue;
        };
        let mut nested = BTreeSet::new();
        collect_references(raw, &mut nested);
        queue.extend(nested.into_iter().filter(|n| !reachable.contains(n)));
        reachable.insert(name);
    }

    definitions
        .iter()
        .filter_map(|(name, raw)| {
            let tag = raw.get("x-model");
            if !reachable.contains(name) && tag.is_none() {
                return None;
            }
            let model = tag
                .and_then(Value::as_str)
                .unwrap_or(name.as_str())
                .to_string();
            Some((name.clone(), model))
        })
        .collect()
}
