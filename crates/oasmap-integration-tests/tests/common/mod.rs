//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::Once;

use oasmap_schema::{parse_schema, Config, ObjectSchema, SchemaNode, SchemaRegistry};
use serde_json::{json, Value};

static TRACING: Once = Once::new();

/// Install a test-writer subscriber once per test binary. Filter with
/// `RUST_LOG`, e.g. `RUST_LOG=oasmap_unmarshal=trace`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A Swagger document with no paths and no definitions.
pub fn minimal_swagger_dict() -> Value {
    json!({
        "swagger": "2.0",
        "info": {"title": "Test", "version": "1.0"},
        "paths": {},
        "definitions": {}
    })
}

pub fn empty_registry() -> SchemaRegistry {
    SchemaRegistry::from_document(&minimal_swagger_dict()).expect("empty registry")
}

/// Registry holding the self-referencing `Node` definition.
pub fn recursive_registry() -> SchemaRegistry {
    let mut document = minimal_swagger_dict();
    document["definitions"]["Node"] = json!({
        "type": "object",
        "properties": {
            "name": {"type": "string"},
            "child": {"$ref": "#/definitions/Node", "x-nullable": true}
        }
    });
    SchemaRegistry::from_document(&document).expect("recursive registry")
}

pub fn address_spec() -> Value {
    json!({
        "type": "object",
        "properties": {
            "number": {"type": "number"},
            "street_name": {"type": "string"},
            "street_type": {
                "type": "string",
                "enum": ["Street", "Avenue", "Boulevard"]
            }
        }
    })
}

pub fn location_spec() -> Value {
    json!({
        "type": "object",
        "required": ["longitude", "latitude"],
        "properties": {
            "longitude": {"type": "number"},
            "latitude": {"type": "number"}
        }
    })
}

pub fn address() -> Value {
    json!({
        "number": 1600,
        "street_name": "Ümlaut",
        "street_type": "Avenue"
    })
}

pub fn parse(schema: &Value) -> SchemaNode {
    parse_schema(schema, &Config::default()).expect("schema")
}

pub fn parse_object(schema: &Value) -> ObjectSchema {
    parse(schema).as_object().cloned().expect("object schema")
}

/// Object schema with a single property `x` of the given type.
pub fn nullable_spec(required: bool, nullable: bool, property_type: &str) -> ObjectSchema {
    let mut x = json!({"type": property_type, "x-nullable": nullable});
    if property_type == "array" {
        x["items"] = json!({"type": "string"});
    }
    let required: Vec<&str> = if required { vec!["x"] } else { Vec::new() };
    parse_object(&json!({
        "type": "object",
        "required": required,
        "properties": {"x": x}
    }))
}
