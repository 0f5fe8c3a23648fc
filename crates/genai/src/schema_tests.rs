// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::SchemaContractError;
use serde_json::json;

fn expect_error(schema: serde_json::Value) -> SchemaContractError {
    validate_response_schema(&schema).unwrap_err()
}

#[test]
fn accepts_a_valid_nested_contract() {
    let schema = json!({
        "type": "object",
        "title": "Report",
        "required": ["meta", "entries"],
        "properties": {
            "meta": {
                "type": "object",
                "properties": {
                    "language": { "type": "string", "description": "ISO 639-1 code" },
                    "pageCount": { "type": "integer", "minimum": 1, "nullable": true }
                }
            },
            "entries": {
                "type": "array",
                "minItems": 1,
                "items": {
                    "type": "object",
                    "properties": {
                        "label": { "type": "string" },
                        "difficulty": { "type": "string", "enum": ["easy", "medium", "hard"] }
                    },
                    "propertyOrdering": ["label", "difficulty"]
                }
            }
        }
    });
    validate_response_schema(&schema).unwrap();
}

#[yare::parameterized(
    ref_key        = { "$ref" },
    one_of         = { "oneOf" },
    additional     = { "additionalProperties" },
    schema_marker  = { "$schema" },
    conditional    = { "if" },
)]
fn rejects_blocked_keys_at_top_level(key: &str) {
    let err = expect_error(json!({ "type": "object", key: true }));
    assert_eq!(err.path, format!("responseSchema.{key}"));
    assert!(err.message.contains("not supported"));
}

#[test]
fn rejects_blocked_key_at_depth_with_precise_path() {
    let err = expect_error(json!({
        "type": "object",
        "properties": {
            "meta": {
                "type": "object",
                "properties": {
                    "source": { "$ref": "#/defs/source" }
                }
            }
        }
    }));
    assert_eq!(
        err.path,
        "responseSchema.properties.meta.properties.source.$ref"
    );
}

#[test]
fn rejects_unknown_keys() {
    let err = expect_error(json!({ "type": "string", "pattern": "^a+$" }));
    assert_eq!(err.path, "responseSchema.pattern");
    assert!(err.message.contains("supported schema subset"));
}

#[test]
fn rejects_type_unions() {
    let err = expect_error(json!({ "type": ["string", "null"] }));
    assert_eq!(err.path, "responseSchema.type");
    assert!(err.message.contains("nullable"));
}

#[test]
fn rejects_non_boolean_nullable() {
    let err = expect_error(json!({ "type": "string", "nullable": "yes" }));
    assert_eq!(err.path, "responseSchema.nullable");
}

#[test]
fn rejects_non_string_enum_entries() {
    let err = expect_error(json!({ "type": "integer", "enum": [1, 2, 3] }));
    assert_eq!(err.path, "responseSchema.enum");
}

#[test]
fn rejects_tuple_style_items() {
    let err = expect_error(json!({
        "type": "array",
        "items": [{ "type": "string" }, { "type": "integer" }]
    }));
    assert_eq!(err.path, "responseSchema.items");
    assert!(err.message.contains("single schema object"));
}

#[test]
fn rejects_invalid_items_schema_recursively() {
    let err = expect_error(json!({
        "type": "array",
        "items": { "type": "object", "oneOf": [] }
    }));
    assert_eq!(err.path, "responseSchema.items.oneOf");
}

#[test]
fn validates_any_of_variants_with_indexed_paths() {
    let err = expect_error(json!({
        "anyOf": [
            { "type": "string" },
            { "type": "object", "$defs": {} }
        ]
    }));
    assert_eq!(err.path, "responseSchema.anyOf[1].$defs");
}

#[test]
fn rejects_non_array_any_of() {
    let err = expect_error(json!({ "anyOf": { "type": "string" } }));
    assert_eq!(err.path, "responseSchema.anyOf");
}

#[test]
fn rejects_non_object_root() {
    let err = validate_response_schema(&json!("just a string")).unwrap_err();
    assert_eq!(err.path, "responseSchema");
}

#[test]
fn rejects_non_object_properties_map() {
    let err = expect_error(json!({ "type": "object", "properties": [] }));
    assert_eq!(err.path, "responseSchema.properties");
}
