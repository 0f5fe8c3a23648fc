// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Validator for the restricted response-schema dialect.

use crate::error::SchemaContractError;
use serde_json::Value;

/// Keys the consuming API's schema subset accepts.
const SUPPORTED_KEYS: &[&str] = &[
    "type",
    "format",
    "description",
    "nullable",
    "enum",
    "properties",
    "required",
    "items",
    "minItems",
    "maxItems",
    "minLength",
    "maxLength",
    "minimum",
    "maximum",
    "multipleOf",
    "anyOf",
    "allOf",
    "title",
    "default",
    "examples",
    "propertyOrdering",
    "uniqueItems",
];

/// Full-JSON-Schema features the API does not support. Checked before the
/// allow-list so the error message names them as known-unsupported rather
/// than merely unrecognized.
const BLOCKED_KEYS: &[&str] = &[
    "$schema",
    "$defs",
    "$ref",
    "definitions",
    "patternProperties",
    "if",
    "then",
    "else",
    "not",
    "unevaluatedProperties",
    "additionalProperties",
    "oneOf",
];

/// Validate a response-schema contract before it is sent with a request.
///
/// Walks the document recursively and fails fast with the dotted path of
/// the first offending key. Nullability must use the `nullable` flag, not a
/// `type` union, and `items` must be a single schema, not a tuple.
pub fn validate_response_schema(schema: &Value) -> Result<(), SchemaContractError> {
    validate_node(schema, "responseSchema")
}

fn validate_node(schema: &Value, path: &str) -> Result<(), SchemaContractError> {
    let Some(object) = schema.as_object() else {
        return Err(SchemaContractError::new(
            path,
            "schema node must be an object",
        ));
    };

    for (key, value) in object {
        let key_path = format!("{path}.{key}");

        if BLOCKED_KEYS.contains(&key.as_str()) {
            return Err(SchemaContractError::new(
                key_path,
                format!("key \"{key}\" is not supported by the generative API"),
            ));
        }
        if !SUPPORTED_KEYS.contains(&key.as_str()) {
            return Err(SchemaContractError::new(
                key_path,
                format!("key \"{key}\" is not part of the supported schema subset"),
            ));
        }

        match key.as_str() {
            "type" => {
                if value.is_array() {
                    return Err(SchemaContractError::new(
                        key_path,
                        "\"type\" must be a single string; express nullability with \"nullable\": true",
                    ));
                }
                if !value.is_string() {
                    return Err(SchemaContractError::new(key_path, "\"type\" must be a string"));
                }
            }
            "nullable" => {
                if !value.is_boolean() {
                    return Err(SchemaContractError::new(
                        key_path,
                        "\"nullable\" must be a boolean",
                    ));
                }
            }
            "enum" | "required" | "propertyOrdering" => {
                let all_strings = value
                    .as_array()
                    .is_some_and(|items| items.iter().all(Value::is_string));
                if !all_strings {
                    return Err(SchemaContractError::new(
                        key_path,
                        format!("\"{key}\" must be an array of strings"),
                    ));
                }
            }
            "items" => {
                if value.is_array() {
                    return Err(SchemaContractError::new(
                        key_path,
                        "\"items\" must be a single schema object, not a tuple",
                    ));
                }
                validate_node(value, &key_path)?;
            }
            "properties" => {
                let Some(map) = value.as_object() else {
                    return Err(SchemaContractError::new(
                        key_path,
                        "\"properties\" must be an object map",
                    ));
                };
                for (prop, prop_schema) in map {
                    validate_node(prop_schema, &format!("{key_path}.{prop}"))?;
                }
            }
            "anyOf" | "allOf" => {
                let Some(variants) = value.as_array() else {
                    return Err(SchemaContractError::new(
                        key_path,
                        format!("\"{key}\" must be an array of schema objects"),
                    ));
                };
                for (index, variant) in variants.iter().enumerate() {
                    validate_node(variant, &format!("{key_path}[{index}]"))?;
                }
            }
            _ => {}
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
