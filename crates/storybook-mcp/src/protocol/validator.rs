//! Validation of tool arguments against their JSON-schema documents.
//!
//! Covers the keywords tool input schemas actually use: `type`,
//! `properties`, `required`, `additionalProperties`, `enum`, `const`,
//! string length, numeric bounds and array `items`/size. Annotation
//! keywords (`title`, `description`, `default`, `$schema`) are ignored.
//! Values are never coerced.

use std::fmt;

use serde_json::{Map, Value};

/// A single schema violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// JSON pointer to the offending value (`""` is the root).
    pub path: String,
    /// What is wrong with it.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() { "/" } else { &self.path };
        write!(f, "{path}: {}", self.message)
    }
}

/// Validate `instance` against `schema`, collecting every violation.
pub fn validate(schema: &Value, instance: &Value) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    check(schema, instance, "", &mut errors);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Render a list of violations as one human-readable line.
pub fn describe(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn check(schema: &Value, value: &Value, path: &str, errors: &mut Vec<ValidationError>) {
    let schema = match schema {
        Value::Bool(true) => return,
        Value::Bool(false) => {
            push(errors, path, "value is not allowed here".to_string());
            return;
        }
        Value::Object(schema) => schema,
        // Non-object schemas constrain nothing.
        _ => return,
    };

    if let Some(expected) = schema.get("type") {
        if !matches_type(expected, value) {
            push(
                errors,
                path,
                format!("expected {}, found {}", type_label(expected), json_type(value)),
            );
            return;
        }
    }

    if let Some(Value::Array(options)) = schema.get("enum") {
        if !options.contains(value) {
            push(errors, path, format!("value must be one of {}", Value::Array(options.clone())));
        }
    }

    if let Some(constant) = schema.get("const") {
        if constant != value {
            push(errors, path, format!("value must equal {constant}"));
        }
    }

    match value {
        Value::String(s) => check_string(schema, s, path, errors),
        Value::Number(_) => check_number(schema, value, path, errors),
        Value::Object(map) => check_object(schema, map, path, errors),
        Value::Array(items) => check_array(schema, items, path, errors),
        Value::Bool(_) | Value::Null => {}
    }
}

fn check_string(schema: &Map<String, Value>, s: &str, path: &str, errors: &mut Vec<ValidationError>) {
    let len = s.chars().count() as u64;
    if let Some(min) = schema.get("minLength").and_then(Value::as_u64) {
        if len < min {
            push(errors, path, format!("string shorter than {min} characters"));
        }
    }
    if let Some(max) = schema.get("maxLength").and_then(Value::as_u64) {
        if len > max {
            push(errors, path, format!("string longer than {max} characters"));
        }
    }
}

fn check_number(
    schema: &Map<String, Value>,
    value: &Value,
    path: &str,
    errors: &mut Vec<ValidationError>,
) {
    let Some(n) = value.as_f64() else {
        return;
    };
    if let Some(min) = schema.get("minimum").and_then(Value::as_f64) {
        if n < min {
            push(errors, path, format!("{value} is less than the minimum of {min}"));
        }
    }
    if let Some(max) = schema.get("maximum").and_then(Value::as_f64) {
        if n > max {
            push(errors, path, format!("{value} is greater than the maximum of {max}"));
        }
    }
}

fn check_object(
    schema: &Map<String, Value>,
    map: &Map<String, Value>,
    path: &str,
    errors: &mut Vec<ValidationError>,
) {
    if let Some(Value::Array(required)) = schema.get("required") {
        for name in required.iter().filter_map(Value::as_str) {
            if !map.contains_key(name) {
                push(errors, path, format!("missing required property '{name}'"));
            }
        }
    }

    let properties = schema.get("properties").and_then(Value::as_object);
    for (key, child) in map {
        let child_path = format!("{path}/{key}");
        match properties.and_then(|props| props.get(key)) {
            Some(child_schema) => check(child_schema, child, &child_path, errors),
            None => match schema.get("additionalProperties") {
                Some(Value::Bool(false)) => {
                    push(errors, path, format!("unexpected property '{key}'"));
                }
                Some(extra) => check(extra, child, &child_path, errors),
                None => {}
            },
        }
    }
}

fn check_array(schema: &Map<String, Value>, items: &[Value], path: &str, errors: &mut Vec<ValidationError>) {
    let len = items.len() as u64;
    if let Some(min) = schema.get("minItems").and_then(Value::as_u64) {
        if len < min {
            push(errors, path, format!("array has fewer than {min} items"));
        }
    }
    if let Some(max) = schema.get("maxItems").and_then(Value::as_u64) {
        if len > max {
            push(errors, path, format!("array has more than {max} items"));
        }
    }
    if let Some(item_schema) = schema.get("items") {
        for (i, item) in items.iter().enumerate() {
            check(item_schema, item, &format!("{path}/{i}"), errors);
        }
    }
}

fn matches_type(expected: &Value, value: &Value) -> bool {
    match expected {
        Value::String(name) => is_type(name, value),
        Value::Array(names) => names
            .iter()
            .filter_map(Value::as_str)
            .any(|name| is_type(name, value)),
        _ => true,
    }
}

fn is_type(name: &str, value: &Value) -> bool {
    match name {
        "object" => value.is_object(),
        "array" => value.is_array(),
        "string" => value.is_string(),
        "boolean" => value.is_boolean(),
        "null" => value.is_null(),
        "number" => value.is_number(),
        "integer" => {
            value.is_i64() || value.is_u64() || value.as_f64().is_some_and(|n| n.fract() == 0.0)
        }
        _ => false,
    }
}

fn type_label(expected: &Value) -> String {
    match expected {
        Value::String(name) => name.clone(),
        Value::Array(names) => names
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(" or "),
        other => other.to_string(),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn push(errors: &mut Vec<ValidationError>, path: &str, message: String) {
    errors.push(ValidationError {
        path: path.to_string(),
        message,
    });
}
