//! Schema validation and coercion
//!
//! Walks a schema against a raw input value, coercing raw strings into each
//! field's semantic type and collecting every issue instead of stopping at
//! the first, so callers see all problems in one pass.

use serde_json::{Map, Number, Value};
use types::ConfigIssue;

use crate::schema::{Field, FieldKind, Schema, SchemaNode, StringFormat};

/// Validate `raw` against `schema`, returning the coerced value or every
/// issue found
pub(crate) fn validate(schema: &Schema, raw: Option<&Value>) -> Result<Value, Vec<ConfigIssue>> {
    let mut issues = Vec::new();
    let mut path = Vec::new();
    let value = validate_node(schema, raw, &mut path, &mut issues);

    if issues.is_empty() {
        // a node only returns None after recording an issue
        Ok(value.unwrap_or(Value::Null))
    } else {
        Err(issues)
    }
}

fn validate_node(
    schema: &Schema,
    raw: Option<&Value>,
    path: &mut Vec<String>,
    issues: &mut Vec<ConfigIssue>,
) -> Option<Value> {
    match &schema.node {
        SchemaNode::Object(fields) => {
            let raw_object = match raw {
                None => None,
                Some(Value::Object(map)) => Some(map),
                Some(other) => {
                    issues.push(issue(path, format!("expected object, got {}", type_name(other))));
                    return None;
                }
            };

            // extra keys in the raw object are dropped here: only schema
            // fields are carried into the output
            let mut out = Map::new();
            for (name, child) in fields {
                path.push(name.clone());
                let child_raw = raw_object.and_then(|map| map.get(name));
                if let Some(value) = validate_node(child, child_raw, path, issues) {
                    out.insert(name.clone(), value);
                }
                path.pop();
            }
            Some(Value::Object(out))
        }
        SchemaNode::Field(field) => validate_field(field, raw, path, issues),
    }
}

fn validate_field(
    field: &Field,
    raw: Option<&Value>,
    path: &[String],
    issues: &mut Vec<ConfigIssue>,
) -> Option<Value> {
    let value = match raw {
        // a resolved value always beats a schema default
        Some(raw) => coerce(field.kind, raw, path, issues)?,
        None => match &field.default {
            Some(default) => default.clone(),
            None => {
                issues.push(issue(path, "missing required value"));
                return None;
            }
        },
    };

    check_constraints(field, &value, path, issues);
    Some(value)
}

fn coerce(
    kind: FieldKind,
    raw: &Value,
    path: &[String],
    issues: &mut Vec<ConfigIssue>,
) -> Option<Value> {
    match kind {
        FieldKind::String => match raw {
            Value::String(s) => Some(Value::String(s.clone())),
            other => {
                issues.push(issue(path, format!("expected string, got {}", type_name(other))));
                None
            }
        },
        FieldKind::Number => match raw {
            Value::Number(n) => Some(Value::Number(n.clone())),
            Value::String(s) => match parse_number(s) {
                Some(n) => Some(Value::Number(n)),
                None => {
                    issues.push(issue(path, format!("expected number, got \"{}\"", s)));
                    None
                }
            },
            other => {
                issues.push(issue(path, format!("expected number, got {}", type_name(other))));
                None
            }
        },
        FieldKind::Boolean => match raw {
            Value::Bool(b) => Some(Value::Bool(*b)),
            Value::String(s) => match parse_bool(s) {
                Some(b) => Some(Value::Bool(b)),
                None => {
                    issues.push(issue(path, format!("expected boolean, got \"{}\"", s)));
                    None
                }
            },
            other => {
                issues.push(issue(path, format!("expected boolean, got {}", type_name(other))));
                None
            }
        },
    }
}

fn check_constraints(
    field: &Field,
    value: &Value,
    path: &[String],
    issues: &mut Vec<ConfigIssue>,
) {
    match value {
        Value::Number(n) => {
            let n = n.as_f64().unwrap_or_default();
            if let Some(min) = field.min {
                if n < min {
                    issues.push(issue(path, format!("must be >= {}", format_bound(min))));
                }
            }
            if let Some(max) = field.max {
                if n > max {
                    issues.push(issue(path, format!("must be <= {}", format_bound(max))));
                }
            }
        }
        Value::String(s) => {
            let length = s.chars().count() as f64;
            if let Some(min) = field.min {
                if length < min {
                    issues.push(issue(
                        path,
                        format!("must be at least {} characters", format_bound(min)),
                    ));
                }
            }
            if let Some(max) = field.max {
                if length > max {
                    issues.push(issue(
                        path,
                        format!("must be at most {} characters", format_bound(max)),
                    ));
                }
            }
            if let Some(StringFormat::Url) = field.format {
                if !s.starts_with("http://") && !s.starts_with("https://") {
                    issues.push(issue(path, "must be an http:// or https:// URL"));
                }
            }
        }
        _ => {}
    }
}

fn parse_number(s: &str) -> Option<Number> {
    let trimmed = s.trim();
    if let Ok(integer) = trimmed.parse::<i64>() {
        return Some(Number::from(integer));
    }
    trimmed.parse::<f64>().ok().and_then(Number::from_f64)
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn issue(path: &[String], message: impl Into<String>) -> ConfigIssue {
    let path = if path.is_empty() {
        "(root)".to_string()
    } else {
        path.join(".")
    };
    ConfigIssue::new(path, message)
}

fn format_bound(bound: f64) -> String {
    if bound.fract() == 0.0 {
        format!("{}", bound as i64)
    } else {
        format!("{}", bound)
    }
}
