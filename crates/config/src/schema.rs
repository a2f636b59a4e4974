//! Declarative configuration schema model
//!
//! A `Schema` describes the expected shape of a configuration object: leaf
//! fields with a semantic kind, optional default and constraints, and nested
//! objects of named children. Schemas are plain immutable values; every
//! builder consumes its input and returns a new schema.

use std::collections::BTreeMap;

use serde_json::Value;

/// Semantic type of a leaf field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Number,
    Boolean,
}

impl FieldKind {
    /// Lowercase name used in issue messages
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
        }
    }
}

/// Validated string formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringFormat {
    /// An http:// or https:// URL
    Url,
}

/// Constraints and defaults attached to a leaf field
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub(crate) kind: FieldKind,
    pub(crate) default: Option<Value>,
    pub(crate) min: Option<f64>,
    pub(crate) max: Option<f64>,
    pub(crate) format: Option<StringFormat>,
}

/// Structural payload of a schema node
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SchemaNode {
    Field(Field),
    Object(Vec<(String, Schema)>),
}

/// A configuration schema tree node
///
/// Every node carries a string metadata map alongside its structural
/// definition. The loader reads the `env` key to decide how a field is
/// resolved from the environment (see [`crate::meta`]); other keys are
/// opaque annotations.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub(crate) node: SchemaNode,
    pub(crate) meta: BTreeMap<String, String>,
}

impl Schema {
    fn leaf(kind: FieldKind) -> Self {
        Self {
            node: SchemaNode::Field(Field {
                kind,
                default: None,
                min: None,
                max: None,
                format: None,
            }),
            meta: BTreeMap::new(),
        }
    }

    /// A free-form string field
    pub fn string() -> Self {
        Self::leaf(FieldKind::String)
    }

    /// A numeric field accepting integers and floats
    pub fn number() -> Self {
        Self::leaf(FieldKind::Number)
    }

    /// A boolean field
    pub fn boolean() -> Self {
        Self::leaf(FieldKind::Boolean)
    }

    /// An object with named child schemas, kept in declaration order
    pub fn object<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Schema)>,
        K: Into<String>,
    {
        Self {
            node: SchemaNode::Object(fields.into_iter().map(|(k, s)| (k.into(), s)).collect()),
            meta: BTreeMap::new(),
        }
    }

    /// Attach a default used when no value is resolved for the field
    ///
    /// Constraint builders apply to leaf fields; objects are returned
    /// unchanged.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        if let SchemaNode::Field(ref mut field) = self.node {
            field.default = Some(value.into());
        }
        self
    }

    /// Lower bound: numeric value for numbers, length for strings
    pub fn min(mut self, bound: f64) -> Self {
        if let SchemaNode::Field(ref mut field) = self.node {
            field.min = Some(bound);
        }
        self
    }

    /// Upper bound: numeric value for numbers, length for strings
    pub fn max(mut self, bound: f64) -> Self {
        if let SchemaNode::Field(ref mut field) = self.node {
            field.max = Some(bound);
        }
        self
    }

    /// Require a string format
    pub fn format(mut self, format: StringFormat) -> Self {
        if let SchemaNode::Field(ref mut field) = self.node {
            field.format = Some(format);
        }
        self
    }

    /// Attach a metadata entry, returning the annotated schema
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builders_attach_constraints_to_leaves() {
        let schema = Schema::number().min(1.0).max(10.0).default_value(5);
        match schema.node {
            SchemaNode::Field(field) => {
                assert_eq!(field.kind, FieldKind::Number);
                assert_eq!(field.min, Some(1.0));
                assert_eq!(field.max, Some(10.0));
                assert_eq!(field.default, Some(json!(5)));
            }
            SchemaNode::Object(_) => panic!("expected a leaf field"),
        }
    }

    #[test]
    fn object_preserves_declaration_order() {
        let schema = Schema::object([
            ("zeta", Schema::string()),
            ("alpha", Schema::string()),
        ]);
        match schema.node {
            SchemaNode::Object(fields) => {
                let names: Vec<&str> = fields.iter().map(|(name, _)| name.as_str()).collect();
                assert_eq!(names, vec!["zeta", "alpha"]);
            }
            SchemaNode::Field(_) => panic!("expected an object"),
        }
    }

    #[test]
    fn annotating_returns_a_new_value() {
        let plain = Schema::string();
        let tagged = plain.clone().with_meta("env", "PORT");
        assert!(plain.meta.is_empty());
        assert_eq!(tagged.meta.get("env").map(String::as_str), Some("PORT"));
    }
}
