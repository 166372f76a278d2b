//! Schema document model.
//!
//! Parses the practical subset of JSON Schema understood by the engine
//! (`type`, `title`, `description`, `default`, `enum`, `pattern`, `format`
//! and nested `properties`) into a [`SchemaNode`] tree. Parsing is
//! permissive: unsupported or missing `type` values become
//! [`SchemaKind::Unknown`] instead of failing.

use crate::error::{Error, Result};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Leaf kind of a schema node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Unknown,
}

impl SchemaKind {
    /// Map a JSON Schema `type` keyword to a kind
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "string" => Self::String,
            "number" => Self::Number,
            "integer" => Self::Integer,
            "boolean" => Self::Boolean,
            "array" => Self::Array,
            "object" => Self::Object,
            _ => Self::Unknown,
        }
    }

    /// Whether values of this kind are numeric
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Number | Self::Integer)
    }
}

impl std::fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// One configuration field or object in a schema document
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    pub kind: SchemaKind,
    pub title: Option<String>,
    pub description: Option<String>,
    pub default: Option<Value>,
    /// Closed set of choices; empty when the node is not an enumeration
    pub enum_values: Vec<String>,
    pub pattern: Option<String>,
    pub format: Option<String>,
    /// Child fields in declaration order
    pub properties: Vec<(String, SchemaNode)>,
}

impl SchemaNode {
    /// Create an empty node of the given kind
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            title: None,
            description: None,
            default: None,
            enum_values: Vec::new(),
            pattern: None,
            format: None,
            properties: Vec::new(),
        }
    }

    /// Build a node from an already parsed JSON value.
    ///
    /// Anything that is not a JSON object yields an `Unknown` node with no
    /// metadata.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::new(SchemaKind::Unknown);
        };

        let kind = obj
            .get("type")
            .and_then(Value::as_str)
            .map(SchemaKind::from_type_name)
            .unwrap_or(SchemaKind::Unknown);

        let text = |key: &str| obj.get(key).and_then(Value::as_str).map(str::to_string);

        let enum_values = obj
            .get("enum")
            .and_then(Value::as_array)
            .map(|values| {
                values
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        let properties = obj
            .get("properties")
            .and_then(Value::as_object)
            .map(|props| {
                props
                    .iter()
                    .map(|(key, child)| (key.clone(), Self::from_value(child)))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            kind,
            title: text("title"),
            description: text("description"),
            default: obj.get("default").cloned(),
            enum_values,
            pattern: text("pattern"),
            format: text("format"),
            properties,
        }
    }

    /// Parse a schema document from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(Error::invalid_schema("document root must be a JSON object"));
        }
        Ok(Self::from_value(&value))
    }

    /// Read and parse a schema document from disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        debug!("Loading schema from {:?}", path.as_ref());
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Whether this node yields a prompt rather than acting as a container
    pub fn is_leaf(&self) -> bool {
        self.kind != SchemaKind::Object || self.properties.is_empty()
    }

    /// Look up a direct child by name
    pub fn property(&self, name: &str) -> Option<&SchemaNode> {
        self.properties
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, node)| node)
    }

    /// Resolve the node at a dotted path, one property segment at a time
    pub fn resolve(&self, path: &str) -> Option<&SchemaNode> {
        path.split('.')
            .try_fold(self, |node, segment| node.property(segment))
    }

    /// Number of prompt-yielding leaves reachable through `properties`
    pub fn leaf_count(&self) -> usize {
        self.properties
            .iter()
            .map(|(_, child)| {
                if child.is_leaf() {
                    1
                } else {
                    child.leaf_count()
                }
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_kinds() {
        assert_eq!(SchemaKind::from_type_name("string"), SchemaKind::String);
        assert_eq!(SchemaKind::from_type_name("integer"), SchemaKind::Integer);
        assert_eq!(SchemaKind::from_type_name("null"), SchemaKind::Unknown);
        assert!(SchemaKind::Number.is_numeric());
        assert!(!SchemaKind::Boolean.is_numeric());
    }

    #[test]
    fn test_missing_type_is_unknown() {
        let node = SchemaNode::from_value(&json!({ "description": "anything" }));
        assert_eq!(node.kind, SchemaKind::Unknown);
        assert_eq!(node.description.as_deref(), Some("anything"));
        assert!(node.is_leaf());
    }

    #[test]
    fn test_properties_keep_declaration_order() {
        let node = SchemaNode::from_json_str(
            r#"{"type":"object","properties":{"zeta":{"type":"string"},"alpha":{"type":"number"},"mid":{"type":"boolean"}}}"#,
        )
        .unwrap();

        let keys: Vec<&str> = node.properties.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_object_without_properties_is_leaf() {
        let node = SchemaNode::from_value(&json!({ "type": "object" }));
        assert!(node.is_leaf());

        let node = SchemaNode::from_value(&json!({ "type": "object", "properties": {} }));
        assert!(node.is_leaf());
    }

    #[test]
    fn test_enum_ignores_non_string_entries() {
        let node = SchemaNode::from_value(&json!({
            "type": "string",
            "enum": ["a", 1, "b", null]
        }));
        assert_eq!(node.enum_values, vec!["a", "b"]);
    }

    #[test]
    fn test_resolve_dotted_path() {
        let node = SchemaNode::from_value(&json!({
            "properties": {
                "aws": {
                    "type": "object",
                    "properties": { "region": { "type": "string", "default": "us-east-1" } }
                }
            }
        }));

        let region = node.resolve("aws.region").unwrap();
        assert_eq!(region.default, Some(json!("us-east-1")));
        assert!(node.resolve("aws.missing").is_none());
        assert!(node.resolve("nope").is_none());
    }

    #[test]
    fn test_leaf_count() {
        let node = SchemaNode::from_value(&json!({
            "properties": {
                "name": { "type": "string" },
                "aws": {
                    "type": "object",
                    "properties": {
                        "region": { "type": "string" },
                        "account": { "type": "string" }
                    }
                },
                "opaque": { "type": "object" }
            }
        }));
        assert_eq!(node.leaf_count(), 4);
    }

    #[test]
    fn test_root_must_be_object() {
        let err = SchemaNode::from_json_str("[1, 2]").unwrap_err();
        assert!(matches!(err, Error::InvalidSchema { .. }));
        assert!(SchemaNode::from_json_str("not json").is_err());
    }
}
