//! Schema nodes for the output contract dialect
//!
//! A contract is authored as an untyped JSON document using a restricted
//! JSON-Schema vocabulary: `type`, `enum`, `minimum`, `maximum`, `required`,
//! `properties` and `items`. [`SchemaNode`] parses that document into a typed
//! view once, tolerantly: entries that do not have a usable shape are
//! dropped rather than rejected, so a malformed contract never makes the
//! validator fail. The original document is kept verbatim for listing and
//! serialization.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::payload::Payload;

/// The `type` keyword of a schema node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeType {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
    /// Unrecognized type name; matches every value
    Other(String),
}

impl NodeType {
    /// Parse a type name. Unknown names are preserved as [`NodeType::Other`].
    pub fn parse(name: &str) -> Self {
        match name {
            "object" => NodeType::Object,
            "array" => NodeType::Array,
            "string" => NodeType::String,
            "number" => NodeType::Number,
            "boolean" => NodeType::Boolean,
            "null" => NodeType::Null,
            other => NodeType::Other(other.to_string()),
        }
    }

    /// Type name as written in the schema
    pub fn as_str(&self) -> &str {
        match self {
            NodeType::Object => "object",
            NodeType::Array => "array",
            NodeType::String => "string",
            NodeType::Number => "number",
            NodeType::Boolean => "boolean",
            NodeType::Null => "null",
            NodeType::Other(name) => name,
        }
    }

    /// Check whether a payload value conforms to this type.
    ///
    /// `number` only accepts finite values.
    pub fn matches(&self, value: &Payload) -> bool {
        match (self, value) {
            (NodeType::Other(_), _) => true,
            (NodeType::Object, Payload::Object(_)) => true,
            (NodeType::Array, Payload::Array(_)) => true,
            (NodeType::String, Payload::String(_)) => true,
            (NodeType::Number, _) => value.as_finite_number().is_some(),
            (NodeType::Boolean, Payload::Bool(_)) => true,
            (NodeType::Null, Payload::Null) => true,
            _ => false,
        }
    }

    /// Whether this is one of the six recognized type names
    pub fn is_known(&self) -> bool {
        !matches!(self, NodeType::Other(_))
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One level of a structural contract
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    /// Expected type; `None` accepts any value at this node
    pub node_type: Option<NodeType>,
    /// Allowed literal values; empty means unconstrained
    pub enum_values: Vec<Payload>,
    /// Inclusive lower bound for numbers
    pub minimum: Option<f64>,
    /// Inclusive upper bound for numbers
    pub maximum: Option<f64>,
    /// Keys that must be present on an object value
    pub required: Vec<String>,
    /// Nested nodes for declared properties, in declaration order
    pub properties: Vec<(String, SchemaNode)>,
    /// Node applied to every array element
    pub items: Option<Box<SchemaNode>>,
    source: serde_json::Value,
}

impl SchemaNode {
    /// Parse a schema document into a node.
    ///
    /// Never fails. A non-object document yields a node with no constraints.
    pub fn from_value(source: serde_json::Value) -> Self {
        let Some(map) = source.as_object() else {
            return Self::unconstrained(source);
        };

        let node_type = map
            .get("type")
            .and_then(|t| t.as_str())
            .map(NodeType::parse);

        let enum_values = map
            .get("enum")
            .and_then(|e| e.as_array())
            .map(|values| values.iter().map(Payload::from).collect())
            .unwrap_or_default();

        let minimum = map.get("minimum").and_then(|v| v.as_f64());
        let maximum = map.get("maximum").and_then(|v| v.as_f64());

        let required = map
            .get("required")
            .and_then(|r| r.as_array())
            .map(|names| {
                names
                    .iter()
                    .filter_map(|name| name.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        let properties = map
            .get("properties")
            .and_then(|p| p.as_object())
            .map(|props| {
                props
                    .iter()
                    .filter(|(_, nested)| nested.is_object())
                    .map(|(name, nested)| (name.clone(), SchemaNode::from_value(nested.clone())))
                    .collect()
            })
            .unwrap_or_default();

        let items = map
            .get("items")
            .filter(|i| i.is_object())
            .map(|i| Box::new(SchemaNode::from_value(i.clone())));

        Self {
            node_type,
            enum_values,
            minimum,
            maximum,
            required,
            properties,
            items,
            source,
        }
    }

    fn unconstrained(source: serde_json::Value) -> Self {
        Self {
            node_type: None,
            enum_values: Vec::new(),
            minimum: None,
            maximum: None,
            required: Vec::new(),
            properties: Vec::new(),
            items: None,
            source,
        }
    }

    /// The schema document this node was parsed from
    pub fn as_value(&self) -> &serde_json::Value {
        &self.source
    }

    /// Look up the nested node of a declared property
    pub fn property(&self, name: &str) -> Option<&SchemaNode> {
        self.properties
            .iter()
            .find(|(declared, _)| declared == name)
            .map(|(_, node)| node)
    }

    /// Check if a property is listed in `required`
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }
}

impl From<serde_json::Value> for SchemaNode {
    fn from(value: serde_json::Value) -> Self {
        SchemaNode::from_value(value)
    }
}

impl Serialize for SchemaNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.source.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SchemaNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(SchemaNode::from_value)
    }
}
