//! Schema lint
//!
//! Validation tolerates malformed contracts by ignoring whatever it cannot
//! use. This module reports those constructs so operators can fix a
//! contract before binding it to an agent profile. It is diagnostic only
//! and has no effect on validation results.

use serde::Serialize;
use std::fmt;

use crate::contracts::ROOT_PATH;
use crate::schema::NodeType;

/// A construct the validator will ignore or treat permissively
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum LintIssue {
    /// Schema node is not an object
    NodeNotObject,
    /// `type` is not a string
    TypeNotString,
    /// `type` names something other than the six recognized types
    UnknownType { name: String },
    /// `enum` is not a list
    EnumNotList,
    /// `enum` is an empty list
    EnumEmpty,
    /// `minimum`/`maximum` is not a number
    BoundNotNumeric { keyword: String },
    /// `minimum` is greater than `maximum`
    InvertedBounds { minimum: f64, maximum: f64 },
    /// `required` is not a list
    RequiredNotList,
    /// A `required` entry is not a string
    RequiredEntryNotString { index: usize },
    /// `properties` is not an object
    PropertiesNotObject,
    /// `items` is present but not a schema object
    ItemsNotObject,
}

/// One lint finding
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LintFinding {
    /// Schema path (`$`, `$.properties.score`, `$.items`)
    pub path: String,

    #[serde(flatten)]
    pub issue: LintIssue,
}

impl fmt::Display for LintFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.issue {
            LintIssue::NodeNotObject => write!(f, "{} schema node is not an object", self.path),
            LintIssue::TypeNotString => write!(f, "{} 'type' is not a string", self.path),
            LintIssue::UnknownType { name } => {
                write!(f, "{} unknown type '{}' matches any value", self.path, name)
            }
            LintIssue::EnumNotList => write!(f, "{} 'enum' is not a list", self.path),
            LintIssue::EnumEmpty => write!(f, "{} 'enum' is empty", self.path),
            LintIssue::BoundNotNumeric { keyword } => {
                write!(f, "{} '{}' is not a number", self.path, keyword)
            }
            LintIssue::InvertedBounds { minimum, maximum } => write!(
                f,
                "{} minimum {} is greater than maximum {}",
                self.path, minimum, maximum
            ),
            LintIssue::RequiredNotList => write!(f, "{} 'required' is not a list", self.path),
            LintIssue::RequiredEntryNotString { index } => {
                write!(f, "{} 'required' entry {} is not a string", self.path, index)
            }
            LintIssue::PropertiesNotObject => {
                write!(f, "{} 'properties' is not an object", self.path)
            }
            LintIssue::ItemsNotObject => write!(f, "{} 'items' is not a schema object", self.path),
        }
    }
}

/// Lint a schema document
pub fn lint_schema(schema: &serde_json::Value) -> Vec<LintFinding> {
    let mut findings = Vec::new();
    lint_node(schema, ROOT_PATH, &mut findings);
    findings
}

fn lint_node(node: &serde_json::Value, path: &str, findings: &mut Vec<LintFinding>) {
    let mut push = |issue: LintIssue| {
        findings.push(LintFinding {
            path: path.to_string(),
            issue,
        })
    };

    let Some(map) = node.as_object() else {
        push(LintIssue::NodeNotObject);
        return;
    };

    match map.get("type") {
        Some(serde_json::Value::String(name)) => {
            if !NodeType::parse(name).is_known() {
                push(LintIssue::UnknownType { name: name.clone() });
            }
        }
        Some(_) => push(LintIssue::TypeNotString),
        None => {}
    }

    match map.get("enum") {
        Some(serde_json::Value::Array(values)) if values.is_empty() => push(LintIssue::EnumEmpty),
        Some(serde_json::Value::Array(_)) | None => {}
        Some(_) => push(LintIssue::EnumNotList),
    }

    for keyword in ["minimum", "maximum"] {
        if let Some(bound) = map.get(keyword) {
            if !bound.is_number() {
                push(LintIssue::BoundNotNumeric {
                    keyword: keyword.to_string(),
                });
            }
        }
    }
    let minimum = map.get("minimum").and_then(|v| v.as_f64());
    let maximum = map.get("maximum").and_then(|v| v.as_f64());
    if let (Some(minimum), Some(maximum)) = (minimum, maximum) {
        if minimum > maximum {
            push(LintIssue::InvertedBounds { minimum, maximum });
        }
    }

    match map.get("required") {
        Some(serde_json::Value::Array(names)) => {
            for (index, name) in names.iter().enumerate() {
                if !name.is_string() {
                    push(LintIssue::RequiredEntryNotString { index });
                }
            }
        }
        Some(_) => push(LintIssue::RequiredNotList),
        None => {}
    }

    let properties = match map.get("properties") {
        Some(serde_json::Value::Object(properties)) => Some(properties),
        Some(_) => {
            push(LintIssue::PropertiesNotObject);
            None
        }
        None => None,
    };

    let items = map.get("items");
    if matches!(items, Some(i) if !i.is_object()) {
        push(LintIssue::ItemsNotObject);
    }

    if let Some(properties) = properties {
        for (name, nested) in properties {
            lint_node(nested, &format!("{}.properties.{}", path, name), findings);
        }
    }
    if let Some(items) = items.filter(|i| i.is_object()) {
        lint_node(items, &format!("{}.items", path), findings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::builtin_definitions;
    use serde_json::json;

    #[test]
    fn test_builtins_are_clean() {
        for definition in builtin_definitions() {
            assert!(
                lint_schema(definition.schema.as_value()).is_empty(),
                "{} should lint clean",
                definition.code
            );
        }
    }

    #[test]
    fn test_reports_malformed_constructs() {
        let findings = lint_schema(&json!({
            "type": "object",
            "required": ["a", 1],
            "properties": {
                "a": "string",
                "b": {"type": "number", "minimum": 5, "maximum": 1},
                "c": {"type": "integer", "enum": []},
                "d": {"type": "array", "items": true}
            }
        }));

        let messages: Vec<String> = findings.iter().map(|f| f.to_string()).collect();
        assert_eq!(
            messages,
            vec![
                "$ 'required' entry 1 is not a string",
                "$.properties.a schema node is not an object",
                "$.properties.b minimum 5 is greater than maximum 1",
                "$.properties.c unknown type 'integer' matches any value",
                "$.properties.c 'enum' is empty",
                "$.properties.d 'items' is not a schema object",
            ]
        );
    }

    #[test]
    fn test_keyword_shape_issues() {
        let findings = lint_schema(&json!({
            "type": ["string"],
            "enum": "A",
            "minimum": "0",
            "required": "a",
            "properties": []
        }));
        let issues: Vec<LintIssue> = findings.into_iter().map(|f| f.issue).collect();
        assert_eq!(
            issues,
            vec![
                LintIssue::TypeNotString,
                LintIssue::EnumNotList,
                LintIssue::BoundNotNumeric {
                    keyword: "minimum".to_string()
                },
                LintIssue::RequiredNotList,
                LintIssue::PropertiesNotObject,
            ]
        );
    }
}
