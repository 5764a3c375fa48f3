//! Loading definitions and payloads from documents
//!
//! JSON, YAML and TOML documents are all converted to `serde_json::Value`
//! for uniform processing. A definitions document may be a single
//! definition, a list of definitions, or a table with a `definitions` list
//! (the only shape TOML can express).

use std::path::Path;

use crate::contracts::SchemaDefinition;
use crate::error::{ContractError, Result};
use crate::payload::Payload;

/// Parse a document based on its file extension
pub fn parse_document(path: &Path, content: &str) -> Result<serde_json::Value> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "json" => serde_json::from_str(content)
            .map_err(|e| ContractError::ParseError(format!("Invalid JSON: {}", e))),
        "yaml" | "yml" => serde_yaml::from_str(content)
            .map_err(|e| ContractError::ParseError(format!("Invalid YAML: {}", e))),
        "toml" => {
            let toml_value: toml::Value = toml::from_str(content)
                .map_err(|e| ContractError::ParseError(format!("Invalid TOML: {}", e)))?;
            serde_json::to_value(toml_value)
                .map_err(|e| ContractError::ParseError(format!("Conversion error: {}", e)))
        }
        _ => Err(ContractError::InvalidInput(format!(
            "Unsupported file format: {}. Supported formats: json, yaml, yml, toml",
            extension
        ))),
    }
}

/// Read and parse a document from disk
pub fn load_document(path: &Path) -> Result<serde_json::Value> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ContractError::FileError(format!("Failed to read '{}': {}", path.display(), e))
    })?;
    parse_document(path, &content)
}

/// Read a payload document
pub fn load_payload(path: &Path) -> Result<Payload> {
    load_document(path).map(Payload::from)
}

/// Decode schema definitions from a parsed document
pub fn definitions_from_value(document: serde_json::Value) -> Result<Vec<SchemaDefinition>> {
    let entries = match document {
        serde_json::Value::Array(entries) => entries,
        serde_json::Value::Object(mut map) => match map.remove("definitions") {
            Some(serde_json::Value::Array(entries)) => entries,
            Some(_) => {
                return Err(ContractError::definition_error(
                    "'definitions' must be a list of schema definitions",
                ))
            }
            None => vec![serde_json::Value::Object(map)],
        },
        other => {
            return Err(ContractError::definition_error(format!(
                "Expected a definition or a list of definitions, found {}",
                json_type_name(&other)
            )))
        }
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            serde_json::from_value::<SchemaDefinition>(entry).map_err(|e| {
                ContractError::definition_error(format!("Definition #{}: {}", index, e))
            })
        })
        .collect()
}

/// Read schema definitions from a file
pub fn load_definitions_file(path: &Path) -> Result<Vec<SchemaDefinition>> {
    let definitions = definitions_from_value(load_document(path)?)?;
    tracing::debug!(
        path = %path.display(),
        count = definitions.len(),
        "Loaded schema definitions"
    );
    Ok(definitions)
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaNode;
    use crate::validation::validate_against_schema;
    use serde_json::json;
    use std::io::Write;
    use std::path::PathBuf;

    #[test]
    fn test_parse_json() {
        let value = parse_document(&PathBuf::from("p.json"), r#"{"action": "BUY"}"#).unwrap();
        assert_eq!(value["action"], "BUY");
    }

    #[test]
    fn test_parse_yaml() {
        let value = parse_document(&PathBuf::from("p.yml"), "action: SELL\nscore: 4").unwrap();
        assert_eq!(value["action"], "SELL");
        assert_eq!(value["score"], 4);
    }

    #[test]
    fn test_parse_toml() {
        let value = parse_document(&PathBuf::from("p.toml"), "action = \"HOLD\"").unwrap();
        assert_eq!(value["action"], "HOLD");
    }

    #[test]
    fn test_toml_keeps_property_declaration_order() {
        let content = r#"
type = "object"

[properties.zeta]
type = "string"

[properties.alpha]
type = "string"
"#;
        let schema = SchemaNode::from_value(parse_document(&PathBuf::from("s.toml"), content).unwrap());
        let names: Vec<&str> = schema.properties.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);

        let result = validate_against_schema(&schema, &Payload::from(json!({"alpha": 1, "zeta": 2})));
        assert_eq!(
            result.errors(),
            &[
                "$.zeta type mismatch, expected string".to_string(),
                "$.alpha type mismatch, expected string".to_string(),
            ]
        );
    }

    #[test]
    fn test_yaml_keeps_property_declaration_order() {
        let content = "type: object\nproperties:\n  zeta: {type: string}\n  alpha: {type: string}\n";
        let schema = SchemaNode::from_value(parse_document(&PathBuf::from("s.yaml"), content).unwrap());
        let names: Vec<&str> = schema.properties.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_parse_unsupported() {
        let err = parse_document(&PathBuf::from("p.txt"), "x").unwrap_err();
        assert!(matches!(err, ContractError::InvalidInput(_)));
    }

    #[test]
    fn test_definitions_shapes() {
        let single = json!({"code": "A", "name": "a", "schema": {"type": "object"}});
        assert_eq!(definitions_from_value(single.clone()).unwrap().len(), 1);
        assert_eq!(
            definitions_from_value(json!([single.clone(), single.clone()])).unwrap().len(),
            2
        );
        assert_eq!(
            definitions_from_value(json!({"definitions": [single]})).unwrap().len(),
            1
        );
    }

    #[test]
    fn test_definitions_errors() {
        assert!(definitions_from_value(json!("nope")).is_err());
        assert!(definitions_from_value(json!({"definitions": {}})).is_err());

        let err = definitions_from_value(json!([{"code": "A"}])).unwrap_err();
        assert!(matches!(err, ContractError::DefinitionError(_)));
        assert!(err.to_string().contains("#0"));
    }

    #[test]
    fn test_load_definitions_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[[definitions]]
code = "NEWS_DIGEST_V1"
name = "News digest"

[definitions.schema]
type = "object"
required = ["headline"]
"#
        )
        .unwrap();

        let definitions = load_definitions_file(file.path()).unwrap();
        assert_eq!(definitions.len(), 1);
        assert_eq!(definitions[0].code, "NEWS_DIGEST_V1");
        assert!(definitions[0].schema.is_required("headline"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_document(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ContractError::FileError(_)));
    }
}
