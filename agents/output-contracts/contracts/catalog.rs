//! Built-in output contracts
//!
//! Registered automatically when a registry is seeded. The lowercase
//! `agent_output_v1` entry duplicates `AGENT_OUTPUT_V1` for older agent
//! profiles that still reference the lowercase code.

use serde_json::json;

use super::SchemaDefinition;

pub const MARKET_ANALYSIS_V1: &str = "MARKET_ANALYSIS_V1";
pub const RISK_ASSESSMENT_V1: &str = "RISK_ASSESSMENT_V1";
pub const TRADE_SUGGESTION_V1: &str = "TRADE_SUGGESTION_V1";
pub const AGENT_OUTPUT_V1: &str = "AGENT_OUTPUT_V1";
pub const AGENT_OUTPUT_V1_LEGACY: &str = "agent_output_v1";

/// Codes of the built-in catalog, in registration order
pub const BUILTIN_CODES: [&str; 5] = [
    MARKET_ANALYSIS_V1,
    RISK_ASSESSMENT_V1,
    TRADE_SUGGESTION_V1,
    AGENT_OUTPUT_V1,
    AGENT_OUTPUT_V1_LEGACY,
];

/// The built-in definitions, in registration order
pub fn builtin_definitions() -> Vec<SchemaDefinition> {
    vec![
        market_analysis(),
        risk_assessment(),
        trade_suggestion(),
        agent_output(AGENT_OUTPUT_V1),
        agent_output(AGENT_OUTPUT_V1_LEGACY),
    ]
}

fn market_analysis() -> SchemaDefinition {
    SchemaDefinition::new(
        MARKET_ANALYSIS_V1,
        "Market analysis report",
        json!({
            "type": "object",
            "required": ["thesis", "confidence", "evidence"],
            "properties": {
                "thesis": {"type": "string"},
                "confidence": {"type": "number", "minimum": 0, "maximum": 1},
                "evidence": {"type": "array", "items": {"type": "string"}},
                "riskFactors": {"type": "array", "items": {"type": "string"}}
            }
        }),
    )
    .with_description("Market thesis with a confidence score and supporting evidence")
}

fn risk_assessment() -> SchemaDefinition {
    SchemaDefinition::new(
        RISK_ASSESSMENT_V1,
        "Risk assessment report",
        json!({
            "type": "object",
            "required": ["riskLevel", "score", "mitigationPlan"],
            "properties": {
                "riskLevel": {"type": "string", "enum": ["LOW", "MEDIUM", "HIGH", "CRITICAL"]},
                "score": {"type": "number", "minimum": 0, "maximum": 100},
                "mitigationPlan": {"type": "string"}
            }
        }),
    )
    .with_description("Graded risk level, numeric score and mitigation plan")
}

fn trade_suggestion() -> SchemaDefinition {
    SchemaDefinition::new(
        TRADE_SUGGESTION_V1,
        "Trade suggestion",
        json!({
            "type": "object",
            "required": ["action", "reasoning"],
            "properties": {
                "action": {"type": "string", "enum": ["BUY", "SELL", "HOLD"]},
                "reasoning": {"type": "string"}
            }
        }),
    )
    .with_description("Suggested trade action with its reasoning")
}

fn agent_output(code: &str) -> SchemaDefinition {
    SchemaDefinition::new(
        code,
        "Generic agent output",
        json!({
            "type": "object",
            "required": ["thesis", "confidence", "evidence"],
            "properties": {
                "thesis": {"type": "string"},
                "confidence": {"type": "number", "minimum": 0, "maximum": 1},
                "evidence": {"type": "array", "items": {"type": "string"}}
            }
        }),
    )
    .with_description("Generic thesis/confidence/evidence output shape")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_codes_match_definitions() {
        let codes: Vec<String> = builtin_definitions().into_iter().map(|d| d.code).collect();
        assert_eq!(codes, BUILTIN_CODES.to_vec());
    }

    #[test]
    fn test_agent_output_aliases_share_schema() {
        let definitions = builtin_definitions();
        let upper = definitions.iter().find(|d| d.code == AGENT_OUTPUT_V1).unwrap();
        let lower = definitions
            .iter()
            .find(|d| d.code == AGENT_OUTPUT_V1_LEGACY)
            .unwrap();
        assert_eq!(upper.schema, lower.schema);
    }

    #[test]
    fn test_risk_levels() {
        let risk = risk_assessment();
        let level = risk.schema.property("riskLevel").unwrap();
        assert_eq!(level.enum_values.len(), 4);
        assert!(risk.schema.is_required("mitigationPlan"));
    }
}
