//! Loosely-structured decision candidates returned by the inference service
//!
//! Every field is optional and read leniently: a field with an unexpected JSON
//! type is treated as absent so that normalization can repair it. Keys owned
//! by advisory replies are also recorded by presence alone, whatever their
//! type, so validation can detect contamination of compare replies.

use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateEvidence {
    pub id: Option<String>,
    pub title: Option<String>,
    pub explanation: Option<String>,
    pub beneficiary: Option<String>,
    pub advantage: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateWarning {
    pub severity: Option<String>,
    pub reason: Option<String>,
    pub recommendation: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateDecision {
    pub mode: Option<String>,
    pub winner: Option<String>,
    /// Alternate key some models use instead of `winner`
    pub decision: Option<String>,
    pub confidence: Option<String>,
    pub reasoning: Option<String>,
    pub justification: Option<String>,
    pub summary: Option<String>,
    /// `None` when absent or not an array
    pub evidence: Option<Vec<CandidateEvidence>>,
    pub warning: Option<CandidateWarning>,
    pub stack_name: Option<String>,
    pub stack: Option<Vec<String>>,
    pub rejected_alternatives: Option<Vec<String>>,
    pub consultation: Option<Value>,
    /// Advisory-only keys present with a non-empty value of any type
    #[serde(skip)]
    pub advisory_keys: Vec<&'static str>,
}

/// Keys that only an advisory reply may carry
const ADVISORY_KEYS: [&str; 4] = ["stackName", "stack", "rejectedAlternatives", "consultation"];

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CandidateError {
    #[error("Reply is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Reply is not a JSON object")]
    NotAnObject,
}

impl CandidateDecision {
    /// Parse the textual content of an inference reply
    ///
    /// Markdown code fences around the JSON object are tolerated.
    pub fn parse_reply(content: &str) -> Result<Self, CandidateError> {
        let value: Value = serde_json::from_str(strip_code_fence(content))?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self, CandidateError> {
        let map = value.as_object().ok_or(CandidateError::NotAnObject)?;

        Ok(Self {
            mode: string_field(map, "mode"),
            winner: string_field(map, "winner"),
            decision: string_field(map, "decision"),
            confidence: string_field(map, "confidence"),
            reasoning: string_field(map, "reasoning"),
            justification: string_field(map, "justification"),
            summary: string_field(map, "summary"),
            evidence: map.get("evidence").and_then(Value::as_array).map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_object)
                    .map(evidence_from_map)
                    .collect()
            }),
            warning: map
                .get("warning")
                .and_then(Value::as_object)
                .map(|w| CandidateWarning {
                    severity: string_field(w, "severity"),
                    reason: string_field(w, "reason"),
                    recommendation: string_field(w, "recommendation"),
                }),
            stack_name: string_field(map, "stackName"),
            stack: map.get("stack").and_then(string_list),
            rejected_alternatives: map.get("rejectedAlternatives").and_then(string_list),
            consultation: map.get("consultation").filter(|v| !v.is_null()).cloned(),
            advisory_keys: ADVISORY_KEYS
                .into_iter()
                .filter(|key| map.get(*key).is_some_and(is_set))
                .collect(),
        })
    }
}

fn evidence_from_map(map: &Map<String, Value>) -> CandidateEvidence {
    CandidateEvidence {
        id: string_field(map, "id"),
        title: string_field(map, "title"),
        explanation: string_field(map, "explanation"),
        beneficiary: string_field(map, "beneficiary"),
        advantage: string_field(map, "advantage"),
    }
}

/// Whether a value counts as supplied: null, false, zero and blank strings do not
fn is_set(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Read a non-blank string field; numbers are accepted as their text
fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    let text = match map.get(key)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// Read a list of strings; objects contribute their `name` field
fn string_list(value: &Value) -> Option<Vec<String>> {
    let items = value.as_array()?;
    Some(
        items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Object(obj) => match (string_field(obj, "name"), string_field(obj, "reason")) {
                    (Some(name), Some(reason)) => Some(format!("{}: {}", name, reason)),
                    (Some(name), None) => Some(name),
                    _ => None,
                },
                _ => None,
            })
            .filter(|s| !s.is_empty())
            .collect(),
    )
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
