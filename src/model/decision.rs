//! Canonical decision records returned by arbitration
//!
//! A decision is always exactly one of the two mode shapes. The `mode`
//! discriminant is carried by [`Decision`], so a compare record can never
//! hold stack fields and an advisory record can never hold a winner.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::case::{Judge, Mode};

/// Number of evidence items every decision carries
pub const EVIDENCE_COUNT: usize = 3;

/// Minimum number of rejected alternatives on an advisory decision
pub const MIN_REJECTED_ALTERNATIVES: usize = 3;

/// Dense evidence identifier for a position (`A`, `B`, `C`, ...)
pub fn evidence_id(index: usize) -> String {
    char::from(b'A' + (index % 26) as u8).to_string()
}

/// Winning option of a compare decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Winner {
    #[serde(rename = "Option A")]
    OptionA,
    #[serde(rename = "Option B")]
    OptionB,
}

impl Winner {
    pub fn label(&self) -> &'static str {
        match self {
            Winner::OptionA => "Option A",
            Winner::OptionB => "Option B",
        }
    }

    /// Parse one of the two canonical literals, nothing else
    pub fn from_canonical(value: &str) -> Option<Self> {
        match value {
            "Option A" => Some(Winner::OptionA),
            "Option B" => Some(Winner::OptionB),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "high" => Some(Confidence::High),
            "medium" => Some(Confidence::Medium),
            "low" => Some(Confidence::Low),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "low" => Some(Severity::Low),
            "medium" => Some(Severity::Medium),
            "high" => Some(Severity::High),
            _ => None,
        }
    }
}

/// Advantage tier of an evidence item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Advantage {
    #[serde(rename = "winner")]
    Winner,
    #[serde(rename = "runner-up")]
    RunnerUp,
    #[serde(rename = "Strong Advantage")]
    Strong,
    #[serde(rename = "Moderate Advantage")]
    Moderate,
    #[serde(rename = "Comparable")]
    Comparable,
}

impl Advantage {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "winner" => Some(Advantage::Winner),
            "runner-up" => Some(Advantage::RunnerUp),
            "Strong Advantage" => Some(Advantage::Strong),
            "Moderate Advantage" => Some(Advantage::Moderate),
            "Comparable" => Some(Advantage::Comparable),
            _ => None,
        }
    }

    /// Whether this tier marks the item as decisive for the outcome
    pub fn is_strong(&self) -> bool {
        matches!(self, Advantage::Winner | Advantage::Strong)
    }
}

/// One supporting-rationale record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceItem {
    /// Dense identifier: A, B, C
    pub id: String,
    pub title: String,
    pub explanation: String,
    /// "Option A", "Option B", "Both", or the recommended stack name
    pub beneficiary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advantage: Option<Advantage>,
}

/// Risk warning attached when thresholds are crossed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Warning {
    pub severity: Severity,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

impl Warning {
    pub fn new(severity: Severity, reason: impl Into<String>) -> Self {
        Self {
            severity,
            reason: reason.into(),
            recommendation: None,
        }
    }
}

/// Pick-one-of-two decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompareDecision {
    pub winner: Winner,
    pub confidence: Confidence,
    /// One sentence explaining the decision
    pub reasoning: String,
    /// Exactly 3 items: A strongly favors the winner, B moderately, C compares both
    pub evidence: Vec<EvidenceItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<Warning>,
}

/// Technology stack recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryDecision {
    pub stack_name: String,
    /// Stack components
    pub stack: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
    /// One sentence explaining why this stack is recommended
    pub reasoning: String,
    /// Exactly 3 items, each with `beneficiary` equal to `stackName`
    pub evidence: Vec<EvidenceItem>,
    /// At least 3 entries
    pub rejected_alternatives: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<Warning>,
}

/// A decision in one of the two mode shapes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Decision {
    Compare(CompareDecision),
    Advisory(AdvisoryDecision),
}

impl Decision {
    pub fn mode(&self) -> Mode {
        match self {
            Decision::Compare(_) => Mode::Compare,
            Decision::Advisory(_) => Mode::Advisory,
        }
    }

    pub fn evidence(&self) -> &[EvidenceItem] {
        match self {
            Decision::Compare(d) => &d.evidence,
            Decision::Advisory(d) => &d.evidence,
        }
    }

    pub fn warning(&self) -> Option<&Warning> {
        match self {
            Decision::Compare(d) => d.warning.as_ref(),
            Decision::Advisory(d) => d.warning.as_ref(),
        }
    }
}

/// Which path produced a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionSource {
    Ai,
    Deterministic,
}

/// Canonical record handed to every consumer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionRecord {
    pub id: Uuid,
    pub source: DecisionSource,
    pub judge: Judge,
    pub decided_at: DateTime<Utc>,
    #[serde(flatten)]
    pub decision: Decision,
}

impl DecisionRecord {
    pub fn new(source: DecisionSource, judge: Judge, decision: Decision) -> Self {
        Self {
            id: Uuid::new_v4(),
            source,
            judge,
            decided_at: Utc::now(),
            decision,
        }
    }

    pub fn mode(&self) -> Mode {
        self.decision.mode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evidence(id: &str, beneficiary: &str) -> EvidenceItem {
        EvidenceItem {
            id: id.to_string(),
            title: "Title".to_string(),
            explanation: "Explanation".to_string(),
            beneficiary: beneficiary.to_string(),
            advantage: Some(Advantage::Winner),
        }
    }

    #[test]
    fn test_evidence_ids_are_dense_letters() {
        let ids: Vec<String> = (0..3).map(evidence_id).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_compare_record_wire_shape() {
        let decision = Decision::Compare(CompareDecision {
            winner: Winner::OptionB,
            confidence: Confidence::Medium,
            reasoning: "Because".to_string(),
            evidence: vec![evidence("A", "Option B")],
            warning: None,
        });
        let record = DecisionRecord::new(DecisionSource::Ai, Judge::Innovation, decision);
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["mode"], "compare");
        assert_eq!(value["winner"], "Option B");
        assert_eq!(value["source"], "ai");
        assert_eq!(value["evidence"][0]["advantage"], "winner");
        assert!(value.get("stackName").is_none());
        assert!(value.get("warning").is_none());
    }

    #[test]
    fn test_advisory_record_wire_shape() {
        let decision = Decision::Advisory(AdvisoryDecision {
            stack_name: "Rapid Prototype Stack".to_string(),
            stack: vec!["Static HTML".to_string()],
            stack_description: None,
            confidence: Some(Confidence::High),
            reasoning: "Because".to_string(),
            evidence: vec![evidence("A", "Rapid Prototype Stack")],
            rejected_alternatives: vec!["x".to_string(), "y".to_string(), "z".to_string()],
            warning: Some(Warning::new(Severity::Medium, "Careful")),
        });
        let record = DecisionRecord::new(DecisionSource::Deterministic, Judge::Reliability, decision);
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["mode"], "advisory");
        assert_eq!(value["stackName"], "Rapid Prototype Stack");
        assert_eq!(value["rejectedAlternatives"].as_array().unwrap().len(), 3);
        assert_eq!(value["warning"]["severity"], "medium");
        assert!(value.get("winner").is_none());
    }

    #[test]
    fn test_record_round_trips_through_json() {
        let decision = Decision::Compare(CompareDecision {
            winner: Winner::OptionA,
            confidence: Confidence::High,
            reasoning: "Because".to_string(),
            evidence: vec![evidence("A", "Option A")],
            warning: None,
        });
        let record = DecisionRecord::new(DecisionSource::Deterministic, Judge::Reliability, decision);
        let json = serde_json::to_string(&record).unwrap();
        let parsed: DecisionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_strong_advantage_tiers() {
        assert!(Advantage::Winner.is_strong());
        assert!(Advantage::Strong.is_strong());
        assert!(!Advantage::Comparable.is_strong());
        assert_eq!(Advantage::parse("Moderate Advantage"), Some(Advantage::Moderate));
        assert_eq!(Advantage::parse("decisive"), None);
    }
}
