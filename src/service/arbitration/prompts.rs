//! Instruction prompts for the inference service

use schemars::schema::RootSchema;
use schemars::schema_for;

use crate::model::{AdvisoryDecision, CompareDecision, Judge, Mode};

const COMPARE_RULES: &str = r#"Analyze the two technical options and respond with ONLY a valid JSON object with "mode": "compare" that matches this JSON Schema:

{schema}

You MUST return exactly 3 evidence items.
Evidence A must strongly favor the winner.
Evidence B must moderately favor the winner.
Evidence C must compare both options.
At least one evidence item MUST be a Strong Advantage.
The winner MUST be exactly "Option A" or "Option B".
Responses that violate these rules are INVALID.

Consider hackathon constraints: time pressure, team skills, demo requirements. Focus on practical implementation within the given timeframe."#;

const ADVISORY_RULES: &str = r#"Recommend a technology stack and respond with ONLY a valid JSON object with "mode": "advisory" that matches this JSON Schema:

{schema}

You MUST return exactly 3 evidence items.
Each evidence item must include id (A, B, C), title, explanation, and beneficiary.
The beneficiary must always be the recommended stack name.
At least one evidence item must carry the "Strong Advantage" tier.
List at least 3 rejectedAlternatives.
Responses with fewer than 3 evidence items are INVALID.

Consider hackathon constraints: time pressure, team skills, demo requirements. Recommend proven technologies that can deliver results quickly."#;

/// JSON Schema of the decision contract for `mode`
pub fn decision_schema(mode: Mode) -> RootSchema {
    match mode {
        Mode::Compare => schema_for!(CompareDecision),
        Mode::Advisory => schema_for!(AdvisoryDecision),
    }
}

/// System prompt for a mode and judge
pub fn build_system_prompt(mode: Mode, judge: Judge) -> String {
    let schema = serde_json::to_string_pretty(&decision_schema(mode)).unwrap_or_default();
    let rules = match mode {
        Mode::Compare => COMPARE_RULES,
        Mode::Advisory => ADVISORY_RULES,
    };

    format!(
        "You are Hon. Justice HackCourt, a strict technical judge. {}\n\nYou MUST NOT override judge philosophy unless constraints make it impossible.\n\n{}",
        judge.prompt_philosophy(),
        rules.replace("{schema}", &schema)
    )
}
