//! Validation of normalized inference replies
//!
//! Pass/fail only. Repair belongs to the normalizer, which always runs first.

use crate::model::{
    Advantage, CandidateDecision, CandidateEvidence, Confidence, EVIDENCE_COUNT,
    MIN_REJECTED_ALTERNATIVES, Mode, Winner,
};

/// Result of candidate validation
#[derive(Debug)]
pub struct ValidationResult {
    /// Whether the candidate passed validation
    pub is_valid: bool,
    /// Violations that make the candidate unusable
    pub errors: Vec<String>,
    /// Quality issues that do not block acceptance
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, error: String) {
        self.is_valid = false;
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }
}

/// Validate a normalized candidate against the contract of `mode`
pub fn validate_candidate(candidate: &CandidateDecision, mode: Mode) -> ValidationResult {
    let mut result = ValidationResult::valid();

    if candidate.mode.as_deref() != Some(mode.as_str()) {
        result.add_error(format!(
            "Candidate mode {:?} does not match requested mode '{}'",
            candidate.mode,
            mode.as_str()
        ));
    }

    match mode {
        Mode::Compare => validate_compare(candidate, &mut result),
        Mode::Advisory => validate_advisory(candidate, &mut result),
    }

    result
}

fn validate_compare(candidate: &CandidateDecision, result: &mut ValidationResult) {
    match candidate.winner.as_deref() {
        None => result.add_error("Missing required field: winner".to_string()),
        Some(winner) if Winner::from_canonical(winner).is_none() => {
            result.add_error(format!("Invalid winner value '{}'", winner))
        }
        Some(_) => {}
    }

    match candidate.confidence.as_deref() {
        None => result.add_error("Missing required field: confidence".to_string()),
        Some(confidence) if Confidence::parse(confidence).is_none() => {
            result.add_error(format!("Invalid confidence value '{}'", confidence))
        }
        Some(_) => {}
    }

    if candidate.reasoning.is_none() {
        result.add_error("Missing required field: reasoning".to_string());
    }

    let evidence = validate_evidence(candidate.evidence.as_deref(), result);
    for item in evidence {
        if let Some(beneficiary) = item.beneficiary.as_deref()
            && !matches!(beneficiary, "Option A" | "Option B" | "Both")
        {
            result.add_warning(format!(
                "Evidence {} names unexpected beneficiary '{}'",
                item.id.as_deref().unwrap_or("?"),
                beneficiary
            ));
        }
    }

    if !candidate.advisory_keys.is_empty() {
        result.add_error(format!(
            "Advisory contamination in compare reply: {}",
            candidate.advisory_keys.join(", ")
        ));
    }
}

fn validate_advisory(candidate: &CandidateDecision, result: &mut ValidationResult) {
    if candidate.stack_name.is_none() {
        result.add_error("Missing required field: stackName".to_string());
    }

    match candidate.stack.as_deref() {
        None | Some([]) => result.add_error("Missing required field: stack".to_string()),
        Some([_]) => result.add_warning("Stack lists a single component".to_string()),
        Some(_) => {}
    }

    if candidate.reasoning.is_none() {
        result.add_error("Missing required field: reasoning".to_string());
    }

    let evidence = validate_evidence(candidate.evidence.as_deref(), result);

    if let Some(winner) = candidate.winner.as_deref()
        && Winner::from_canonical(winner).is_some()
    {
        result.add_error(format!("Compare contamination in advisory reply: winner '{}'", winner));
    }

    let rejected = candidate
        .rejected_alternatives
        .as_ref()
        .map_or(0, |list| list.len());
    if rejected < MIN_REJECTED_ALTERNATIVES {
        result.add_error(format!(
            "Advisory reply needs at least {} rejected alternatives, found {}",
            MIN_REJECTED_ALTERNATIVES, rejected
        ));
    }

    if evidence.len() != EVIDENCE_COUNT {
        result.add_error(format!(
            "Advisory reply needs exactly {} evidence items, found {}",
            EVIDENCE_COUNT,
            evidence.len()
        ));
    }

    let decisive = evidence.iter().any(|item| {
        item.advantage
            .as_deref()
            .and_then(Advantage::parse)
            .is_some_and(|tier| tier.is_strong())
    });
    if !decisive {
        result.add_error("Advisory reply has no Strong Advantage evidence".to_string());
    }
}

/// Check evidence item structure, returning the items for further checks
fn validate_evidence<'a>(
    evidence: Option<&'a [CandidateEvidence]>,
    result: &mut ValidationResult,
) -> &'a [CandidateEvidence] {
    let Some(evidence) = evidence.filter(|items| !items.is_empty()) else {
        result.add_error("Missing required field: evidence".to_string());
        return &[];
    };

    for (i, item) in evidence.iter().enumerate() {
        let mut missing = Vec::new();
        if item.id.is_none() {
            missing.push("id");
        }
        if item.title.is_none() {
            missing.push("title");
        }
        if item.explanation.is_none() {
            missing.push("explanation");
        }
        if !missing.is_empty() {
            result.add_error(format!(
                "Evidence item {} is missing {}",
                i + 1,
                missing.join(", ")
            ));
        }
    }

    evidence
}
