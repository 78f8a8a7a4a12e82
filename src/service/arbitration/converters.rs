//! Conversion from validated candidates to typed decisions

use crate::model::{
    Advantage, AdvisoryDecision, CandidateDecision, CandidateEvidence, CandidateWarning,
    CompareDecision, Confidence, Decision, EvidenceItem, Mode, Severity, Warning, Winner,
};

/// Build the typed decision for `mode`, or `None` when a required field is absent
pub fn into_decision(candidate: CandidateDecision, mode: Mode) -> Option<Decision> {
    match mode {
        Mode::Compare => into_compare(candidate).map(Decision::Compare),
        Mode::Advisory => into_advisory(candidate).map(Decision::Advisory),
    }
}

fn into_compare(candidate: CandidateDecision) -> Option<CompareDecision> {
    Some(CompareDecision {
        winner: Winner::from_canonical(candidate.winner.as_deref()?)?,
        confidence: Confidence::parse(candidate.confidence.as_deref()?)?,
        reasoning: candidate.reasoning?,
        evidence: convert_evidence(candidate.evidence?)?,
        warning: candidate.warning.and_then(convert_warning),
    })
}

fn into_advisory(candidate: CandidateDecision) -> Option<AdvisoryDecision> {
    let stack_name = candidate.stack_name?;

    Some(AdvisoryDecision {
        stack_description: Some(format!("AI-recommended stack: {}", stack_name)),
        confidence: Some(
            candidate
                .confidence
                .as_deref()
                .and_then(Confidence::parse)
                .unwrap_or(Confidence::Medium),
        ),
        stack: candidate.stack?,
        reasoning: candidate.reasoning?,
        evidence: convert_evidence(candidate.evidence?)?,
        rejected_alternatives: candidate.rejected_alternatives?,
        warning: candidate.warning.and_then(convert_warning),
        stack_name,
    })
}

fn convert_evidence(items: Vec<CandidateEvidence>) -> Option<Vec<EvidenceItem>> {
    items
        .into_iter()
        .map(|item| {
            Some(EvidenceItem {
                id: item.id?,
                title: item.title?,
                explanation: item.explanation?,
                beneficiary: item.beneficiary?,
                advantage: item.advantage.as_deref().and_then(Advantage::parse),
            })
        })
        .collect()
}

fn convert_warning(warning: CandidateWarning) -> Option<Warning> {
    Some(Warning {
        severity: Severity::parse(warning.severity.as_deref()?)?,
        reason: warning.reason?,
        recommendation: warning.recommendation,
    })
}
