//! Mode contract guard
//!
//! Run on every decision before it is accepted, whichever path produced it.
//! The mode split itself is enforced by [`Decision`]; this guard checks the
//! requested mode against the variant and the cardinality rules the type
//! system cannot express.

use thiserror::Error;

use crate::model::{
    AdvisoryDecision, CompareDecision, Decision, EVIDENCE_COUNT, EvidenceItem,
    MIN_REJECTED_ALTERNATIVES, Mode, Winner, evidence_id,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ContractViolation {
    #[error("Expected a {expected:?} decision, found {found:?}")]
    ModeMismatch { expected: Mode, found: Mode },

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Expected {expected} evidence items, found {0}", expected = EVIDENCE_COUNT)]
    EvidenceCount(usize),

    #[error("Evidence ids must be A, B, C in order, found {0:?}")]
    EvidenceIds(Vec<String>),

    #[error("Evidence {id} benefits '{beneficiary}' instead of the recommended stack")]
    BeneficiaryMismatch { id: String, beneficiary: String },

    #[error("Expected at least {min} rejected alternatives, found {0}", min = MIN_REJECTED_ALTERNATIVES)]
    TooFewRejectedAlternatives(usize),

    #[error("Advisory decision names compare winner '{0}'")]
    CompareWinnerInAdvisory(String),
}

/// Check that `decision` is a complete decision of the requested mode
pub fn check_contract(mode: Mode, decision: &Decision) -> Result<(), ContractViolation> {
    match (mode, decision) {
        (Mode::Compare, Decision::Compare(d)) => check_compare(d),
        (Mode::Advisory, Decision::Advisory(d)) => check_advisory(d),
        (Mode::Compare, Decision::Advisory(_)) | (Mode::Advisory, Decision::Compare(_)) => {
            Err(ContractViolation::ModeMismatch {
                expected: mode,
                found: decision.mode(),
            })
        }
    }
}

fn check_compare(decision: &CompareDecision) -> Result<(), ContractViolation> {
    if decision.reasoning.trim().is_empty() {
        return Err(ContractViolation::MissingField("reasoning"));
    }
    check_evidence(&decision.evidence)
}

fn check_advisory(decision: &AdvisoryDecision) -> Result<(), ContractViolation> {
    let stack_name = decision.stack_name.trim();
    if stack_name.is_empty() {
        return Err(ContractViolation::MissingField("stackName"));
    }
    if Winner::from_canonical(stack_name).is_some() {
        return Err(ContractViolation::CompareWinnerInAdvisory(stack_name.to_string()));
    }
    if decision.stack.is_empty() {
        return Err(ContractViolation::MissingField("stack"));
    }
    if decision.reasoning.trim().is_empty() {
        return Err(ContractViolation::MissingField("reasoning"));
    }

    check_evidence(&decision.evidence)?;

    if let Some(item) = decision
        .evidence
        .iter()
        .find(|item| item.beneficiary != decision.stack_name)
    {
        return Err(ContractViolation::BeneficiaryMismatch {
            id: item.id.clone(),
            beneficiary: item.beneficiary.clone(),
        });
    }

    if decision.rejected_alternatives.len() < MIN_REJECTED_ALTERNATIVES {
        return Err(ContractViolation::TooFewRejectedAlternatives(
            decision.rejected_alternatives.len(),
        ));
    }

    Ok(())
}

fn check_evidence(evidence: &[EvidenceItem]) -> Result<(), ContractViolation> {
    if evidence.len() != EVIDENCE_COUNT {
        return Err(ContractViolation::EvidenceCount(evidence.len()));
    }

    let dense = evidence
        .iter()
        .enumerate()
        .all(|(i, item)| item.id == evidence_id(i));
    if !dense {
        return Err(ContractViolation::EvidenceIds(
            evidence.iter().map(|item| item.id.clone()).collect(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Advantage, Confidence};

    fn evidence(beneficiary: &str) -> Vec<EvidenceItem> {
        (0..3)
            .map(|i| EvidenceItem {
                id: evidence_id(i),
                title: format!("Point {}", i),
                explanation: "Explanation".to_string(),
                beneficiary: beneficiary.to_string(),
                advantage: Some(Advantage::Winner),
            })
            .collect()
    }

    fn compare() -> CompareDecision {
        CompareDecision {
            winner: Winner::OptionA,
            confidence: Confidence::High,
            reasoning: "Flask is the safer bet.".to_string(),
            evidence: evidence("Option A"),
            warning: None,
        }
    }

    fn advisory() -> AdvisoryDecision {
        AdvisoryDecision {
            stack_name: "Rapid Prototype Stack".to_string(),
            stack: vec!["Static HTML".to_string(), "Serverless".to_string()],
            stack_description: None,
            confidence: None,
            reasoning: "Ship fast.".to_string(),
            evidence: evidence("Rapid Prototype Stack"),
            rejected_alternatives: vec!["a".into(), "b".into(), "c".into()],
            warning: None,
        }
    }

    #[test]
    fn test_valid_decisions_pass() {
        assert!(check_contract(Mode::Compare, &Decision::Compare(compare())).is_ok());
        assert!(check_contract(Mode::Advisory, &Decision::Advisory(advisory())).is_ok());
    }

    #[test]
    fn test_mode_mismatch_is_rejected() {
        assert_eq!(
            check_contract(Mode::Advisory, &Decision::Compare(compare())),
            Err(ContractViolation::ModeMismatch {
                expected: Mode::Advisory,
                found: Mode::Compare
            })
        );
        assert!(check_contract(Mode::Compare, &Decision::Advisory(advisory())).is_err());
    }

    #[test]
    fn test_evidence_cardinality_and_ids() {
        let mut short = compare();
        short.evidence.pop();
        assert_eq!(
            check_contract(Mode::Compare, &Decision::Compare(short)),
            Err(ContractViolation::EvidenceCount(2))
        );

        let mut shuffled = compare();
        shuffled.evidence.swap(0, 2);
        assert!(matches!(
            check_contract(Mode::Compare, &Decision::Compare(shuffled)),
            Err(ContractViolation::EvidenceIds(_))
        ));
    }

    #[test]
    fn test_advisory_compare_literal_is_contamination() {
        let mut decision = advisory();
        decision.stack_name = "Option B".to_string();
        assert_eq!(
            check_contract(Mode::Advisory, &Decision::Advisory(decision)),
            Err(ContractViolation::CompareWinnerInAdvisory("Option B".to_string()))
        );
    }

    #[test]
    fn test_advisory_beneficiary_and_alternatives() {
        let mut stray = advisory();
        stray.evidence[1].beneficiary = "Option A".to_string();
        assert!(matches!(
            check_contract(Mode::Advisory, &Decision::Advisory(stray)),
            Err(ContractViolation::BeneficiaryMismatch { .. })
        ));

        let mut few = advisory();
        few.rejected_alternatives.truncate(2);
        assert_eq!(
            check_contract(Mode::Advisory, &Decision::Advisory(few)),
            Err(ContractViolation::TooFewRejectedAlternatives(2))
        );
    }

    #[test]
    fn test_missing_stack_and_reasoning() {
        let mut empty_stack = advisory();
        empty_stack.stack.clear();
        assert_eq!(
            check_contract(Mode::Advisory, &Decision::Advisory(empty_stack)),
            Err(ContractViolation::MissingField("stack"))
        );

        let mut blank = compare();
        blank.reasoning = "  ".to_string();
        assert_eq!(
            check_contract(Mode::Compare, &Decision::Compare(blank)),
            Err(ContractViolation::MissingField("reasoning"))
        );
    }
}
