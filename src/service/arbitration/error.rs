//! Error types for decision arbitration

use std::time::Duration;

use thiserror::Error;

use crate::model::candidate::CandidateError;
use crate::model::{Judge, Mode};
use crate::service::arbitration::contract::ContractViolation;
use crate::service::llm::LlmError;

/// Why the AI path was abandoned for a case
///
/// Always recovered by the deterministic engine and never returned to callers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AiPathFailure {
    #[error("No inference credential configured")]
    Disabled,

    #[error("Inference call exceeded {0:?}")]
    Timeout(Duration),

    #[error("Inference call failed: {0}")]
    Transport(#[from] LlmError),

    #[error("Failed to encode case payload: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Malformed reply: {0}")]
    MalformedReply(#[from] CandidateError),

    #[error("Reply rejected by validation: {}", .0.join("; "))]
    Invalid(Vec<String>),

    #[error("Reply carries {0} evidence items after validation")]
    EvidenceCount(usize),

    #[error("Reply breaks the mode contract: {0}")]
    Contract(#[from] ContractViolation),
}

/// Errors surfaced by arbitration
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ArbitrationError {
    /// The deterministic engine produced a decision that fails its own contract
    #[error("Deterministic {mode:?} decision for {judge:?} violates its contract: {violation}")]
    InvariantViolation {
        mode: Mode,
        judge: Judge,
        violation: ContractViolation,
    },
}
