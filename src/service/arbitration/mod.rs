//! Decision arbitration
//!
//! One AI attempt per case, then the deterministic engine. The AI path is a
//! best-effort enhancement: every failure on it is logged and recovered
//! locally. Only a deterministic decision that breaks its own contract is
//! reported to the caller.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::model::{
    CandidateDecision, CaseContent, CasePayload, Confidence, Decision, DecisionRecord,
    DecisionSource, EVIDENCE_COUNT, Judge, Mode, Severity, Warning,
};
use crate::service::engine::compare::TRADE_OFF_WARNING;
use crate::service::engine::{AdvisoryEngine, CompareEngine};
use crate::service::llm::InferenceClient;

pub mod contract;
pub mod converters;
pub mod error;
pub mod normalize;
pub mod prompts;
pub mod validation;

pub use contract::check_contract;
pub use error::{AiPathFailure, ArbitrationError};

use converters::into_decision;
use normalize::normalize;
use prompts::build_system_prompt;
use validation::validate_candidate;

const SCOPE_WARNING: &str =
    "The recommended stack may require careful scope control to avoid overextension.";

/// Stack terms that signal a heavy setup for short projects
const COMPLEX_STACK_TERMS: [&str; 4] = ["typescript", "react", "vue", "angular"];

/// Longest project, in hours, for which complex stacks get a scope warning
const SCOPE_WARNING_MAX_HOURS: u32 = 36;

/// Orchestrates the AI attempt and the deterministic fallback
pub struct ArbitrationService {
    client: Option<Arc<dyn InferenceClient>>,
    timeout: Duration,
}

impl ArbitrationService {
    /// Without a client every case goes straight to the deterministic engine
    pub fn new(client: Option<Arc<dyn InferenceClient>>, timeout: Duration) -> Self {
        match &client {
            Some(client) => tracing::info!(
                model = %client.model(),
                timeout_ms = timeout.as_millis(),
                "Arbitration service initialized with inference"
            ),
            None => tracing::info!("No inference credential, arbitration is deterministic only"),
        }

        Self { client, timeout }
    }

    pub fn inference_enabled(&self) -> bool {
        self.client.is_some()
    }

    /// Arbitrate one case
    ///
    /// Each call is an independent run. The result always satisfies the mode
    /// contract of the payload.
    pub async fn arbitrate(&self, payload: &CasePayload) -> Result<DecisionRecord, ArbitrationError> {
        let start_time = Instant::now();
        let mode = payload.mode();
        let judge = payload.judge;

        let (source, decision) = match self.attempt_ai(payload).await {
            Ok(decision) => (DecisionSource::Ai, decision),
            Err(AiPathFailure::Disabled) => {
                tracing::debug!(mode = mode.as_str(), judge = judge.as_str(), "AI path disabled");
                (DecisionSource::Deterministic, deterministic(payload)?)
            }
            Err(failure) => {
                tracing::warn!(
                    mode = mode.as_str(),
                    judge = judge.as_str(),
                    reason = %failure,
                    "AI path failed, falling back to deterministic engine"
                );
                (DecisionSource::Deterministic, deterministic(payload)?)
            }
        };

        let record = DecisionRecord::new(source, judge, decision);

        tracing::info!(
            id = %record.id,
            source = ?record.source,
            mode = mode.as_str(),
            judge = judge.as_str(),
            elapsed_ms = start_time.elapsed().as_millis(),
            "Case arbitrated"
        );

        Ok(record)
    }

    async fn attempt_ai(&self, payload: &CasePayload) -> Result<Decision, AiPathFailure> {
        let client = self.client.as_ref().ok_or(AiPathFailure::Disabled)?;
        let mode = payload.mode();

        let system = build_system_prompt(mode, payload.judge);
        let user = serde_json::to_string(payload)?;

        let start_time = Instant::now();
        let reply = tokio::time::timeout(self.timeout, client.complete(&system, &user))
            .await
            .map_err(|_| AiPathFailure::Timeout(self.timeout))??;

        tracing::debug!(
            model = %client.model(),
            elapsed_ms = start_time.elapsed().as_millis(),
            reply_length = reply.len(),
            "Inference reply received"
        );

        let candidate = normalize(CandidateDecision::parse_reply(&reply)?, payload);

        let validation = validate_candidate(&candidate, mode);
        for warning in &validation.warnings {
            tracing::debug!(mode = mode.as_str(), warning = %warning, "Candidate quality warning");
        }
        if !validation.is_valid {
            return Err(AiPathFailure::Invalid(validation.errors));
        }

        let mut decision = into_decision(candidate, mode).ok_or_else(|| {
            AiPathFailure::Invalid(vec!["Validated candidate could not be converted".to_string()])
        })?;

        let evidence_count = decision.evidence().len();
        if evidence_count != EVIDENCE_COUNT {
            return Err(AiPathFailure::EvidenceCount(evidence_count));
        }

        check_contract(mode, &decision)?;

        if decision.warning().is_none() {
            synthesize_warning(&mut decision, payload);
        }

        Ok(decision)
    }
}

/// Run the deterministic engine for the payload and guard its output
pub fn deterministic(payload: &CasePayload) -> Result<Decision, ArbitrationError> {
    let decision = match &payload.content {
        CaseContent::Compare {
            options: [option_a, option_b],
        } => Decision::Compare(CompareEngine::decide(
            &payload.context,
            payload.judge,
            option_a,
            option_b,
        )),
        CaseContent::Advisory { .. } => {
            Decision::Advisory(AdvisoryEngine::decide(&payload.context, payload.judge))
        }
    };

    guard_deterministic(payload.mode(), payload.judge, decision)
}

fn guard_deterministic(
    mode: Mode,
    judge: Judge,
    decision: Decision,
) -> Result<Decision, ArbitrationError> {
    match check_contract(mode, &decision) {
        Ok(()) => Ok(decision),
        Err(violation) => {
            tracing::error!(
                mode = mode.as_str(),
                judge = judge.as_str(),
                violation = %violation,
                "Deterministic decision violates its contract"
            );
            Err(ArbitrationError::InvariantViolation {
                mode,
                judge,
                violation,
            })
        }
    }
}

/// Attach a low-severity warning to an accepted AI decision when a risk heuristic fires
fn synthesize_warning(decision: &mut Decision, payload: &CasePayload) {
    match decision {
        Decision::Compare(d) => {
            if matches!(d.confidence, Confidence::Medium | Confidence::Low) {
                d.warning = Some(Warning::new(Severity::Low, TRADE_OFF_WARNING));
            }
        }
        Decision::Advisory(d) => {
            let complex = d.stack.iter().any(|component| {
                let component = component.to_lowercase();
                COMPLEX_STACK_TERMS.iter().any(|term| component.contains(term))
            });
            if payload.context.duration <= SCOPE_WARNING_MAX_HOURS && complex {
                d.warning = Some(Warning::new(Severity::Low, SCOPE_WARNING));
            }
        }
    }
}
