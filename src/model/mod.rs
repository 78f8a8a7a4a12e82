pub mod candidate;
pub mod case;
pub mod config;
pub mod decision;
pub mod judge;
pub mod precedent;

pub use candidate::{CandidateDecision, CandidateEvidence, CandidateWarning};
pub use case::{
    CaseContent, CasePayload, Judge, Mode, PrimaryGoal, ProjectContext, SkillLevel, TeamSize,
};
pub use config::{Config, InferenceConfig};
pub use decision::*;
