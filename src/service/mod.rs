pub mod arbitration;
pub mod engine;
pub mod llm;
pub mod scoring;
pub mod session;

pub use arbitration::{ArbitrationError, ArbitrationService};
pub use llm::{InferenceClient, LlmClient};
pub use session::DecisionStore;
