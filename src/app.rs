//! Application state and service initialization
//!
//! Builds the dependency graph once at startup. Handlers receive it through
//! `web::Data<AppState>`.

use std::sync::Arc;

use crate::model::Config;
use crate::service::llm::LlmError;
use crate::service::{ArbitrationService, DecisionStore, InferenceClient, LlmClient};

/// Application state shared by all workers
pub struct AppState {
    /// AI attempt plus deterministic fallback
    pub arbitration: Arc<ArbitrationService>,
    /// Latest decision per mode and judge for this session
    pub store: Arc<DecisionStore>,
}

impl AppState {
    /// Initialize all services and build application state
    ///
    /// A missing inference credential is not an error: the arbitration service
    /// is then built without a client and decides deterministically.
    pub fn new(config: Config) -> Result<Self, AppError> {
        let client = LlmClient::from_config(&config.inference)?
            .map(|client| Arc::new(client) as Arc<dyn InferenceClient>);

        let arbitration = ArbitrationService::new(client, config.inference.timeout);

        Ok(Self::with_services(arbitration, DecisionStore::new()))
    }

    /// Assemble state from already-built services
    pub fn with_services(arbitration: ArbitrationService, store: DecisionStore) -> Self {
        Self {
            arbitration: Arc::new(arbitration),
            store: Arc::new(store),
        }
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    /// The inference HTTP client could not be constructed
    #[error("Inference client initialization failed: {0}")]
    InferenceInit(#[from] LlmError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::InferenceConfig;

    #[test]
    fn test_state_without_credential_is_deterministic() {
        let state = AppState::new(Config::default()).unwrap();
        assert!(!state.arbitration.inference_enabled());
    }

    #[test]
    fn test_state_with_credential_enables_inference() {
        let config = Config {
            inference: InferenceConfig {
                api_key: Some("gsk-test".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let state = AppState::new(config).unwrap();
        assert!(state.arbitration.inference_enabled());
    }
}
