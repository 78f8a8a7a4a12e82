//! Unified API error handling
//!
//! Every endpoint answers failures with the same JSON body.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use uuid::Uuid;

use crate::service::ArbitrationError;

/// Standard error response format
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error type/code
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Unique request ID for tracing
    pub request_id: String,
}

/// Unified API error type
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Malformed or incomplete case (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Internal invariant broken (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    fn error_type(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "not_found",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let request_id = Uuid::new_v4().to_string();

        if status.is_server_error() {
            tracing::error!(
                error_type = self.error_type(),
                status = status.as_u16(),
                request_id = %request_id,
                message = %self,
                "API error"
            );
        } else {
            tracing::debug!(
                error_type = self.error_type(),
                status = status.as_u16(),
                request_id = %request_id,
                message = %self,
                "API error"
            );
        }

        HttpResponse::build(status).json(ErrorResponse {
            error: self.error_type().to_string(),
            message: self.to_string(),
            request_id,
        })
    }
}

impl From<ArbitrationError> for ApiError {
    fn from(err: ArbitrationError) -> Self {
        match err {
            ArbitrationError::InvariantViolation { .. } => ApiError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Judge, Mode};
    use crate::service::arbitration::contract::ContractViolation;
    use actix_web::body::to_bytes;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::BadRequest("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_invariant_violation_maps_to_internal() {
        let err = ArbitrationError::InvariantViolation {
            mode: Mode::Advisory,
            judge: Judge::Innovation,
            violation: ContractViolation::EvidenceCount(2),
        };
        assert!(matches!(ApiError::from(err), ApiError::Internal(_)));
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = ApiError::NotFound("precedent 'nope'".into()).error_response();
        let body = to_bytes(response.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(value["error"], "not_found");
        assert_eq!(value["message"], "Resource not found: precedent 'nope'");
        assert!(Uuid::parse_str(value["request_id"].as_str().unwrap()).is_ok());
    }
}
