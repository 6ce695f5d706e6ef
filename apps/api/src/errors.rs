use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("LLM error: {0}")]
    Llm(String),

    /// The completion service refused the call because the API quota is spent.
    #[error("AI quota exceeded: {0}")]
    AiQuotaExceeded(String),

    /// The completion service is not available from the caller's region.
    #[error("AI service unavailable in this region: {0}")]
    AiRegionBlocked(String),
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::QuotaExceeded(msg) => AppError::AiQuotaExceeded(msg),
            LlmError::RegionBlocked(msg) => AppError::AiRegionBlocked(msg),
            other => AppError::Llm(other.to_string()),
        }
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_ERROR",
                    "The AI assistant could not complete the request".to_string(),
                )
            }
            AppError::AiQuotaExceeded(msg) => {
                tracing::warn!("AI quota exceeded: {msg}");
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    "AI_QUOTA_EXCEEDED",
                    "The AI assistant has reached its usage quota, try again later".to_string(),
                )
            }
            AppError::AiRegionBlocked(msg) => {
                tracing::warn!("AI region blocked: {msg}");
                (
                    StatusCode::UNAVAILABLE_FOR_LEGAL_REASONS,
                    "AI_REGION_BLOCKED",
                    "The AI assistant is not available from your network region".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
