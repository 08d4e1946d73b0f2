#![allow(dead_code)]

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::import::ImportError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Import(e) => import_response(e),
            AppError::Llm(e) => llm_response(e),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

/// Maps pipeline failures to the user-facing taxonomy. Messages stay
/// actionable (re-upload vs reconfigure); diagnostic detail is logged here
/// and nowhere reaches the client — in particular, never the API key.
fn import_response(error: &ImportError) -> (StatusCode, &'static str, String) {
    match error {
        ImportError::Validation(msg) => {
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
        }
        ImportError::Extraction(msg) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "EXTRACTION_ERROR",
            msg.clone(),
        ),
        ImportError::Llm(e) => llm_response(e),
        ImportError::Parse => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "PARSE_ERROR",
            error.to_string(),
        ),
        ImportError::MalformedData(detail) => {
            tracing::warn!("malformed extraction payload: {detail}");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                "MALFORMED_EXTRACTION",
                "The AI reply could not be read as profile data. Try uploading again.".to_string(),
            )
        }
        ImportError::Cancelled => (
            StatusCode::BAD_REQUEST,
            "CANCELLED",
            "Import cancelled".to_string(),
        ),
    }
}

fn llm_response(error: &LlmError) -> (StatusCode, &'static str, String) {
    let status = match error {
        LlmError::NotConfigured => StatusCode::BAD_REQUEST,
        LlmError::UnsupportedProvider(_) => StatusCode::BAD_REQUEST,
        LlmError::Auth { .. } => StatusCode::BAD_REQUEST,
        LlmError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        LlmError::Timeout => StatusCode::GATEWAY_TIMEOUT,
        LlmError::Server { .. } | LlmError::Api { .. } | LlmError::Http(_) => {
            StatusCode::BAD_GATEWAY
        }
    };
    let code = match error {
        LlmError::NotConfigured => "CONFIGURATION_ERROR",
        LlmError::UnsupportedProvider(_) => "UNSUPPORTED_PROVIDER",
        LlmError::Auth { .. } => "INVALID_API_KEY",
        LlmError::RateLimited => "RATE_LIMITED",
        LlmError::Timeout => "PROVIDER_TIMEOUT",
        LlmError::Server { .. } | LlmError::Api { .. } | LlmError::Http(_) => "PROVIDER_ERROR",
    };
    tracing::warn!("LLM error ({code}): {error}");
    (status, code, error.user_message())
}
