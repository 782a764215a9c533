use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("token generation failed: {status} - {body}")]
    UpstreamAuth { status: u16, body: String },

    #[error("API call failed: {status} - {body}")]
    UpstreamUnavailable { status: u16, body: String },

    #[error("API call failed after token refresh: {status} - {body}")]
    RefreshRejected { status: u16, body: String },

    #[error("{0}")]
    EmptyResult(String),

    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to parse upstream response: {0}")]
    MalformedResponse(String),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        AppError::InvalidArgument(msg.into())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidArgument(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, code) = match &self {
            AppError::InvalidArgument(_) => (
                StatusCode::BAD_REQUEST,
                "invalid_request_error",
                "invalid_argument",
            ),
            AppError::EmptyResult(_) => (StatusCode::NOT_FOUND, "not_found_error", "no_data_found"),
            AppError::UpstreamAuth { .. } => (
                StatusCode::BAD_GATEWAY,
                "authentication_error",
                "token_generation_failed",
            ),
            AppError::UpstreamUnavailable { .. } | AppError::RefreshRejected { .. } => {
                (StatusCode::BAD_GATEWAY, "upstream_error", "upstream_failed")
            }
            AppError::Transport(e) => {
                tracing::warn!("Upstream transport error: {}", e);
                (StatusCode::BAD_GATEWAY, "upstream_error", "upstream_unreachable")
            }
            AppError::MalformedResponse(_) => (
                StatusCode::BAD_GATEWAY,
                "upstream_error",
                "malformed_response",
            ),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal_server_error",
                )
            }
        };

        let msg = match &self {
            AppError::Internal(_) => "internal server error".to_string(),
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": {
                "message": msg,
                "type": error_type,
                "code": code,
            }
        }));

        (status, body).into_response()
    }
}
