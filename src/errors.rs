use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("token exchange rejected")]
    Auth,

    #[error("upstream returned {status}")]
    Upstream { status: StatusCode, body: String },

    #[error("upstream unreachable: {0}")]
    Connection(String),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Auth => error_body(
                StatusCode::UNAUTHORIZED,
                "authentication_error",
                "token_exchange_failed",
                "could not authenticate with the content API".to_string(),
            ),
            // Pass-through: the caller sees exactly what the upstream said.
            AppError::Upstream { status, body } => (status, body).into_response(),
            AppError::Connection(e) => {
                tracing::warn!("upstream unreachable: {}", e);
                error_body(
                    StatusCode::SERVICE_UNAVAILABLE,
                    "connection_error",
                    "upstream_unreachable",
                    "content API is unreachable".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("internal error: {}", e);
                error_body(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal_server_error",
                    "internal server error".to_string(),
                )
            }
        }
    }
}

fn error_body(status: StatusCode, error_type: &str, code: &str, msg: String) -> Response {
    let body = Json(json!({
        "error": {
            "message": msg,
            "type": error_type,
            "code": code,
        }
    }));
    (status, body).into_response()
}
