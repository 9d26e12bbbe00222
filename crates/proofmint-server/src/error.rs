//! HTTP error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use proofmint_core::{ErrorKind, ProofMintError};
use proofmint_store::StoreError;

/// Error returned by every handler
#[derive(Debug)]
pub enum ApiError {
    /// Rejected by the registry
    Registry(ProofMintError),

    /// Mutating request without `X-Caller-Address`
    MissingCaller,

    BadRequest(String),

    NotFound(String),

    Storage(String),
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            ApiError::Registry(err) => {
                let status = if err.is_not_found() {
                    StatusCode::NOT_FOUND
                } else {
                    match err.kind() {
                        ErrorKind::Authorization => StatusCode::FORBIDDEN,
                        ErrorKind::Validation => StatusCode::BAD_REQUEST,
                        ErrorKind::State => StatusCode::CONFLICT,
                    }
                };
                (status, err.kind().as_str(), err.to_string())
            }
            ApiError::MissingCaller => (
                StatusCode::UNAUTHORIZED,
                "missing_caller",
                "X-Caller-Address header is required".to_string(),
            ),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "invalid_request", msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::Storage(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "storage_error",
                msg.clone(),
            ),
        }
    }
}

impl From<ProofMintError> for ApiError {
    fn from(err: ProofMintError) -> Self {
        ApiError::Registry(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Storage(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, description) = self.parts();

        if status.is_server_error() {
            tracing::error!(%status, error, "{}", description);
        } else {
            tracing::warn!(%status, error, "{}", description);
        }

        (
            status,
            Json(serde_json::json!({
                "error": error,
                "error_description": description,
            })),
        )
            .into_response()
    }
}
