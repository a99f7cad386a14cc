//! Error handling module for the quiz frontend.
//!
//! One error type covers local validation, transport failures, backend HTTP
//! statuses and the frontend server's own failures. Backend statuses are
//! mapped to fixed user-facing messages; nothing is retried.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const LOCKED: &str = "LOCKED";
    pub const MISSING_TOKEN: &str = "MISSING_TOKEN";
    pub const TRANSPORT_ERROR: &str = "TRANSPORT_ERROR";
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const CONFLICT: &str = "CONFLICT";
    pub const UNPROCESSABLE: &str = "UNPROCESSABLE";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const SERVER_ERROR: &str = "SERVER_ERROR";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
    pub const DATABASE_ERROR: &str = "DATABASE_ERROR";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
}

/// Fixed user-facing messages.
pub mod messages {
    pub const UNREACHABLE: &str = "Unable to reach the server.";
    pub const UNAUTHORIZED: &str = "Authentication required or token invalid/expired.";
    pub const CONFLICT: &str = "Conflict while saving (possible duplicate).";
    pub const UNPROCESSABLE: &str = "Validation error.";
    pub const NOT_FOUND: &str = "Resource not found.";
    pub const SERVER: &str = "Server error.";
    pub const MISSING_TOKEN: &str = "Missing authentication token.";
    pub const LOCKED: &str = "This form is read-only.";
}

/// Application error type.
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Local validation failure, one message per violated rule
    Validation(Vec<String>),
    /// Mutation attempted on a read-only (view mode) or closed modal
    Locked,
    /// No bearer token in client storage nor in the configuration
    MissingToken,
    /// The backend could not be reached
    Transport(String),
    /// HTTP 401 from the backend
    Unauthorized(String),
    /// HTTP 409 from the backend
    Conflict(String),
    /// HTTP 422 from the backend, `detail` echoed verbatim
    Unprocessable(String),
    /// HTTP 404 from the backend, or a missing local resource
    NotFound(String),
    /// Any other non-success status from the backend
    Server { status: u16, message: String },
    /// Database error
    Database(String),
    /// Internal error
    Internal(String),
    /// Bad request
    BadRequest(String),
}

impl AppError {
    /// Single-message validation error.
    pub fn invalid(message: impl Into<String>) -> Self {
        AppError::Validation(vec![message.into()])
    }

    /// Map a non-success backend status and its body to an error.
    pub fn from_status(status: u16, body: &str) -> Self {
        let json: Option<serde_json::Value> = serde_json::from_str(body).ok();

        match status {
            401 => AppError::Unauthorized(messages::UNAUTHORIZED.to_string()),
            404 => AppError::NotFound(messages::NOT_FOUND.to_string()),
            409 => AppError::Conflict(messages::CONFLICT.to_string()),
            422 => {
                let detail = json
                    .as_ref()
                    .and_then(|v| v.get("detail"))
                    .map(|d| d.to_string());
                AppError::Unprocessable(detail.unwrap_or_else(|| messages::UNPROCESSABLE.to_string()))
            }
            _ => {
                let message = match &json {
                    Some(serde_json::Value::String(text)) => text.clone(),
                    Some(value) => value
                        .get("message")
                        .and_then(|m| m.as_str())
                        .map(str::to_string)
                        .unwrap_or_else(|| messages::SERVER.to_string()),
                    None if !body.trim().is_empty() => body.trim().to_string(),
                    None => messages::SERVER.to_string(),
                };
                AppError::Server { status, message }
            }
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Locked => StatusCode::FORBIDDEN,
            AppError::MissingToken => StatusCode::UNAUTHORIZED,
            AppError::Transport(_) => StatusCode::BAD_GATEWAY,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Server { .. } => StatusCode::BAD_GATEWAY,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => codes::VALIDATION_ERROR,
            AppError::Locked => codes::LOCKED,
            AppError::MissingToken => codes::MISSING_TOKEN,
            AppError::Transport(_) => codes::TRANSPORT_ERROR,
            AppError::Unauthorized(_) => codes::UNAUTHORIZED,
            AppError::Conflict(_) => codes::CONFLICT,
            AppError::Unprocessable(_) => codes::UNPROCESSABLE,
            AppError::NotFound(_) => codes::NOT_FOUND,
            AppError::Server { .. } => codes::SERVER_ERROR,
            AppError::Database(_) => codes::DATABASE_ERROR,
            AppError::Internal(_) => codes::INTERNAL_ERROR,
            AppError::BadRequest(_) => codes::BAD_REQUEST,
        }
    }

    /// Get the user-facing error message.
    pub fn message(&self) -> String {
        match self {
            AppError::Validation(msgs) => msgs.join(" "),
            AppError::Locked => messages::LOCKED.to_string(),
            AppError::MissingToken => messages::MISSING_TOKEN.to_string(),
            AppError::Transport(msg) => msg.clone(),
            AppError::Unauthorized(msg) => msg.clone(),
            AppError::Conflict(msg) => msg.clone(),
            AppError::Unprocessable(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Server { message, .. } => message.clone(),
            AppError::Database(msg) => msg.clone(),
            AppError::Internal(msg) => msg.clone(),
            AppError::BadRequest(msg) => msg.clone(),
        }
    }

    /// Errors raised before any network call was made.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            AppError::Validation(_) | AppError::Locked | AppError::MissingToken
        )
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database error: {:?}", err);
        AppError::Database(format!("Database error: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            tracing::error!("Invalid backend response: {:?}", err);
            return AppError::Internal(format!("Invalid response from server: {}", err));
        }
        tracing::error!("Backend unreachable: {:?}", err);
        AppError::Transport(messages::UNREACHABLE.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        AppError::BadRequest(format!("JSON error: {}", err))
    }
}

/// Error details in the response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Error response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetails,
}

impl ErrorResponse {
    pub fn new(error: &AppError) -> Self {
        let details = match error {
            AppError::Validation(msgs) => Some(serde_json::json!({ "errors": msgs })),
            AppError::Server { status, .. } => Some(serde_json::json!({ "status": status })),
            _ => None,
        };

        Self {
            success: false,
            error: ErrorDetails {
                code: error.error_code().to_string(),
                message: error.message(),
                details,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse::new(&self);
        (status, Json(body)).into_response()
    }
}
