//! Error handling for the lensgram HTTP layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

use lensgram_authz::AuthzError;

/// Standard error response format for all HTTP errors
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub code: String,
    pub trace_id: String,
    pub timestamp: String,
}

/// Application error types that map to HTTP responses
#[derive(Error, Debug)]
pub enum AppError {
    #[error("bad request: {message}")]
    BadRequest { message: String, code: String },

    #[error("unauthorized: {message}")]
    Unauthorized { message: String, code: String },

    #[error("forbidden: {message}")]
    Forbidden { message: String, code: String },

    /// An outbound dependency answered with a non-success status. The
    /// upstream status is propagated to the caller unchanged.
    #[error("upstream failure ({status}): {message}")]
    Upstream {
        status: u16,
        message: String,
        code: String,
    },

    /// An outbound dependency answered 2xx but the body lacked an expected
    /// field. Surfaced as 500 even though the root cause is external; this
    /// classification is inherited and kept for compatibility.
    #[error("upstream contract violation: {message}")]
    UpstreamContract { message: String, code: String },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            code: "bad_request".to_string(),
        }
    }

    /// Create an unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
            code: "unauthorized".to_string(),
        }
    }

    /// Create a forbidden error
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
            code: "forbidden".to_string(),
        }
    }

    /// Create an upstream failure carrying the provider's status code
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
            code: "upstream_error".to_string(),
        }
    }

    /// Create an upstream contract violation (missing expected field)
    pub fn upstream_contract(message: impl Into<String>) -> Self {
        Self::UpstreamContract {
            message: message.into(),
            code: "upstream_contract".to_string(),
        }
    }
}

impl From<AuthzError> for AppError {
    fn from(err: AuthzError) -> Self {
        match err {
            AuthzError::Missing | AuthzError::Malformed => {
                AppError::unauthorized(err.to_string())
            }
            AuthzError::Mismatched => AppError::forbidden(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4();
        let timestamp = OffsetDateTime::now_utc().to_string();

        let (status, error_code, message) = match self {
            AppError::BadRequest { message, code } => {
                (StatusCode::BAD_REQUEST, code, message)
            }
            AppError::Unauthorized { message, code } => {
                (StatusCode::UNAUTHORIZED, code, message)
            }
            AppError::Forbidden { message, code } => (StatusCode::FORBIDDEN, code, message),
            AppError::Upstream {
                status,
                message,
                code,
            } => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                code,
                message,
            ),
            AppError::UpstreamContract { message, code } => {
                (StatusCode::INTERNAL_SERVER_ERROR, code, message)
            }
            AppError::Internal(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error".to_string(),
                e.to_string(),
            ),
        };

        tracing::error!(
            error_id = %error_id,
            error_code = %error_code,
            status_code = %status.as_u16(),
            "Request error"
        );

        // In production, hide internal error details
        let message = if cfg!(not(debug_assertions)) && status == StatusCode::INTERNAL_SERVER_ERROR
        {
            "An internal server error occurred".to_string()
        } else {
            message
        };

        let error_response = json!({
            "error": {
                "code": error_code,
                "message": message,
                "trace_id": error_id.to_string(),
                "timestamp": timestamp
            }
        });

        (status, Json(error_response)).into_response()
    }
}
