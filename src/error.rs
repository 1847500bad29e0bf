//! Application error type and HTTP response mapping.
//!
//! [`AppError`] is the single error type crossing layer boundaries. Handlers
//! return it directly; the [`IntoResponse`] impl is the one place where the
//! error taxonomy is translated into status codes and JSON bodies:
//!
//! - validation failures -> 400
//! - unknown short code -> 404
//! - duplicate short code -> 409
//! - rate-limit block -> 429 with `Retry-After`
//! - missing shard row, store faults -> 500
//!
//! Cache and rate-limiter backend faults never become an `AppError`: those
//! subsystems fail open and keep their own error types
//! ([`crate::infrastructure::cache::CacheError`],
//! [`crate::infrastructure::rate_limit::RateLimitError`]).

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

#[derive(Debug)]
pub enum AppError {
    Validation { message: String, details: Value },
    NotFound { message: String, details: Value },
    Conflict { message: String, details: Value },
    /// A shard counter row is missing. This is a deployment misconfiguration,
    /// never retried and never absorbed.
    ShardNotFound { shard_index: i32 },
    /// Caller exceeded the request quota and is inside a block window.
    RateLimited { retry_after_secs: u64 },
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// A short message for analytics payloads and logs.
    pub fn summary(&self) -> String {
        match self {
            Self::Validation { message, .. }
            | Self::NotFound { message, .. }
            | Self::Conflict { message, .. }
            | Self::Internal { message, .. } => message.clone(),
            Self::ShardNotFound { shard_index } => {
                format!("Shard counter {} not found", shard_index)
            }
            Self::RateLimited { .. } => "Too many requests".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::Conflict { message, details } => {
                (StatusCode::CONFLICT, "conflict", message, details)
            }
            AppError::ShardNotFound { shard_index } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "shard_not_found",
                "Shard counter misconfigured".to_string(),
                json!({ "shard_index": shard_index }),
            ),
            AppError::RateLimited { retry_after_secs } => {
                let body = ErrorBody {
                    error: ErrorInfo {
                        code: "rate_limited",
                        message: "Too many requests from this client, please try again later"
                            .to_string(),
                        details: json!({ "retry_after_secs": retry_after_secs }),
                    },
                };
                return (
                    StatusCode::TOO_MANY_REQUESTS,
                    [(header::RETRY_AFTER, retry_after_secs.to_string())],
                    Json(body),
                )
                    .into_response();
            }
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message,
                details,
            ),
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Maps database errors to the taxonomy. A unique violation on the links
/// code column is a caller-visible conflict; everything else is an opaque
/// store fault.
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error() {
        if db.is_unique_violation() && db.constraint() == Some("links_code_key") {
            return AppError::conflict("Short code already exists", json!({}));
        }
        if db.is_unique_violation() {
            return AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }
    }

    tracing::error!("Database error: {e}");
    AppError::internal("Database error", json!({}))
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::bad_request(
            "Request validation failed",
            serde_json::to_value(&e).unwrap_or_else(|_| json!({})),
        )
    }
}
