//! Unified error types and result handling.
//!
//! One error enum covers the whole crate: request validation, the settlement
//! taxonomy (`NotFound`, `NoExpenses`, `AlreadyExists`), access control, and
//! infrastructure failures. The enum also owns its HTTP representation so
//! handlers can bubble errors straight out of `Result` returns.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Validation failed: {message}")]
    Validation { message: String },

    #[error("Invalid amount: {amount}")]
    InvalidAmount { amount: f64 },

    #[error("{entity} not found")]
    NotFound { entity: String },

    #[error("No expenses recorded for period {period}; nothing to liquidate")]
    NoExpenses { period: String },

    #[error("A settlement for period {period} already exists")]
    AlreadyExists { period: String },

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Permission denied: {reason}")]
    Forbidden { reason: String },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error payload returned by every failing endpoint: `{"error": "..."}`.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::Validation { .. } | Error::InvalidAmount { .. } => StatusCode::BAD_REQUEST,
            // Duplicate-period confirms are reported as 400, matching the
            // behavior existing callers depend on (not 409).
            Error::AlreadyExists { .. } => StatusCode::BAD_REQUEST,
            Error::Unauthenticated => StatusCode::UNAUTHORIZED,
            Error::Forbidden { .. } => StatusCode::FORBIDDEN,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            // A period with nothing to liquidate surfaces as a calculation
            // failure, not a client error.
            Error::NoExpenses { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Config { .. } | Error::Database(_) | Error::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Infrastructure details stay in the logs; clients get a generic line.
        let message = match &self {
            Error::Config { .. } | Error::Database(_) | Error::Io(_) => {
                tracing::error!(error = %self, "internal error");
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
