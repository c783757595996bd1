//! Error types and HTTP rendering for the City Explorer service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Body text of the catch-all responder
pub const GENERIC_ERROR_TEXT: &str = "Sorry, something went wrong";

/// Main error type for the City Explorer service
#[derive(Error, Debug)]
pub enum ExplorerError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Upstream API communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Upstream answered, but with nothing usable
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Request parameter validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Location cache (database) errors
    #[error("Database error: {source}")]
    Database {
        #[from]
        source: sqlx::Error,
    },
}

impl ExplorerError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// HTTP status this error is rendered with
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            ExplorerError::Validation { .. } => StatusCode::BAD_REQUEST,
            ExplorerError::NotFound { .. } => StatusCode::NOT_FOUND,
            ExplorerError::Api { .. } => StatusCode::BAD_GATEWAY,
            ExplorerError::Config { .. } | ExplorerError::Database { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get a caller-facing error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ExplorerError::Validation { message } | ExplorerError::NotFound { message } => {
                message.clone()
            }
            ExplorerError::Api { message } => format!("Upstream service failed: {message}"),
            ExplorerError::Config { .. } | ExplorerError::Database { .. } => {
                GENERIC_ERROR_TEXT.to_string()
            }
        }
    }
}

/// JSON body shared by every error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    #[serde(rename = "resText")]
    pub res_text: String,
}

impl ErrorBody {
    /// The fixed body sent for unmatched routes
    #[must_use]
    pub fn generic() -> Self {
        Self {
            status: 500,
            res_text: GENERIC_ERROR_TEXT.to_string(),
        }
    }
}

impl IntoResponse for ExplorerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::error!(status = status.as_u16(), "Request failed: {}", self);
        let body = ErrorBody {
            status: status.as_u16(),
            res_text: self.user_message(),
        };
        (status, Json(body)).into_response()
    }
}
