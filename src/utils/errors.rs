//! Error handling for the group reviews API
//!
//! This module defines the main error types used throughout the application
//! and maps them onto the JSON error envelope returned to clients.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;
use tracing::{error, info};

use crate::handlers::response::ALLOW_ORIGIN;

/// Main error type for the group reviews application
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("{0}")]
    Validation(String),

    #[error("Group not found")]
    GroupNotFound { group_id: i64 },

    #[error("Method not allowed")]
    MethodNotAllowed { method: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
}

/// External analytics provider errors
///
/// Never surfaced as an HTTP error: the `Display` output is what clients see
/// in the `message` field of an unavailable analytics result.
#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("{platform} token not configured")]
    TokenNotConfigured { platform: &'static str },

    #[error("{0}")]
    Provider(String),

    #[error("error: request timed out")]
    Timeout,

    #[error("error: {0}")]
    RequestFailed(String),

    #[error("error: invalid response: {0}")]
    InvalidResponse(String),
}

/// Result type alias for group reviews operations
pub type Result<T> = std::result::Result<T, DirectoryError>;

/// Result type alias for analytics provider calls
pub type AnalyticsResult<T> = std::result::Result<T, AnalyticsError>;

impl From<reqwest::Error> for AnalyticsError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AnalyticsError::Timeout
        } else if e.is_decode() {
            AnalyticsError::InvalidResponse(e.to_string())
        } else {
            AnalyticsError::RequestFailed(e.to_string())
        }
    }
}

impl DirectoryError {
    /// Shorthand for a 400 validation failure
    pub fn validation(message: impl Into<String>) -> Self {
        DirectoryError::Validation(message.into())
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            DirectoryError::Database(_) => ErrorSeverity::Critical,
            DirectoryError::Migration(_) => ErrorSeverity::Critical,
            DirectoryError::Config(_) => ErrorSeverity::Critical,
            DirectoryError::ConfigLoad(_) => ErrorSeverity::Critical,
            DirectoryError::Validation(_) => ErrorSeverity::Info,
            DirectoryError::GroupNotFound { .. } => ErrorSeverity::Info,
            DirectoryError::MethodNotAllowed { .. } => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }

    /// Message safe to hand to API clients
    pub fn public_message(&self) -> String {
        match self {
            DirectoryError::Validation(_)
            | DirectoryError::GroupNotFound { .. }
            | DirectoryError::MethodNotAllowed { .. } => self.to_string(),
            _ => "Internal server error".to_string(),
        }
    }
}

impl ResponseError for DirectoryError {
    fn status_code(&self) -> StatusCode {
        match self {
            DirectoryError::Validation(_) => StatusCode::BAD_REQUEST,
            DirectoryError::GroupNotFound { .. } => StatusCode::NOT_FOUND,
            DirectoryError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self.severity() {
            ErrorSeverity::Info => info!(error = %self, "Request rejected"),
            severity => error!(error = %self, severity = %severity, "Request failed"),
        }

        HttpResponse::build(self.status_code())
            .insert_header(ALLOW_ORIGIN)
            .json(json!({ "error": self.public_message() }))
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
