//! # Common Error Types
//!
//! Consolidated error handling for the GbakaMap client.
//!
//! This module provides a centralized error type [`AppError`] covering every
//! failure the client can surface to a user.
//!
//! ## Error Categories
//!
//! - **Api**: the backend answered but reported a failure (non-2xx status or `success: false`)
//! - **Network**: no response was received (connection refused, DNS, timeout)
//! - **Unauthorized**: the backend rejected the bearer token; stored credentials are cleared
//! - **Auth**: the identity provider rejected an operation
//! - **Validation**: user input rejected before any request is sent
//! - **Session**: local credential storage failed
//! - **Config**: missing or malformed configuration
//! - **Parse**: a response body did not match the expected shape
//!
//! ## Usage Pattern
//!
//! ```rust,no_run
//! use gbaka_client::core::error::AppError;
//!
//! fn validate_radius(radius: u32) -> Result<u32, AppError> {
//!     if radius == 0 {
//!         return Err(AppError::Validation("Radius must be positive".to_string()));
//!     }
//!     Ok(radius)
//! }
//! ```
//!
//! Front ends show [`AppError::user_message`] in an alert; the `Display`
//! form carries the category prefix and is meant for logs.

use shared::ApiFailure;
use thiserror::Error;

use crate::services::auth::errors::AuthErrorCode;

/// Message shown when the server answered without a usable error text.
pub const GENERIC_ERROR: &str = "An error occurred";

/// Message shown when no response was received at all.
pub const UNREACHABLE: &str = "Unable to reach the server";

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// The backend answered with a failure.
    #[error("API error: {message}")]
    Api {
        message: String,
        code: Option<String>,
        status: Option<u16>,
    },

    /// The request never got a response.
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered 401.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The identity provider refused the operation.
    #[error("Authentication error: {message}")]
    Auth {
        code: AuthErrorCode,
        message: String,
    },

    /// Input rejected before sending anything.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Credential storage failure.
    #[error("Session error: {0}")]
    Session(String),

    /// Missing or malformed configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unexpected response shape.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn api(message: impl Into<String>) -> Self {
        AppError::Api {
            message: message.into(),
            code: None,
            status: None,
        }
    }

    pub fn auth(code: AuthErrorCode) -> Self {
        AppError::Auth {
            message: code.user_message().to_string(),
            code,
        }
    }

    /// Human-readable text for an alert dialog.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Api { message, .. } => message.clone(),
            AppError::Network(_) => UNREACHABLE.to_string(),
            AppError::Unauthorized(message) => message.clone(),
            AppError::Auth { message, .. } => message.clone(),
            AppError::Validation(message) => message.clone(),
            AppError::Session(message) => message.clone(),
            AppError::Config(message) => message.clone(),
            AppError::Parse(_) => GENERIC_ERROR.to_string(),
        }
    }

    /// Backend error code, when one was sent.
    pub fn code(&self) -> Option<&str> {
        match self {
            AppError::Api { code, .. } => code.as_deref(),
            AppError::Auth { code, .. } => Some(code.as_str()),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Unauthorized(_))
            || matches!(self, AppError::Api { status: Some(401), .. })
    }
}

impl From<ApiFailure> for AppError {
    fn from(failure: ApiFailure) -> Self {
        AppError::Api {
            message: failure.message,
            code: failure.code,
            status: None,
        }
    }
}

impl From<lib_utils::envs::Error> for AppError {
    fn from(err: lib_utils::envs::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Session(err.to_string())
    }
}
