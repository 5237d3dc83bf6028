//! Error types for fadup

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for fadup operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// Google API errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Access token rejected by the API")]
    Unauthorized,

    #[error("Access denied: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded. Retry after {0:?}")]
    RateLimit(Duration),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Service account and token exchange errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Failed to load service account key {}: {reason}", path.display())]
    KeyFile { path: PathBuf, reason: String },

    #[error("Service account private key is not a valid RSA PEM key: {0}")]
    InvalidPrivateKey(String),

    #[error("Failed to sign JWT assertion: {0}")]
    Signing(String),

    #[error(
        "Token exchange failed while impersonating {subject}: {reason}. \
         Check that domain-wide delegation is granted for the requested scope."
    )]
    TokenExchange { subject: String, reason: String },
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("Customer ID not configured. Pass --customer-id or run `fadup init`.")]
    MissingCustomerId,

    #[error("Super admin not configured. Pass --super-admin or run `fadup init`.")]
    MissingSuperAdmin,

    #[error("Service account key file not configured. Pass --key-file or run `fadup init`.")]
    MissingKeyFile,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
