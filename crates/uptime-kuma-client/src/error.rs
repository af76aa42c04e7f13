//! Uptime Kuma client errors

use thiserror::Error;

/// Errors that can occur when interacting with the Uptime Kuma API
#[derive(Debug, Error)]
pub enum UptimeKumaError {
    /// HTTP request/response error (connection refused, timeout, TLS, ...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Uptime Kuma API returned an unexpected status
    #[error("Uptime Kuma API error: {0}")]
    Api(String),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Login rejected or the login response could not be decoded
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// No remote entity carries the requested name
    #[error("Not found: {0}")]
    NotFound(String),

    /// A remote entity with the requested name already exists
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Invalid request (e.g., missing required fields)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl UptimeKumaError {
    /// Returns true for a lookup miss.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Returns true when a create raced with an existing entity.
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists(_))
    }
}
