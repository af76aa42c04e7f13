//! Controller-specific error types.
//!
//! This module defines error types specific to the Uptime Kuma Controller
//! that are not covered by upstream library errors.

use kube::Error as KubeError;
use thiserror::Error;
use uptime_kuma_client::UptimeKumaError;

/// Errors that can occur in the Uptime Kuma Controller.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// Kubernetes API error
    #[error("Kubernetes error: {0}")]
    Kube(#[from] KubeError),

    /// Uptime Kuma API error
    #[error("Uptime Kuma error: {0}")]
    UptimeKuma(#[from] UptimeKumaError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A cluster object that cannot be mirrored as it stands
    #[error("Invalid resource: {0}")]
    InvalidResource(String),

    /// Metrics registry error
    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    /// Listener or socket error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Resource watch failed
    #[error("Resource watch failed: {0}")]
    Watch(String),
}

impl ControllerError {
    /// Whether re-running the same reconciliation later can succeed.
    ///
    /// Objects that fail validation only change through a new event, so they
    /// are not requeued.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::InvalidResource(_) | Self::InvalidConfig(_) => false,
            Self::UptimeKuma(UptimeKumaError::InvalidRequest(_)) => false,
            _ => true,
        }
    }
}
