//! Controller configuration.
//!
//! All settings come from environment variables read once at startup.

use crate::error::ControllerError;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_URL: &str = "http://uptime-kuma-api:8000";
const DEFAULT_USERNAME: &str = "admin";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_TAG_COLOR: &str = "black";
const DEFAULT_REQUEUE_SECS: u64 = 60;
const DEFAULT_METRICS_ADDR: &str = "0.0.0.0:8080";

/// Runtime configuration of the controller
#[derive(Clone)]
pub struct Config {
    pub uptime_kuma_url: String,
    pub username: String,
    pub password: String,
    /// Per-request timeout towards Uptime Kuma
    pub timeout: Duration,
    /// Namespace for Monitor/Tag resources and Ingresses; `None` watches all
    pub watch_namespace: Option<String>,
    /// Colour of the `k8s-<namespace>` tags
    pub namespace_tag_color: String,
    /// Delay before a failed reconciliation is dispatched again
    pub requeue_after: Duration,
    pub metrics_addr: SocketAddr,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ControllerError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_vars<F>(var: F) -> Result<Self, ControllerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let password = var("UPTIME_KUMA_PASSWORD").ok_or_else(|| {
            ControllerError::InvalidConfig(
                "UPTIME_KUMA_PASSWORD environment variable is required".to_string(),
            )
        })?;

        let metrics_addr = var("METRICS_ADDR").unwrap_or_else(|| DEFAULT_METRICS_ADDR.to_string());
        let metrics_addr = metrics_addr.parse::<SocketAddr>().map_err(|e| {
            ControllerError::InvalidConfig(format!("METRICS_ADDR {:?}: {}", metrics_addr, e))
        })?;

        Ok(Self {
            uptime_kuma_url: var("UPTIME_KUMA_URL").unwrap_or_else(|| DEFAULT_URL.to_string()),
            username: var("UPTIME_KUMA_USERNAME").unwrap_or_else(|| DEFAULT_USERNAME.to_string()),
            password,
            timeout: seconds(&var, "UPTIME_KUMA_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            watch_namespace: var("WATCH_NAMESPACE").filter(|ns| !ns.is_empty()),
            namespace_tag_color: var("NAMESPACE_TAG_COLOR")
                .filter(|color| !color.is_empty())
                .unwrap_or_else(|| DEFAULT_TAG_COLOR.to_string()),
            requeue_after: seconds(&var, "REQUEUE_AFTER_SECS", DEFAULT_REQUEUE_SECS)?,
            metrics_addr,
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("uptime_kuma_url", &self.uptime_kuma_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("watch_namespace", &self.watch_namespace)
            .field("namespace_tag_color", &self.namespace_tag_color)
            .field("requeue_after", &self.requeue_after)
            .field("metrics_addr", &self.metrics_addr)
            .finish()
    }
}

/// Positive number of seconds, or the default when unset
fn seconds<F>(var: &F, name: &str, default: u64) -> Result<Duration, ControllerError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = var(name) else {
        return Ok(Duration::from_secs(default));
    };
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ControllerError::InvalidConfig(format!(
            "{} must be a positive number of seconds, got {:?}",
            name, raw
        ))),
    }
}
