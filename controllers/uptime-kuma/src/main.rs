//! Uptime Kuma Controller
//!
//! Mirrors cluster state into Uptime Kuma:
//! - Monitor: custom resources become HTTP monitors, patched on drift
//! - Tag: custom resources become tags
//! - Namespace: every namespace gets a `k8s-<namespace>` tag
//! - Ingress: every Ingress gets an HTTPS monitor on its first host
//!
//! Uptime Kuma is never cached; each reconciliation reads it afresh.

mod config;
mod controller;
mod error;
mod metrics;
mod reconcile_helpers;
mod reconciler;
mod store;
#[cfg(test)]
mod test_utils;
mod watcher;

use crate::config::Config;
use crate::error::ControllerError;
use controller::Controller;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), ControllerError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting Uptime Kuma Controller");

    let config = Config::from_env()?;

    info!("Configuration:");
    info!("  Uptime Kuma URL: {}", config.uptime_kuma_url);
    info!("  Username: {}", config.username);
    info!(
        "  Namespace: {}",
        config.watch_namespace.as_deref().unwrap_or("all namespaces")
    );
    info!("  Namespace tag colour: {}", config.namespace_tag_color);
    info!("  Requeue after: {:?}", config.requeue_after);
    info!("  Metrics address: {}", config.metrics_addr);

    let controller = Controller::new(config).await?;
    controller.run().await?;

    Ok(())
}
