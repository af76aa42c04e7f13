//! Prometheus metrics and the health endpoint.
//!
//! Serves `/metrics` in the text exposition format and `/healthz` for
//! liveness checks.

use crate::error::ControllerError;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use prometheus::{IntCounterVec, Opts, Registry, TextEncoder};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Counters describing reconciliation activity
pub struct Metrics {
    registry: Registry,
    reconcile_runs: IntCounterVec,
    reconcile_failures: IntCounterVec,
    remote_writes: IntCounterVec,
}

impl Metrics {
    /// Create the counters in a fresh registry
    pub fn new() -> Result<Self, ControllerError> {
        let registry = Registry::new();

        let reconcile_runs = IntCounterVec::new(
            Opts::new("uptime_kuma_reconcile_runs_total", "Reconciliations started"),
            &["kind"],
        )?;
        let reconcile_failures = IntCounterVec::new(
            Opts::new("uptime_kuma_reconcile_failures_total", "Reconciliations that returned an error"),
            &["kind"],
        )?;
        let remote_writes = IntCounterVec::new(
            Opts::new("uptime_kuma_remote_writes_total", "Mutating requests issued to Uptime Kuma"),
            &["entity", "operation"],
        )?;

        registry.register(Box::new(reconcile_runs.clone()))?;
        registry.register(Box::new(reconcile_failures.clone()))?;
        registry.register(Box::new(remote_writes.clone()))?;

        Ok(Self {
            registry,
            reconcile_runs,
            reconcile_failures,
            remote_writes,
        })
    }

    pub fn record_run(&self, kind: &str) {
        self.reconcile_runs.with_label_values(&[kind]).inc();
    }

    pub fn record_failure(&self, kind: &str) {
        self.reconcile_failures.with_label_values(&[kind]).inc();
    }

    pub fn record_write(&self, entity: &str, operation: &str) {
        self.remote_writes.with_label_values(&[entity, operation]).inc();
    }

    /// Current value of a run counter
    pub fn runs(&self, kind: &str) -> u64 {
        self.reconcile_runs.with_label_values(&[kind]).get()
    }

    /// Current value of a failure counter
    pub fn failures(&self, kind: &str) -> u64 {
        self.reconcile_failures.with_label_values(&[kind]).get()
    }

    /// Render every registered metric in the text exposition format
    pub fn render(&self) -> Result<String, ControllerError> {
        Ok(TextEncoder::new().encode_to_string(&self.registry.gather())?)
    }
}

/// Router serving `/metrics` and `/healthz`
pub fn router(metrics: Arc<Metrics>) -> Router {
    Router::new()
        .route("/metrics", get(render_metrics))
        .route("/healthz", get(healthz))
        .with_state(metrics)
}

/// Serve the metrics and health endpoints until the listener fails
pub async fn serve(addr: SocketAddr, metrics: Arc<Metrics>) -> Result<(), ControllerError> {
    let listener = TcpListener::bind(addr).await?;
    info!("Metrics and health endpoints listening on {}", addr);
    axum::serve(listener, router(metrics)).await?;
    Ok(())
}

async fn render_metrics(State(metrics): State<Arc<Metrics>>) -> Response {
    match metrics.render() {
        Ok(body) => (StatusCode::OK, body).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

async fn healthz() -> &'static str {
    "ok"
}
