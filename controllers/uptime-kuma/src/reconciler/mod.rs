//! Reconciliation of cluster objects into Uptime Kuma.
//!
//! One engine serves every watched kind. A kind plugs in through
//! [`MirrorSource`], which knows how to re-read its objects and what remote
//! entity each of them stands for:
//! - `monitor`: Monitor custom resources, patched on drift
//! - `tag`: Tag custom resources, create-only
//! - `namespace`: one `k8s-<namespace>` tag per Namespace
//! - `ingress`: one HTTP monitor per Ingress, create-only
//!
//! Reconciliation is stateless: each run re-reads the object, and an object
//! that no longer exists means the remote entity has to go.

pub mod ingress;
pub mod monitor;
pub mod namespace;
#[cfg(test)]
mod namespace_test;
pub mod tag;

pub use ingress::IngressSource;
pub use monitor::MonitorSource;
pub use namespace::NamespaceSource;
pub use tag::TagSource;

use crate::error::ControllerError;
use crate::metrics::Metrics;
use crate::reconcile_helpers::{DriftPolicy, ensure_monitor, ensure_tag};
use crate::store::ResourceKey;
use std::sync::Arc;
use tracing::{debug, error, info};
use uptime_kuma_client::{DesiredMonitor, DesiredTag, UptimeKumaClientTrait};

/// Remote entity a cluster object should be mirrored as
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesiredEntity {
    Monitor {
        monitor: DesiredMonitor,
        drift: DriftPolicy,
    },
    Tag(DesiredTag),
}

/// Remote entity to remove once its cluster object is gone, by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteRef {
    Monitor(String),
    Tag(String),
}

/// What the engine needs to know about one watched kind
#[async_trait::async_trait]
pub trait MirrorSource: Send + Sync {
    type Object: Send + Sync;

    /// Kind name used in logs and metrics
    fn kind(&self) -> &'static str;

    /// Current cluster object for `key`; `None` once it has been deleted
    async fn fetch(&self, key: &ResourceKey) -> Result<Option<Self::Object>, ControllerError>;

    /// Remote entity the object should be mirrored as
    fn desired(&self, key: &ResourceKey, object: &Self::Object) -> Result<DesiredEntity, ControllerError>;

    /// Remote entity to delete when the object no longer exists
    fn absent(&self, key: &ResourceKey) -> RemoteRef;
}

/// Reconciles cluster objects into Uptime Kuma.
pub struct Reconciler {
    pub(crate) client: Arc<dyn UptimeKumaClientTrait>,
    metrics: Arc<Metrics>,
}

impl Reconciler {
    pub fn new(client: Arc<dyn UptimeKumaClientTrait>, metrics: Arc<Metrics>) -> Self {
        Self { client, metrics }
    }

    /// Bring Uptime Kuma in line with the current state of one cluster object.
    ///
    /// Remote failures are returned to the caller; nothing is retried here.
    pub async fn reconcile<S>(&self, source: &S, key: &ResourceKey) -> Result<(), ControllerError>
    where
        S: MirrorSource + ?Sized,
    {
        let kind = source.kind();
        self.metrics.record_run(kind);
        debug!("Reconciling {} {}", kind, key);

        let result = self.reconcile_once(source, key).await;
        if let Err(e) = &result {
            self.metrics.record_failure(kind);
            error!("Failed to reconcile {} {}: {}", kind, key, e);
        }
        result
    }

    async fn reconcile_once<S>(&self, source: &S, key: &ResourceKey) -> Result<(), ControllerError>
    where
        S: MirrorSource + ?Sized,
    {
        let kind = source.kind();
        match source.fetch(key).await? {
            Some(object) => {
                let desired = source.desired(key, &object)?;
                self.apply(kind, key, desired).await
            }
            None => self.remove(kind, key, source.absent(key)).await,
        }
    }

    async fn apply(&self, kind: &str, key: &ResourceKey, desired: DesiredEntity) -> Result<(), ControllerError> {
        match desired {
            DesiredEntity::Monitor { monitor, drift } => {
                let outcome = ensure_monitor(self.client.as_ref(), &monitor, drift).await?;
                match outcome.write() {
                    Some(operation) => {
                        self.metrics.record_write("monitor", operation);
                        info!("{} {}: monitor {} {}d", kind, key, monitor.name, operation);
                    }
                    None => debug!("{} {}: monitor {} unchanged", kind, key, monitor.name),
                }
            }
            DesiredEntity::Tag(tag) => {
                let outcome = ensure_tag(self.client.as_ref(), &tag).await?;
                match outcome.write() {
                    Some(operation) => {
                        self.metrics.record_write("tag", operation);
                        info!("{} {}: tag {} {}d", kind, key, tag.name, operation);
                    }
                    None => debug!("{} {}: tag {} unchanged", kind, key, tag.name),
                }
            }
        }
        Ok(())
    }

    async fn remove(&self, kind: &str, key: &ResourceKey, target: RemoteRef) -> Result<(), ControllerError> {
        match target {
            RemoteRef::Monitor(name) => {
                self.client.delete_monitor(&name).await?;
                self.metrics.record_write("monitor", "delete");
                info!("{} {} is gone: monitor {} deleted", kind, key, name);
            }
            RemoteRef::Tag(name) => {
                self.client.delete_tag(&name).await?;
                self.metrics.record_write("tag", "delete");
                info!("{} {} is gone: tag {} deleted", kind, key, name);
            }
        }
        Ok(())
    }
}
