//! Monitor custom resources
//!
//! A Monitor resource is the single source of truth for the Uptime Kuma
//! monitor of the same name: it is created from the spec, patched whenever
//! the stored monitor drifts, and deleted with the resource.

use super::{DesiredEntity, MirrorSource, RemoteRef};
use crate::error::ControllerError;
use crate::reconcile_helpers::DriftPolicy;
use crate::store::{ObjectStore, ResourceKey};
use crds::{Monitor, MonitorSpec};
use std::sync::Arc;
use uptime_kuma_client::DesiredMonitor;

/// Desired monitor for the resource `name`
pub fn desired_monitor(name: &str, spec: &MonitorSpec) -> DesiredMonitor {
    DesiredMonitor {
        name: name.to_string(),
        url: spec.url.clone(),
        interval: spec.interval,
        tags: spec.tags.clone(),
    }
}

pub struct MonitorSource {
    store: Arc<dyn ObjectStore<Monitor>>,
}

impl MonitorSource {
    pub fn new(store: Arc<dyn ObjectStore<Monitor>>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl MirrorSource for MonitorSource {
    type Object = Monitor;

    fn kind(&self) -> &'static str {
        "Monitor"
    }

    async fn fetch(&self, key: &ResourceKey) -> Result<Option<Monitor>, ControllerError> {
        Ok(self.store.get(key).await?)
    }

    fn desired(&self, key: &ResourceKey, object: &Monitor) -> Result<DesiredEntity, ControllerError> {
        Ok(DesiredEntity::Monitor {
            monitor: desired_monitor(&key.name, &object.spec),
            drift: DriftPolicy::Patch,
        })
    }

    fn absent(&self, key: &ResourceKey) -> RemoteRef {
        RemoteRef::Monitor(key.name.clone())
    }
}
