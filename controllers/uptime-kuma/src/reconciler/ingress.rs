//! Ingresses
//!
//! Each Ingress is watched over HTTPS through the host of its first rule.
//! The monitor is only created, never patched, and it carries the tag
//! `k8s-<ingress>`.

use super::namespace::TAG_PREFIX;
use super::{DesiredEntity, MirrorSource, RemoteRef};
use crate::error::ControllerError;
use crate::reconcile_helpers::DriftPolicy;
use crate::store::{ObjectStore, ResourceKey};
use k8s_openapi::api::networking::v1::Ingress;
use std::sync::Arc;
use uptime_kuma_client::DesiredMonitor;

/// Polling interval of Ingress monitors, in seconds
pub const INGRESS_MONITOR_INTERVAL: u32 = 60;

/// Desired monitor for the Ingress `name`.
///
/// Fails when the first rule is missing or has no host.
pub fn desired_ingress_monitor(name: &str, ingress: &Ingress) -> Result<DesiredMonitor, ControllerError> {
    let host = ingress
        .spec
        .as_ref()
        .and_then(|spec| spec.rules.as_ref())
        .and_then(|rules| rules.first())
        .and_then(|rule| rule.host.as_deref())
        .filter(|host| !host.is_empty())
        .ok_or_else(|| {
            ControllerError::InvalidResource(format!(
                "Ingress {} has no host on its first rule",
                name
            ))
        })?;

    Ok(DesiredMonitor {
        name: name.to_string(),
        url: format!("https://{}", host),
        interval: INGRESS_MONITOR_INTERVAL,
        tags: vec![format!("{}{}", TAG_PREFIX, name)],
    })
}

pub struct IngressSource {
    store: Arc<dyn ObjectStore<Ingress>>,
}

impl IngressSource {
    pub fn new(store: Arc<dyn ObjectStore<Ingress>>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl MirrorSource for IngressSource {
    type Object = Ingress;

    fn kind(&self) -> &'static str {
        "Ingress"
    }

    async fn fetch(&self, key: &ResourceKey) -> Result<Option<Ingress>, ControllerError> {
        Ok(self.store.get(key).await?)
    }

    fn desired(&self, key: &ResourceKey, object: &Ingress) -> Result<DesiredEntity, ControllerError> {
        Ok(DesiredEntity::Monitor {
            monitor: desired_ingress_monitor(&key.name, object)?,
            drift: DriftPolicy::Ignore,
        })
    }

    fn absent(&self, key: &ResourceKey) -> RemoteRef {
        RemoteRef::Monitor(key.name.clone())
    }
}
