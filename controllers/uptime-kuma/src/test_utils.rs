//! Test utilities for unit testing reconcilers
//!
//! This module provides helpers for creating test data and setting up test scenarios.

use crate::metrics::Metrics;
use crate::reconciler::Reconciler;
use crate::store::{ObjectStore, ResourceKey};
use crds::{MonitorSpec, TagSpec};
use k8s_openapi::api::core::v1::Namespace;
use k8s_openapi::api::networking::v1::{Ingress, IngressRule, IngressSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uptime_kuma_client::MockUptimeKumaClient;

/// In-memory [`ObjectStore`] standing in for the API server
#[derive(Clone)]
pub struct InMemoryStore<K> {
    objects: Arc<Mutex<HashMap<ResourceKey, K>>>,
    failing: Arc<Mutex<bool>>,
}

impl<K> Default for InMemoryStore<K> {
    fn default() -> Self {
        Self {
            objects: Arc::new(Mutex::new(HashMap::new())),
            failing: Arc::new(Mutex::new(false)),
        }
    }
}

impl<K> InMemoryStore<K> {
    pub fn put(&self, key: &ResourceKey, object: K) {
        self.objects.lock().unwrap().insert(key.clone(), object);
    }

    pub fn remove(&self, key: &ResourceKey) {
        self.objects.lock().unwrap().remove(key);
    }

    /// Make every lookup fail as if the API server were unreachable
    pub fn fail(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }
}

#[async_trait::async_trait]
impl<K> ObjectStore<K> for InMemoryStore<K>
where
    K: Clone + Send + Sync,
{
    async fn get(&self, key: &ResourceKey) -> Result<Option<K>, kube::Error> {
        if *self.failing.lock().unwrap() {
            return Err(kube::Error::Service(
                std::io::Error::other("api server unreachable").into(),
            ));
        }
        Ok(self.objects.lock().unwrap().get(key).cloned())
    }
}

/// Reconciler wired to the mock client, with its metrics for assertions
pub fn test_reconciler(mock: &MockUptimeKumaClient) -> (Reconciler, Arc<Metrics>) {
    let metrics = Arc::new(Metrics::new().unwrap());
    let reconciler = Reconciler::new(Arc::new(mock.clone()), metrics.clone());
    (reconciler, metrics)
}

fn meta(namespace: Option<&str>, name: &str) -> ObjectMeta {
    ObjectMeta {
        name: Some(name.to_string()),
        namespace: namespace.map(|s| s.to_string()),
        ..Default::default()
    }
}

/// Helper to create test Monitor CRD
pub fn monitor_cr(namespace: &str, name: &str, url: &str, interval: u32, tags: &[&str]) -> crds::Monitor {
    crds::Monitor {
        metadata: meta(Some(namespace), name),
        spec: MonitorSpec {
            url: url.to_string(),
            interval,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        },
    }
}

/// Helper to create test Tag CRD
pub fn tag_cr(namespace: &str, name: &str, color: &str) -> crds::Tag {
    crds::Tag {
        metadata: meta(Some(namespace), name),
        spec: TagSpec {
            color: color.to_string(),
        },
    }
}

pub fn namespace(name: &str) -> Namespace {
    Namespace {
        metadata: meta(None, name),
        ..Default::default()
    }
}

/// Ingress with one rule per host; `None` leaves the rule without a host
pub fn ingress(namespace: &str, name: &str, hosts: &[Option<&str>]) -> Ingress {
    let rules = hosts
        .iter()
        .map(|host| IngressRule {
            host: host.map(|h| h.to_string()),
            ..Default::default()
        })
        .collect();
    Ingress {
        metadata: meta(Some(namespace), name),
        spec: Some(IngressSpec {
            rules: Some(rules),
            ..Default::default()
        }),
        ..Default::default()
    }
}
