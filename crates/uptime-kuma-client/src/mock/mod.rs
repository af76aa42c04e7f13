//! Mock UptimeKumaClient for unit testing
//!
//! This module provides a mock implementation of UptimeKumaClientTrait that can be used
//! in unit tests without requiring a running Uptime Kuma instance.
//!
//! The mock is organized into entity-specific modules:
//! - `monitors.rs` - Monitor operations
//! - `tags.rs` - Tag operations
//!
//! Every mutation that would reach the remote service is journaled as a
//! [`RecordedCall`], so tests can assert on the exact writes a reconcile made.

mod monitors;
mod tags;

use crate::error::UptimeKumaError;
use crate::models::*;
use crate::uptime_kuma_trait::UptimeKumaClientTrait;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// A write the mock accepted (or rejected, when mutations are failing)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    CreateMonitor(String),
    UpdateMonitor(u64),
    DeleteMonitor(u64),
    CreateTag(String),
    DeleteTag(u64),
}

/// Mock UptimeKumaClient for testing
///
/// This mock stores monitors and tags in memory, keyed by ID so listings come
/// back in creation order like the real service.
#[derive(Clone)]
pub struct MockUptimeKumaClient {
    pub(crate) base_url: String,
    // In-memory storage for resources
    pub(crate) monitors: Arc<Mutex<BTreeMap<u64, Monitor>>>,
    pub(crate) tags: Arc<Mutex<BTreeMap<u64, Tag>>>,
    pub(crate) calls: Arc<Mutex<Vec<RecordedCall>>>,
    pub(crate) reads: Arc<Mutex<u64>>,
    pub(crate) fail_reads: Arc<Mutex<bool>>,
    pub(crate) fail_mutations: Arc<Mutex<bool>>,
    // Counter for generating IDs
    pub(crate) next_id: Arc<Mutex<u64>>,
}

impl MockUptimeKumaClient {
    /// Create a new mock client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            monitors: Arc::new(Mutex::new(BTreeMap::new())),
            tags: Arc::new(Mutex::new(BTreeMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            reads: Arc::new(Mutex::new(0)),
            fail_reads: Arc::new(Mutex::new(false)),
            fail_mutations: Arc::new(Mutex::new(false)),
            next_id: Arc::new(Mutex::new(1)),
        }
    }

    /// Add a monitor to the mock store (for test setup); returns its ID
    pub fn add_monitor(&self, desired: &DesiredMonitor) -> u64 {
        let id = self.next_id();
        self.monitors
            .lock()
            .unwrap()
            .insert(id, desired.to_monitor(id));
        id
    }

    /// Add a tag to the mock store (for test setup); returns its ID
    pub fn add_tag(&self, name: &str, color: &str) -> u64 {
        let id = self.next_id();
        let tag = Tag {
            id,
            name: name.to_string(),
            color: color.to_string(),
        };
        self.tags.lock().unwrap().insert(id, tag);
        id
    }

    /// Snapshot of the stored monitors
    pub fn monitors(&self) -> Vec<Monitor> {
        self.monitors.lock().unwrap().values().cloned().collect()
    }

    /// Snapshot of the stored tags
    pub fn tags(&self) -> Vec<Tag> {
        self.tags.lock().unwrap().values().cloned().collect()
    }

    /// Writes issued so far, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Forget the journaled writes (stored entities are kept)
    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Number of list requests served (or failed) so far
    pub fn reads(&self) -> u64 {
        *self.reads.lock().unwrap()
    }

    /// Make every list request fail as if the service were unreachable
    pub fn fail_reads(&self, fail: bool) {
        *self.fail_reads.lock().unwrap() = fail;
    }

    /// Make every create, update and delete fail with an API error
    pub fn fail_mutations(&self, fail: bool) {
        *self.fail_mutations.lock().unwrap() = fail;
    }

    /// Generate next ID
    pub(crate) fn next_id(&self) -> u64 {
        let mut id = self.next_id.lock().unwrap();
        let current = *id;
        *id += 1;
        current
    }

    pub(crate) fn check_read(&self, path: &str) -> Result<(), UptimeKumaError> {
        *self.reads.lock().unwrap() += 1;
        if *self.fail_reads.lock().unwrap() {
            return Err(UptimeKumaError::Api(format!(
                "GET {} failed: 503 Service Unavailable - mock",
                path
            )));
        }
        Ok(())
    }

    /// Journal a write, then fail it if mutations are switched off.
    pub(crate) fn record(&self, call: RecordedCall) -> Result<(), UptimeKumaError> {
        let rejected = *self.fail_mutations.lock().unwrap();
        let description = format!("{:?}", call);
        self.calls.lock().unwrap().push(call);
        if rejected {
            return Err(UptimeKumaError::Api(format!(
                "{} failed: 500 Internal Server Error - mock",
                description
            )));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl UptimeKumaClientTrait for MockUptimeKumaClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    // Monitor Operations - delegated to monitors module
    async fn list_monitors(&self) -> Result<Vec<Monitor>, UptimeKumaError> {
        monitors::list_monitors(self).await
    }

    async fn insert_monitor(&self, desired: &DesiredMonitor) -> Result<Monitor, UptimeKumaError> {
        monitors::insert_monitor(self, desired).await
    }

    async fn update_monitor(&self, id: u64, desired: &DesiredMonitor) -> Result<Monitor, UptimeKumaError> {
        monitors::update_monitor(self, id, desired).await
    }

    async fn delete_monitor_by_id(&self, id: u64) -> Result<(), UptimeKumaError> {
        monitors::delete_monitor_by_id(self, id).await
    }

    // Tag Operations - delegated to tags module
    async fn list_tags(&self) -> Result<Vec<Tag>, UptimeKumaError> {
        tags::list_tags(self).await
    }

    async fn insert_tag(&self, desired: &DesiredTag) -> Result<Tag, UptimeKumaError> {
        tags::insert_tag(self, desired).await
    }

    async fn delete_tag_by_id(&self, id: u64) -> Result<(), UptimeKumaError> {
        tags::delete_tag_by_id(self, id).await
    }
}
