//! Monitor Custom Resource Definition
//!
//! Defines a Kubernetes CRD for declaring Uptime Kuma HTTP monitors.
//! The resource name is the monitor name in Uptime Kuma.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// MonitorSpec defines the desired state of an Uptime Kuma monitor
#[derive(CustomResource, Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "uptimekuma.aleix.cloud",
    version = "v1alpha1",
    kind = "Monitor",
    namespaced,
    printcolumn = r#"{"name":"URL","type":"string","jsonPath":".spec.url"}"#,
    printcolumn = r#"{"name":"Interval","type":"integer","jsonPath":".spec.interval"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct MonitorSpec {
    /// URL polled by the monitor (e.g., "https://shop.example.com")
    pub url: String,

    /// Polling interval in seconds
    pub interval: u32,

    /// Names of the Uptime Kuma tags attached to the monitor
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}
