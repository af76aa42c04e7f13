//! Tag Custom Resource Definition
//!
//! Defines a Kubernetes CRD for declaring Uptime Kuma tags.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// TagSpec defines the desired state of an Uptime Kuma tag
///
/// The colour is only applied when the tag is first created.
#[derive(CustomResource, Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "uptimekuma.aleix.cloud",
    version = "v1alpha1",
    kind = "Tag",
    namespaced,
    printcolumn = r#"{"name":"Color","type":"string","jsonPath":".spec.color"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct TagSpec {
    /// Tag colour as understood by Uptime Kuma (a name like "red" or a hex code)
    pub color: String,
}
