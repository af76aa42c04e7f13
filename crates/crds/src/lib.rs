//! Uptime Kuma operator CRD Definitions
//!
//! Kubernetes Custom Resource Definitions mirrored into Uptime Kuma.

pub mod monitor;
pub mod tag;

pub use monitor::*;
pub use tag::*;

use kube::CustomResourceExt;
use thiserror::Error;

/// API group shared by every custom resource of the operator
pub const GROUP: &str = "uptimekuma.aleix.cloud";

/// Errors raised while rendering CRD manifests
#[derive(Error, Debug)]
pub enum CrdError {
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Render every CRD of the operator as a multi-document YAML stream
pub fn crd_yaml_all() -> Result<String, CrdError> {
    let mut out = String::new();
    for crd in [Monitor::crd(), Tag::crd()] {
        out.push_str("---\n");
        out.push_str(&serde_yaml::to_string(&crd)?);
    }
    Ok(out)
}
