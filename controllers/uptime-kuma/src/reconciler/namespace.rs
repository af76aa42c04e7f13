//! Namespaces
//!
//! Every Namespace gets a tag named `k8s-<namespace>` in Uptime Kuma, so
//! monitors can be grouped by the namespace they come from.

use super::{DesiredEntity, MirrorSource, RemoteRef};
use crate::error::ControllerError;
use crate::store::{ObjectStore, ResourceKey};
use k8s_openapi::api::core::v1::Namespace;
use std::sync::Arc;
use uptime_kuma_client::DesiredTag;

/// Prefix of every tag derived from a cluster object name
pub const TAG_PREFIX: &str = "k8s-";

/// Tag name mirroring the namespace `namespace`
pub fn namespace_tag_name(namespace: &str) -> String {
    format!("{}{}", TAG_PREFIX, namespace)
}

pub struct NamespaceSource {
    store: Arc<dyn ObjectStore<Namespace>>,
    tag_color: String,
}

impl NamespaceSource {
    pub fn new(store: Arc<dyn ObjectStore<Namespace>>, tag_color: impl Into<String>) -> Self {
        Self {
            store,
            tag_color: tag_color.into(),
        }
    }
}

#[async_trait::async_trait]
impl MirrorSource for NamespaceSource {
    type Object = Namespace;

    fn kind(&self) -> &'static str {
        "Namespace"
    }

    async fn fetch(&self, key: &ResourceKey) -> Result<Option<Namespace>, ControllerError> {
        Ok(self.store.get(key).await?)
    }

    fn desired(&self, key: &ResourceKey, _object: &Namespace) -> Result<DesiredEntity, ControllerError> {
        Ok(DesiredEntity::Tag(DesiredTag {
            name: namespace_tag_name(&key.name),
            color: self.tag_color.clone(),
        }))
    }

    fn absent(&self, key: &ResourceKey) -> RemoteRef {
        RemoteRef::Tag(namespace_tag_name(&key.name))
    }
}
