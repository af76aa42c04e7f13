//! Tag custom resources
//!
//! Tags are create-only: once a tag of that name exists its colour is left
//! alone, even when the resource asks for another one.

use super::{DesiredEntity, MirrorSource, RemoteRef};
use crate::error::ControllerError;
use crate::store::{ObjectStore, ResourceKey};
use crds::Tag;
use std::sync::Arc;
use uptime_kuma_client::DesiredTag;

pub struct TagSource {
    store: Arc<dyn ObjectStore<Tag>>,
}

impl TagSource {
    pub fn new(store: Arc<dyn ObjectStore<Tag>>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl MirrorSource for TagSource {
    type Object = Tag;

    fn kind(&self) -> &'static str {
        "Tag"
    }

    async fn fetch(&self, key: &ResourceKey) -> Result<Option<Tag>, ControllerError> {
        Ok(self.store.get(key).await?)
    }

    fn desired(&self, key: &ResourceKey, object: &Tag) -> Result<DesiredEntity, ControllerError> {
        Ok(DesiredEntity::Tag(DesiredTag {
            name: key.name.clone(),
            color: object.spec.color.clone(),
        }))
    }

    fn absent(&self, key: &ResourceKey) -> RemoteRef {
        RemoteRef::Tag(key.name.clone())
    }
}
