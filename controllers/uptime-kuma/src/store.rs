//! Cluster object lookup.
//!
//! Watch events only say which object changed. Reconciliation re-reads the
//! object through an [`ObjectStore`] so it always acts on current state, and
//! an absent object is how deletion is observed.

use k8s_openapi::{ClusterResourceScope, NamespaceResourceScope};
use kube::{Api, Client, Resource, ResourceExt};
use serde::de::DeserializeOwned;
use std::fmt;

/// Identifies the cluster object a reconciliation is about
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceKey {
    /// `None` for cluster-scoped kinds
    pub namespace: Option<String>,
    pub name: String,
}

impl ResourceKey {
    pub fn namespaced(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            name: name.into(),
        }
    }

    pub fn cluster(name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            name: name.into(),
        }
    }

    /// Key of an object seen on a watch stream; `None` if it carries no name
    pub fn from_object<K: Resource>(object: &K) -> Option<Self> {
        let name = object.meta().name.clone()?;
        Some(Self {
            namespace: object.namespace(),
            name,
        })
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(namespace) => write!(f, "{}/{}", namespace, self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// Read access to current cluster state for one kind
#[async_trait::async_trait]
pub trait ObjectStore<K>: Send + Sync {
    /// Current object for `key`, `None` if it does not exist
    async fn get(&self, key: &ResourceKey) -> Result<Option<K>, kube::Error>;
}

/// [`ObjectStore`] backed by the Kubernetes API server
pub struct KubeStore<K> {
    client: Client,
    scope: fn(Client, Option<&str>) -> Api<K>,
}

impl<K> KubeStore<K>
where
    K: Resource<Scope = NamespaceResourceScope>,
    K::DynamicType: Default,
{
    /// Store for a namespaced kind; keys must carry the namespace
    pub fn namespaced(client: Client) -> Self {
        Self {
            client,
            scope: namespaced_api::<K>,
        }
    }
}

impl<K> KubeStore<K>
where
    K: Resource<Scope = ClusterResourceScope>,
    K::DynamicType: Default,
{
    /// Store for a cluster-scoped kind
    pub fn cluster(client: Client) -> Self {
        Self {
            client,
            scope: cluster_api::<K>,
        }
    }
}

fn namespaced_api<K>(client: Client, namespace: Option<&str>) -> Api<K>
where
    K: Resource<Scope = NamespaceResourceScope>,
    K::DynamicType: Default,
{
    match namespace {
        Some(namespace) => Api::namespaced(client, namespace),
        None => Api::default_namespaced(client),
    }
}

fn cluster_api<K>(client: Client, _namespace: Option<&str>) -> Api<K>
where
    K: Resource<Scope = ClusterResourceScope>,
    K::DynamicType: Default,
{
    Api::all(client)
}

#[async_trait::async_trait]
impl<K> ObjectStore<K> for KubeStore<K>
where
    K: Resource + Clone + DeserializeOwned + fmt::Debug + Send + Sync + 'static,
{
    async fn get(&self, key: &ResourceKey) -> Result<Option<K>, kube::Error> {
        let api = (self.scope)(self.client.clone(), key.namespace.as_deref());
        api.get_opt(&key.name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::core::v1::Namespace;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

    #[test]
    fn test_key_display() {
        assert_eq!(ResourceKey::namespaced("apps", "shop").to_string(), "apps/shop");
        assert_eq!(ResourceKey::cluster("apps").to_string(), "apps");
    }

    #[test]
    fn test_key_from_object() {
        let monitor = crate::test_utils::monitor_cr("apps", "shop", "https://shop", 60, &[]);
        assert_eq!(
            ResourceKey::from_object(&monitor),
            Some(ResourceKey::namespaced("apps", "shop"))
        );

        let namespace = Namespace {
            metadata: ObjectMeta {
                name: Some("apps".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            ResourceKey::from_object(&namespace),
            Some(ResourceKey::cluster("apps"))
        );

        assert_eq!(ResourceKey::from_object(&Namespace::default()), None);
    }
}
