//! Unit tests for Namespace reconciler

#[cfg(test)]
mod tests {
    use super::super::namespace::{NamespaceSource, namespace_tag_name};
    use crate::store::ResourceKey;
    use crate::test_utils::*;
    use k8s_openapi::api::core::v1::Namespace;
    use std::sync::Arc;
    use uptime_kuma_client::{MockUptimeKumaClient, RecordedCall};

    #[test]
    fn test_namespace_tag_name() {
        assert_eq!(namespace_tag_name("default"), "k8s-default");
    }

    #[tokio::test]
    async fn test_namespace_lifecycle_mirrors_tag() {
        let mock = MockUptimeKumaClient::new("http://test-kuma");
        let (reconciler, _) = test_reconciler(&mock);
        let other = mock.add_tag("k8s-other", "black");
        let store: InMemoryStore<Namespace> = InMemoryStore::default();
        let source = NamespaceSource::new(Arc::new(store.clone()), "black");
        let key = ResourceKey::cluster("team-a");

        store.put(&key, namespace("team-a"));
        reconciler.reconcile(&source, &key).await.unwrap();
        let created = mock
            .tags()
            .into_iter()
            .find(|tag| tag.name == "k8s-team-a")
            .unwrap();
        assert_eq!(created.color, "black");
        assert_eq!(mock.tags().len(), 2);

        store.remove(&key);
        reconciler.reconcile(&source, &key).await.unwrap();

        // Only the namespace's own tag goes away
        let remaining = mock.tags();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, other);
        assert_eq!(remaining[0].name, "k8s-other");
        assert_eq!(
            mock.calls(),
            vec![
                RecordedCall::CreateTag("k8s-team-a".to_string()),
                RecordedCall::DeleteTag(created.id),
            ]
        );
    }

    #[tokio::test]
    async fn test_configured_color_is_used() {
        let mock = MockUptimeKumaClient::new("http://test-kuma");
        let (reconciler, _) = test_reconciler(&mock);
        let store: InMemoryStore<Namespace> = InMemoryStore::default();
        let source = NamespaceSource::new(Arc::new(store.clone()), "#2196f3");
        let key = ResourceKey::cluster("apps");
        store.put(&key, namespace("apps"));

        reconciler.reconcile(&source, &key).await.unwrap();

        assert_eq!(mock.tags()[0].color, "#2196f3");
    }
}
