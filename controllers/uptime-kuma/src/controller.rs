//! Main controller implementation.
//!
//! This module contains the `Controller` struct that authenticates against
//! Uptime Kuma and runs one watcher per mirrored kind:
//! - Monitor: custom resources mirrored as monitors
//! - Tag: custom resources mirrored as tags
//! - Namespace: one `k8s-<namespace>` tag each
//! - Ingress: one HTTPS monitor each

use crate::config::Config;
use crate::error::ControllerError;
use crate::metrics::{self, Metrics};
use crate::reconciler::{IngressSource, MonitorSource, NamespaceSource, Reconciler, TagSource};
use crate::store::KubeStore;
use crate::watcher::Watcher;
use k8s_openapi::api::core::v1::Namespace;
use k8s_openapi::api::networking::v1::Ingress;
use k8s_openapi::NamespaceResourceScope;
use kube::{Api, Client, Resource};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};
use uptime_kuma_client::{ClientConfig, UptimeKumaClient, UptimeKumaClientTrait};

type Task = JoinHandle<Result<(), ControllerError>>;

/// Main controller for Uptime Kuma mirroring.
pub struct Controller {
    monitor_watcher: Task,
    tag_watcher: Task,
    namespace_watcher: Task,
    ingress_watcher: Task,
    metrics_server: Task,
}

/// Api for a namespaced kind, limited to `namespace` when one is configured
fn scoped_api<K>(client: Client, namespace: Option<&str>) -> Api<K>
where
    K: Resource<Scope = NamespaceResourceScope>,
    K::DynamicType: Default,
{
    match namespace {
        Some(namespace) => Api::namespaced(client, namespace),
        None => Api::all(client),
    }
}

impl Controller {
    /// Creates a new controller instance and starts its tasks.
    ///
    /// Fails when Uptime Kuma rejects the credentials or the cluster cannot
    /// be reached.
    pub async fn new(config: Config) -> Result<Self, ControllerError> {
        info!("Initializing Uptime Kuma Controller");

        info!("Authenticating against Uptime Kuma...");
        let client_config = ClientConfig::new(
            config.uptime_kuma_url.clone(),
            config.username.clone(),
            config.password.clone(),
        )
        .with_timeout(config.timeout);
        let uptime_kuma = UptimeKumaClient::authenticate(client_config)
            .await
            .map_err(|e| {
                error!("Failed to authenticate against Uptime Kuma: {}", e);
                error!("Please ensure:");
                error!("  1. UPTIME_KUMA_USERNAME and UPTIME_KUMA_PASSWORD are correct");
                error!("  2. Uptime Kuma is reachable at {}", config.uptime_kuma_url);
                ControllerError::UptimeKuma(e)
            })?;
        info!("Authenticated against Uptime Kuma at {}", uptime_kuma.base_url());

        let kube_client = Client::try_default().await?;

        let metrics = Arc::new(Metrics::new()?);
        let reconciler = Arc::new(Reconciler::new(Arc::new(uptime_kuma), metrics.clone()));

        let namespace = config.watch_namespace.as_deref();
        let requeue_after = config.requeue_after;

        let monitor_watcher = tokio::spawn(
            Watcher::new(
                scoped_api::<crds::Monitor>(kube_client.clone(), namespace),
                Arc::new(MonitorSource::new(Arc::new(KubeStore::namespaced(
                    kube_client.clone(),
                )))),
                reconciler.clone(),
                requeue_after,
            )
            .run(),
        );

        let tag_watcher = tokio::spawn(
            Watcher::new(
                scoped_api::<crds::Tag>(kube_client.clone(), namespace),
                Arc::new(TagSource::new(Arc::new(KubeStore::namespaced(kube_client.clone())))),
                reconciler.clone(),
                requeue_after,
            )
            .run(),
        );

        let namespace_watcher = tokio::spawn(
            Watcher::new(
                Api::<Namespace>::all(kube_client.clone()),
                Arc::new(NamespaceSource::new(
                    Arc::new(KubeStore::cluster(kube_client.clone())),
                    config.namespace_tag_color.clone(),
                )),
                reconciler.clone(),
                requeue_after,
            )
            .run(),
        );

        let ingress_watcher = tokio::spawn(
            Watcher::new(
                scoped_api::<Ingress>(kube_client.clone(), namespace),
                Arc::new(IngressSource::new(Arc::new(KubeStore::namespaced(
                    kube_client.clone(),
                )))),
                reconciler.clone(),
                requeue_after,
            )
            .run(),
        );

        let metrics_server = tokio::spawn(metrics::serve(config.metrics_addr, metrics));

        Ok(Self {
            monitor_watcher,
            tag_watcher,
            namespace_watcher,
            ingress_watcher,
            metrics_server,
        })
    }

    /// Runs until a task exits or Ctrl-C is received.
    pub async fn run(mut self) -> Result<(), ControllerError> {
        info!("Uptime Kuma Controller running");

        let result = tokio::select! {
            result = &mut self.monitor_watcher => task_result("Monitor watcher", result),
            result = &mut self.tag_watcher => task_result("Tag watcher", result),
            result = &mut self.namespace_watcher => task_result("Namespace watcher", result),
            result = &mut self.ingress_watcher => task_result("Ingress watcher", result),
            result = &mut self.metrics_server => task_result("Metrics server", result),
            signal = tokio::signal::ctrl_c() => {
                signal?;
                info!("Received Ctrl-C, shutting down");
                Ok(())
            }
        };

        for task in [
            &self.monitor_watcher,
            &self.tag_watcher,
            &self.namespace_watcher,
            &self.ingress_watcher,
            &self.metrics_server,
        ] {
            task.abort();
        }

        result
    }
}

fn task_result(
    name: &str,
    result: Result<Result<(), ControllerError>, tokio::task::JoinError>,
) -> Result<(), ControllerError> {
    match result {
        Ok(Ok(())) => Err(ControllerError::Watch(format!("{} exited", name))),
        Ok(Err(e)) => {
            error!("{} failed: {}", name, e);
            Err(e)
        }
        Err(e) => Err(ControllerError::Watch(format!("{} panicked: {}", name, e))),
    }
}
