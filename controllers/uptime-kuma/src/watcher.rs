//! Kubernetes resource watchers.
//!
//! One [`Watcher`] per kind turns its watch stream into reconciliations.
//! Events are handled one at a time, so a key is never reconciled twice
//! concurrently. A retryable failure is dispatched again once after the
//! requeue delay.
//!
//! When the watch re-lists, objects deleted while it was down never produce
//! a `Delete` event. [`KnownKeys`] remembers what was listed before and
//! reports the keys missing from the new listing so they are reconciled as
//! deleted.

use crate::error::ControllerError;
use crate::reconciler::{MirrorSource, Reconciler};
use crate::store::ResourceKey;
use futures::StreamExt;
use kube::{Api, Resource};
use kube_runtime::reflector::{self, Store};
use kube_runtime::reflector::store::Writer;
use kube_runtime::watcher::{self, Event};
use kube_runtime::WatchStreamExt;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{debug, info, warn};

/// Key of the object an event is about; `None` for stream bookkeeping events
pub fn event_key<K: Resource>(event: &Event<K>) -> Option<ResourceKey> {
    match event {
        Event::Apply(object) | Event::InitApply(object) | Event::Delete(object) => {
            ResourceKey::from_object(object)
        }
        Event::Init | Event::InitDone => None,
    }
}

/// Objects the watch currently reports as existing for one kind
pub struct KnownKeys<K>
where
    K: Resource + Clone + 'static,
    K::DynamicType: Eq + Hash + Clone + Default,
{
    store: Store<K>,
    writer: Writer<K>,
}

impl<K> KnownKeys<K>
where
    K: Resource + Clone + 'static,
    K::DynamicType: Eq + Hash + Clone + Default,
{
    pub fn new() -> Self {
        let (store, writer) = reflector::store();
        Self { store, writer }
    }

    /// Keys to reconcile for `event`.
    ///
    /// `InitDone` yields the keys known before the re-list that the new
    /// listing no longer contains.
    pub fn observe(&mut self, event: &Event<K>) -> Vec<ResourceKey> {
        if !matches!(event, Event::InitDone) {
            self.writer.apply_watcher_event(event);
            return event_key(event).into_iter().collect();
        }

        let before = self.keys();
        self.writer.apply_watcher_event(event);
        let after = self.keys();

        let mut gone: Vec<ResourceKey> = before.difference(&after).cloned().collect();
        gone.sort_by_key(ToString::to_string);
        gone
    }

    fn keys(&self) -> HashSet<ResourceKey> {
        self.store
            .state()
            .iter()
            .filter_map(|object| ResourceKey::from_object(object.as_ref()))
            .collect()
    }
}

impl<K> Default for KnownKeys<K>
where
    K: Resource + Clone + 'static,
    K::DynamicType: Eq + Hash + Clone + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Reconcile `key` once and schedule a single retry if the failure allows it
pub async fn dispatch<S>(
    reconciler: &Reconciler,
    source: &S,
    key: ResourceKey,
    requeue_after: Duration,
    requeue: &UnboundedSender<ResourceKey>,
) where
    S: MirrorSource + ?Sized,
{
    let Err(e) = reconciler.reconcile(source, &key).await else {
        return;
    };

    if !e.is_retryable() {
        warn!("Not requeueing {} {}: {}", source.kind(), key, e);
        return;
    }

    debug!("Requeueing {} {} in {:?}", source.kind(), key, requeue_after);
    let requeue = requeue.clone();
    tokio::spawn(async move {
        tokio::time::sleep(requeue_after).await;
        // The watcher is gone when the send fails; nothing left to retry
        let _ = requeue.send(key);
    });
}

/// Watches one kind and feeds its events to the reconciler
pub struct Watcher<S: MirrorSource> {
    api: Api<S::Object>,
    source: Arc<S>,
    reconciler: Arc<Reconciler>,
    requeue_after: Duration,
}

impl<S> Watcher<S>
where
    S: MirrorSource + 'static,
    S::Object: Resource + Clone + DeserializeOwned + Debug + Send + Sync + 'static,
    <S::Object as Resource>::DynamicType: Eq + Hash + Clone + Default,
{
    pub fn new(
        api: Api<S::Object>,
        source: Arc<S>,
        reconciler: Arc<Reconciler>,
        requeue_after: Duration,
    ) -> Self {
        Self {
            api,
            source,
            reconciler,
            requeue_after,
        }
    }

    /// Process events until the watch stream ends.
    ///
    /// Transient watch errors are retried with the default backoff and never
    /// end the loop. After a re-list, objects that disappeared meanwhile are
    /// reconciled like deletions.
    pub async fn run(self) -> Result<(), ControllerError> {
        let kind = self.source.kind();
        info!("Starting {} watcher", kind);

        let (requeue_tx, mut requeue_rx) = mpsc::unbounded_channel::<ResourceKey>();
        let mut events = watcher::watcher(self.api.clone(), watcher::Config::default())
            .default_backoff()
            .boxed();

        let mut known = KnownKeys::new();

        loop {
            let keys = tokio::select! {
                event = events.next() => match event {
                    Some(Ok(event)) => known.observe(&event),
                    Some(Err(e)) => {
                        warn!("{} watch error: {}", kind, e);
                        continue;
                    }
                    None => {
                        return Err(ControllerError::Watch(format!("{} watch stream ended", kind)));
                    }
                },
                Some(key) = requeue_rx.recv() => vec![key],
            };

            for key in keys {
                dispatch(
                    self.reconciler.as_ref(),
                    self.source.as_ref(),
                    key,
                    self.requeue_after,
                    &requeue_tx,
                )
                .await;
            }
        }
    }
}
