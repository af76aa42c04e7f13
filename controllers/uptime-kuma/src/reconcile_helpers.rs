//! Helper functions for common reconciliation patterns
//!
//! Drives a single remote entity towards its desired shape with the fewest
//! writes: create when absent, patch when drifted, otherwise leave it alone.
//! Every reconciler goes through these functions.

use std::collections::BTreeSet;
use tracing::{debug, info};
use uptime_kuma_client::{
    DesiredMonitor, DesiredTag, Monitor, Tag, UptimeKumaClientTrait, UptimeKumaError,
};

/// What to do when an existing remote monitor differs from the desired one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriftPolicy {
    /// Overwrite the remote monitor with the desired fields
    Patch,
    /// Only create; an existing monitor is left as it is
    Ignore,
}

/// Result of driving one remote entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome<T> {
    /// Entity did not exist and was created
    Created(T),
    /// Entity existed, drifted and was patched; carries the entity as it was
    /// before the patch
    Updated(T),
    /// Entity existed and no write was needed
    Unchanged(T),
}

impl<T> SyncOutcome<T> {
    /// Operation label for logs and metrics, `None` when nothing was written
    pub fn write(&self) -> Option<&'static str> {
        match self {
            Self::Created(_) => Some("create"),
            Self::Updated(_) => Some("update"),
            Self::Unchanged(_) => None,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Self::Created(entity) | Self::Updated(entity) | Self::Unchanged(entity) => entity,
        }
    }
}

/// Returns true when `current` has to be patched to match `desired`.
///
/// Name, URL and interval are compared exactly. Tags are compared as sets,
/// so ordering and repeated names do not count as drift.
pub fn monitors_differ(current: &Monitor, desired: &DesiredMonitor) -> bool {
    if current.name != desired.name
        || current.url != desired.url
        || current.interval != desired.interval
    {
        return true;
    }

    let current_tags: BTreeSet<&str> = current.tags.iter().map(String::as_str).collect();
    let desired_tags: BTreeSet<&str> = desired.tags.iter().map(String::as_str).collect();
    current_tags != desired_tags
}

/// Make the remote monitor named `desired.name` match `desired`.
///
/// Monitors are listed once per call. An insert rejected because another
/// writer created the monitor in the meantime falls back to comparing
/// against the stored monitor.
pub async fn ensure_monitor<C>(
    client: &C,
    desired: &DesiredMonitor,
    drift: DriftPolicy,
) -> Result<SyncOutcome<Monitor>, UptimeKumaError>
where
    C: UptimeKumaClientTrait + ?Sized,
{
    match client.get_monitor(&desired.name).await {
        Ok(existing) => reconcile_existing_monitor(client, existing, desired, drift).await,
        Err(e) if e.is_not_found() => match client.insert_monitor(desired).await {
            Ok(created) => {
                info!("Created monitor {} in Uptime Kuma", desired.name);
                Ok(SyncOutcome::Created(created))
            }
            Err(e) if e.is_already_exists() => {
                debug!("Monitor {} was created concurrently, checking for drift", desired.name);
                let existing = client.get_monitor(&desired.name).await?;
                reconcile_existing_monitor(client, existing, desired, drift).await
            }
            Err(e) => Err(e),
        },
        Err(e) => Err(e),
    }
}

async fn reconcile_existing_monitor<C>(
    client: &C,
    existing: Monitor,
    desired: &DesiredMonitor,
    drift: DriftPolicy,
) -> Result<SyncOutcome<Monitor>, UptimeKumaError>
where
    C: UptimeKumaClientTrait + ?Sized,
{
    if !monitors_differ(&existing, desired) {
        debug!("Monitor {} (ID: {}) is up to date", existing.name, existing.id);
        return Ok(SyncOutcome::Unchanged(existing));
    }

    match drift {
        DriftPolicy::Ignore => {
            debug!(
                "Monitor {} (ID: {}) differs but is create-only, leaving it",
                existing.name, existing.id
            );
            Ok(SyncOutcome::Unchanged(existing))
        }
        DriftPolicy::Patch => {
            info!(
                "Monitor {} (ID: {}) drifted, updating in Uptime Kuma",
                existing.name, existing.id
            );
            client.update_monitor(existing.id, desired).await?;
            Ok(SyncOutcome::Updated(existing))
        }
    }
}

/// Make sure a tag named `desired.name` exists.
///
/// Only existence is checked; the colour of an existing tag is never changed.
pub async fn ensure_tag<C>(client: &C, desired: &DesiredTag) -> Result<SyncOutcome<Tag>, UptimeKumaError>
where
    C: UptimeKumaClientTrait + ?Sized,
{
    match client.get_tag(&desired.name).await {
        Ok(existing) => {
            debug!("Tag {} (ID: {}) already exists", existing.name, existing.id);
            Ok(SyncOutcome::Unchanged(existing))
        }
        Err(e) if e.is_not_found() => match client.insert_tag(desired).await {
            Ok(created) => {
                info!("Created tag {} in Uptime Kuma", desired.name);
                Ok(SyncOutcome::Created(created))
            }
            Err(e) if e.is_already_exists() => Ok(SyncOutcome::Unchanged(client.get_tag(&desired.name).await?)),
            Err(e) => Err(e),
        },
        Err(e) => Err(e),
    }
}
