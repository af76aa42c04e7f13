//! UptimeKumaClient trait for mocking
//!
//! This trait abstracts the UptimeKumaClient to enable mocking in unit tests.
//! The concrete UptimeKumaClient implements this trait, and tests can use mock implementations.

use crate::error::UptimeKumaError;
use crate::lookup::{ids_by_name, lookup_by_name};
use crate::models::*;
use tracing::{debug, info};

/// Trait for Uptime Kuma API client operations
///
/// Name-keyed reads and deletes are provided on top of the list and by-ID
/// primitives, so every implementation resolves names the same way.
/// All async methods must be `Send` to work with Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait UptimeKumaClientTrait: Send + Sync {
    /// Get the base URL
    fn base_url(&self) -> &str;

    // Monitor Operations
    async fn list_monitors(&self) -> Result<Vec<Monitor>, UptimeKumaError>;

    /// POST a new monitor without looking for an existing one first.
    async fn insert_monitor(&self, desired: &DesiredMonitor) -> Result<Monitor, UptimeKumaError>;

    /// Overwrite the monitor with the given ID with the desired fields.
    async fn update_monitor(&self, id: u64, desired: &DesiredMonitor) -> Result<Monitor, UptimeKumaError>;

    async fn delete_monitor_by_id(&self, id: u64) -> Result<(), UptimeKumaError>;

    async fn get_monitor(&self, name: &str) -> Result<Monitor, UptimeKumaError> {
        lookup_by_name(self.list_monitors().await?, name)
    }

    /// Create a monitor; `AlreadyExists` if one with the same name is present.
    async fn create_monitor(&self, desired: &DesiredMonitor) -> Result<Monitor, UptimeKumaError> {
        validate_name("Monitor", &desired.name)?;

        match self.get_monitor(&desired.name).await {
            Ok(existing) => Err(UptimeKumaError::AlreadyExists(format!(
                "Monitor {} already exists (ID: {})",
                existing.name, existing.id
            ))),
            Err(e) if e.is_not_found() => self.insert_monitor(desired).await,
            Err(e) => Err(e),
        }
    }

    /// Delete every monitor named `name`. Nothing to delete is success.
    async fn delete_monitor(&self, name: &str) -> Result<(), UptimeKumaError> {
        let ids = ids_by_name(self.list_monitors().await?, name);
        if ids.is_empty() {
            debug!("Monitor {} not present, nothing to delete", name);
            return Ok(());
        }

        for id in ids {
            info!("Deleting monitor {} (ID: {})", name, id);
            self.delete_monitor_by_id(id).await?;
        }
        Ok(())
    }

    // Tag Operations
    async fn list_tags(&self) -> Result<Vec<Tag>, UptimeKumaError>;

    /// POST a new tag without looking for an existing one first.
    async fn insert_tag(&self, desired: &DesiredTag) -> Result<Tag, UptimeKumaError>;

    async fn delete_tag_by_id(&self, id: u64) -> Result<(), UptimeKumaError>;

    async fn get_tag(&self, name: &str) -> Result<Tag, UptimeKumaError> {
        lookup_by_name(self.list_tags().await?, name)
    }

    /// Create a tag; an existing tag of the same name is returned as is.
    async fn create_tag(&self, desired: &DesiredTag) -> Result<Tag, UptimeKumaError> {
        validate_name("Tag", &desired.name)?;

        match self.get_tag(&desired.name).await {
            Ok(existing) => {
                debug!("Tag {} already exists (ID: {})", existing.name, existing.id);
                Ok(existing)
            }
            Err(e) if e.is_not_found() => self.insert_tag(desired).await,
            Err(e) => Err(e),
        }
    }

    /// Delete every tag named `name`. Nothing to delete is success.
    async fn delete_tag(&self, name: &str) -> Result<(), UptimeKumaError> {
        let ids = ids_by_name(self.list_tags().await?, name);
        if ids.is_empty() {
            debug!("Tag {} not present, nothing to delete", name);
            return Ok(());
        }

        for id in ids {
            info!("Deleting tag {} (ID: {})", name, id);
            self.delete_tag_by_id(id).await?;
        }
        Ok(())
    }
}

/// Rejects desired entities that could never be addressed by name.
pub(crate) fn validate_name(kind: &str, name: &str) -> Result<(), UptimeKumaError> {
    if name.trim().is_empty() {
        return Err(UptimeKumaError::InvalidRequest(format!(
            "{} name must not be empty",
            kind
        )));
    }
    Ok(())
}
