//! Name-keyed addressing of remote entities
//!
//! The Uptime Kuma API has no get-by-name endpoint, so every name lookup is
//! a linear scan over the listed collection. Monitors and tags share the
//! same helper.

use crate::error::UptimeKumaError;
use crate::models::{Monitor, Tag};

/// Remote entity addressed by name and mutated by ID.
pub trait RemoteEntity {
    /// Entity kind used in log and error messages
    const KIND: &'static str;

    fn id(&self) -> u64;
    fn name(&self) -> &str;
}

impl RemoteEntity for Monitor {
    const KIND: &'static str = "Monitor";

    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl RemoteEntity for Tag {
    const KIND: &'static str = "Tag";

    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Returns the first entity named `name`, or `NotFound`.
pub fn lookup_by_name<T, I>(items: I, name: &str) -> Result<T, UptimeKumaError>
where
    T: RemoteEntity,
    I: IntoIterator<Item = T>,
{
    items
        .into_iter()
        .find(|item| item.name() == name)
        .ok_or_else(|| UptimeKumaError::NotFound(format!("{} {} not found", T::KIND, name)))
}

/// Returns the IDs of every entity named `name`.
///
/// Names are unique in practice, but deletes address all duplicates.
pub fn ids_by_name<T, I>(items: I, name: &str) -> Vec<u64>
where
    T: RemoteEntity,
    I: IntoIterator<Item = T>,
{
    items
        .into_iter()
        .filter(|item| item.name() == name)
        .map(|item| item.id())
        .collect()
}
