//! Tag operations for MockUptimeKumaClient

use super::{MockUptimeKumaClient, RecordedCall};
use crate::error::UptimeKumaError;
use crate::models::*;
use crate::uptime_kuma_trait::validate_name;

pub async fn list_tags(client: &MockUptimeKumaClient) -> Result<Vec<Tag>, UptimeKumaError> {
    client.check_read("/tags")?;
    Ok(client.tags())
}

pub async fn insert_tag(client: &MockUptimeKumaClient, desired: &DesiredTag) -> Result<Tag, UptimeKumaError> {
    validate_name("Tag", &desired.name)?;
    client.record(RecordedCall::CreateTag(desired.name.clone()))?;

    let id = client.next_id();
    let tag = desired.to_tag(id);
    client.tags.lock().unwrap().insert(id, tag.clone());
    Ok(tag)
}

pub async fn delete_tag_by_id(client: &MockUptimeKumaClient, id: u64) -> Result<(), UptimeKumaError> {
    client.record(RecordedCall::DeleteTag(id))?;
    client.tags.lock().unwrap().remove(&id);
    Ok(())
}
