//! Monitor operations for MockUptimeKumaClient

use super::{MockUptimeKumaClient, RecordedCall};
use crate::error::UptimeKumaError;
use crate::models::*;
use crate::uptime_kuma_trait::validate_name;

pub async fn list_monitors(client: &MockUptimeKumaClient) -> Result<Vec<Monitor>, UptimeKumaError> {
    client.check_read("/monitors")?;
    Ok(client.monitors())
}

pub async fn insert_monitor(client: &MockUptimeKumaClient, desired: &DesiredMonitor) -> Result<Monitor, UptimeKumaError> {
    validate_name("Monitor", &desired.name)?;
    client.record(RecordedCall::CreateMonitor(desired.name.clone()))?;

    let id = client.next_id();
    let monitor = desired.to_monitor(id);
    client.monitors.lock().unwrap().insert(id, monitor.clone());
    Ok(monitor)
}

pub async fn update_monitor(client: &MockUptimeKumaClient, id: u64, desired: &DesiredMonitor) -> Result<Monitor, UptimeKumaError> {
    validate_name("Monitor", &desired.name)?;
    client.record(RecordedCall::UpdateMonitor(id))?;

    let mut monitors = client.monitors.lock().unwrap();
    if !monitors.contains_key(&id) {
        return Err(UptimeKumaError::Api(format!(
            "PATCH /monitors/{} failed: 404 Not Found - mock",
            id
        )));
    }
    let monitor = desired.to_monitor(id);
    monitors.insert(id, monitor.clone());
    Ok(monitor)
}

pub async fn delete_monitor_by_id(client: &MockUptimeKumaClient, id: u64) -> Result<(), UptimeKumaError> {
    client.record(RecordedCall::DeleteMonitor(id))?;
    client.monitors.lock().unwrap().remove(&id);
    Ok(())
}
