//! Uptime Kuma API models
//!
//! These models match the JSON documents served by the Uptime Kuma REST API
//! (`/login/access-token/`, `/monitors`, `/tags`).

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Monitor type sent on every create/update; only HTTP monitors are managed.
pub const HTTP_MONITOR_TYPE: &str = "http";

/// Token returned by `POST /login/access-token/`
#[derive(Clone, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .finish()
    }
}

/// Monitor as stored by Uptime Kuma
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monitor {
    pub id: u64,
    pub name: String,
    /// Null for non-HTTP monitors created outside the operator
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    /// Polling interval in seconds
    #[serde(default, deserialize_with = "null_as_default")]
    pub interval: u32,
    #[serde(rename = "type", default = "default_monitor_type")]
    pub monitor_type: String,
    /// Tag names; the API reports tags either as names or as tag objects
    #[serde(default, deserialize_with = "tag_names")]
    pub tags: Vec<String>,
}

/// Tag as stored by Uptime Kuma
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub color: String,
}

/// Desired shape of a monitor, as derived from the cluster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesiredMonitor {
    pub name: String,
    pub url: String,
    pub interval: u32,
    pub tags: Vec<String>,
}

impl DesiredMonitor {
    /// Materialise the desired shape as a remote monitor with the given ID.
    pub fn to_monitor(&self, id: u64) -> Monitor {
        Monitor {
            id,
            name: self.name.clone(),
            url: self.url.clone(),
            interval: self.interval,
            monitor_type: HTTP_MONITOR_TYPE.to_string(),
            tags: self.tags.clone(),
        }
    }
}

/// Desired shape of a tag, as derived from the cluster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesiredTag {
    pub name: String,
    pub color: String,
}

impl DesiredTag {
    /// Materialise the desired shape as a remote tag with the given ID.
    pub fn to_tag(&self, id: u64) -> Tag {
        Tag {
            id,
            name: self.name.clone(),
            color: self.color.clone(),
        }
    }
}

/// Body of `POST /monitors` and `PATCH /monitors/{id}`
#[derive(Debug, Serialize)]
pub struct MonitorRequest<'a> {
    #[serde(rename = "type")]
    pub monitor_type: &'static str,
    pub name: &'a str,
    pub url: &'a str,
    pub interval: u32,
    #[serde(skip_serializing_if = "no_tags")]
    pub tags: &'a [String],
}

impl<'a> From<&'a DesiredMonitor> for MonitorRequest<'a> {
    fn from(desired: &'a DesiredMonitor) -> Self {
        Self {
            monitor_type: HTTP_MONITOR_TYPE,
            name: &desired.name,
            url: &desired.url,
            interval: desired.interval,
            tags: &desired.tags,
        }
    }
}

/// Body of `POST /tags`
#[derive(Debug, Serialize)]
pub struct TagRequest<'a> {
    pub name: &'a str,
    pub color: &'a str,
}

impl<'a> From<&'a DesiredTag> for TagRequest<'a> {
    fn from(desired: &'a DesiredTag) -> Self {
        Self {
            name: &desired.name,
            color: &desired.color,
        }
    }
}

/// Body of `DELETE /tags/{id}`
#[derive(Debug, Serialize)]
pub struct TagDeleteRequest {
    pub tag_id: u64,
}

/// Response of `GET /monitors`
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorsResponse {
    #[serde(default)]
    pub monitors: Vec<Monitor>,
}

/// Response of `GET /tags`
#[derive(Debug, Clone, Deserialize)]
pub struct TagsResponse {
    #[serde(default)]
    pub tags: Vec<Tag>,
}

fn no_tags(tags: &&[String]) -> bool {
    tags.is_empty()
}

fn default_monitor_type() -> String {
    HTTP_MONITOR_TYPE.to_string()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TagRef {
    Name(String),
    Entry { name: String },
}

fn tag_names<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let refs = Option::<Vec<TagRef>>::deserialize(deserializer)?;
    Ok(refs
        .unwrap_or_default()
        .into_iter()
        .map(|tag| match tag {
            TagRef::Name(name) | TagRef::Entry { name } => name,
        })
        .collect())
}
