//! Uptime Kuma API client
//!
//! Implements the Uptime Kuma REST API client for monitor and tag management.
//! Based on the uptime-kuma-api structure: /login/access-token/, /monitors and /tags

use crate::common::{HttpClient, decode};
use crate::error::UptimeKumaError;
use crate::models::*;
use crate::uptime_kuma_trait::{UptimeKumaClientTrait, validate_name};
use reqwest::{Client, StatusCode};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`UptimeKumaClient::authenticate`]
#[derive(Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub username: String,
    pub password: String,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a config with the default timeout
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            username: username.into(),
            password: password.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the per-request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Uptime Kuma API client
pub struct UptimeKumaClient {
    http: HttpClient,
}

impl UptimeKumaClient {
    /// Log in and create a client holding the resulting access token
    ///
    /// # Arguments
    /// * `config` - Service URL, credentials and request timeout
    ///
    /// # Returns
    /// * `Ok(UptimeKumaClient)` - Authenticated client
    /// * `Err(UptimeKumaError::Authentication)` - Login returned anything but 200,
    ///   or its body is not an access token
    /// * `Err(UptimeKumaError::Http)` - The service is unreachable
    pub async fn authenticate(config: ClientConfig) -> Result<Self, UptimeKumaError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        let base_url = config.base_url.trim_end_matches('/').to_string();
        let url = format!("{}/login/access-token/", base_url);
        debug!("Requesting access token from {}", url);

        let response = client
            .post(&url)
            .header("Accept", "application/json")
            .form(&[
                ("username", config.username.as_str()),
                ("password", config.password.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if status != StatusCode::OK {
            return Err(UptimeKumaError::Authentication(format!(
                "login as {} failed: {} - {}",
                config.username, status, body
            )));
        }

        let token: AccessToken = serde_json::from_str(&body).map_err(|e| {
            UptimeKumaError::Authentication(format!("malformed login response: {}", e))
        })?;
        info!("Authenticated against Uptime Kuma at {} as {}", base_url, config.username);

        Ok(Self {
            http: HttpClient::new(client, base_url, token),
        })
    }

    /// Token type reported by the login endpoint (normally "bearer")
    pub fn token_type(&self) -> &str {
        self.http.token_type()
    }
}

impl fmt::Debug for UptimeKumaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UptimeKumaClient")
            .field("base_url", &self.http.base_url())
            .finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl UptimeKumaClientTrait for UptimeKumaClient {
    fn base_url(&self) -> &str {
        self.http.base_url()
    }

    async fn list_monitors(&self) -> Result<Vec<Monitor>, UptimeKumaError> {
        let response: MonitorsResponse = self.http.get("/monitors").await?;
        Ok(response.monitors)
    }

    async fn insert_monitor(&self, desired: &DesiredMonitor) -> Result<Monitor, UptimeKumaError> {
        validate_name("Monitor", &desired.name)?;

        debug!("Creating monitor {} in Uptime Kuma", desired.name);
        let body = self
            .http
            .post("/monitors", &MonitorRequest::from(desired))
            .await?;

        // The service answers with the stored entity; fall back to the request
        // when it only acknowledges.
        match decode::<Monitor>("/monitors", &body) {
            Ok(created) => Ok(created),
            Err(_) => Ok(desired.to_monitor(0)),
        }
    }

    async fn update_monitor(&self, id: u64, desired: &DesiredMonitor) -> Result<Monitor, UptimeKumaError> {
        validate_name("Monitor", &desired.name)?;
        info!("Updating monitor {} (ID: {})", desired.name, id);

        let path = format!("/monitors/{}", id);
        let body = self.http.patch(&path, &MonitorRequest::from(desired)).await?;

        match decode::<Monitor>(&path, &body) {
            Ok(updated) => Ok(updated),
            Err(_) => Ok(desired.to_monitor(id)),
        }
    }

    async fn delete_monitor_by_id(&self, id: u64) -> Result<(), UptimeKumaError> {
        self.http
            .delete::<()>(&format!("/monitors/{}", id), None)
            .await
    }

    async fn list_tags(&self) -> Result<Vec<Tag>, UptimeKumaError> {
        let response: TagsResponse = self.http.get("/tags").await?;
        Ok(response.tags)
    }

    async fn insert_tag(&self, desired: &DesiredTag) -> Result<Tag, UptimeKumaError> {
        validate_name("Tag", &desired.name)?;

        debug!("Creating tag {} in Uptime Kuma", desired.name);
        let body = self.http.post("/tags", &TagRequest::from(desired)).await?;

        match decode::<Tag>("/tags", &body) {
            Ok(created) => Ok(created),
            Err(_) => Ok(desired.to_tag(0)),
        }
    }

    async fn delete_tag_by_id(&self, id: u64) -> Result<(), UptimeKumaError> {
        self.http
            .delete(&format!("/tags/{}", id), Some(&TagDeleteRequest { tag_id: id }))
            .await
    }
}
