//! Common utilities for the Uptime Kuma API client
//!
//! Provides the authenticated request plumbing shared by every entity operation.

use crate::error::UptimeKumaError;
use crate::models::AccessToken;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

/// HTTP client wrapper with bearer authentication
///
/// Holds the access token obtained at login for its whole lifetime; there is
/// no refresh.
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: AccessToken,
}

impl HttpClient {
    /// Create a new HTTP client wrapper
    pub fn new(client: Client, base_url: String, token: AccessToken) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Token type reported by the login endpoint
    pub fn token_type(&self) -> &str {
        &self.token.token_type
    }

    /// Build a full URL from a path
    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Make a GET request and decode the body
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, UptimeKumaError> {
        let url = self.build_url(path);
        debug!("GET {}", url);

        let body = self.execute("GET", path, self.client.get(&url)).await?;
        decode(path, &body)
    }

    /// Make a POST request with a JSON body, returning the raw response body
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<String, UptimeKumaError> {
        let url = self.build_url(path);
        debug!("POST {} with body: {}", url, serde_json::to_string(body)?);

        self.execute("POST", path, self.client.post(&url).json(body))
            .await
    }

    /// Make a PATCH request with a JSON body, returning the raw response body
    pub async fn patch<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<String, UptimeKumaError> {
        let url = self.build_url(path);
        debug!("PATCH {} with body: {}", url, serde_json::to_string(body)?);

        self.execute("PATCH", path, self.client.patch(&url).json(body))
            .await
    }

    /// Make a DELETE request, optionally with a JSON body
    pub async fn delete<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), UptimeKumaError> {
        let url = self.build_url(path);
        debug!("DELETE {}", url);

        let mut request = self.client.delete(&url);
        if let Some(body) = body {
            request = request.json(body);
        }
        self.execute("DELETE", path, request).await?;
        Ok(())
    }

    /// Send an authenticated request; 409 is `AlreadyExists`, anything else
    /// but 200 is an API error.
    async fn execute(
        &self,
        method: &str,
        path: &str,
        request: RequestBuilder,
    ) -> Result<String, UptimeKumaError> {
        let response = request
            .bearer_auth(&self.token.access_token)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if status == StatusCode::CONFLICT {
            return Err(UptimeKumaError::AlreadyExists(format!(
                "{} {} conflicts with an existing entity: {}",
                method, path, body
            )));
        }
        if status != StatusCode::OK {
            return Err(UptimeKumaError::Api(format!(
                "{} {} failed: {} - {}",
                method, path, status, body
            )));
        }

        Ok(body)
    }
}

/// Decode a response body, logging a prefix of it when it does not match.
pub(crate) fn decode<T: DeserializeOwned>(path: &str, body: &str) -> Result<T, UptimeKumaError> {
    serde_json::from_str(body).map_err(|e| {
        debug!(
            "error decoding response body of {}: {} - Response (first 500 chars): {}",
            path,
            e,
            body.chars().take(500).collect::<String>()
        );
        UptimeKumaError::Serialization(e)
    })
}
