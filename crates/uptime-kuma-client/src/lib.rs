//! Uptime Kuma REST API Client
//!
//! A Rust client library for the Uptime Kuma REST API (as served by
//! uptime-kuma-api). Provides type-safe models and name-keyed operations for
//! monitors and tags.
//!
//! # Example
//!
//! ```no_run
//! use uptime_kuma_client::{ClientConfig, DesiredMonitor, UptimeKumaClient, UptimeKumaClientTrait};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Log in; the token is held for the client's lifetime
//! let config = ClientConfig::new("http://uptime-kuma-api:8000", "admin", "secret");
//! let client = UptimeKumaClient::authenticate(config).await?;
//!
//! // Create a monitor unless one with the same name exists
//! let desired = DesiredMonitor {
//!     name: "shop".to_string(),
//!     url: "https://shop.example.com".to_string(),
//!     interval: 60,
//!     tags: vec!["k8s-shop".to_string()],
//! };
//! client.create_monitor(&desired).await?;
//!
//! // Delete by name; deleting something absent is not an error
//! client.delete_monitor("shop").await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **Monitors**: list, get by name, create, update by ID, delete by name
//! - **Tags**: list, get by name, create-if-absent, delete by name
//! - **Mocking**: `test-util` feature exposes an in-memory `MockUptimeKumaClient`

pub mod client;
pub mod common;
pub mod error;
pub mod lookup;
pub mod models;
#[path = "trait.rs"]
pub mod uptime_kuma_trait;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;

pub use client::{ClientConfig, UptimeKumaClient};
pub use common::HttpClient;
pub use error::UptimeKumaError;
pub use models::*;
pub use uptime_kuma_trait::UptimeKumaClientTrait;
#[cfg(any(test, feature = "test-util"))]
pub use mock::{MockUptimeKumaClient, RecordedCall};
