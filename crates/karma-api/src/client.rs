//! # HTTP Client Management
//!
//! Shared HTTP client configuration for the external backend.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Backend HTTP Client                                │
//! │                                                                         │
//! │  App startup                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BackendConfig::new(base_url) ← Configure timeouts                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Backend::new(config) ← Builds ONE reqwest::Client                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogClient / CartClient / SalesClient                              │
//! │  (cheap handles sharing the same connection pool)                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `reqwest::Client` keeps an internal connection pool and is designed to
//! be cloned; every endpoint client shares the one built here.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{ApiError, ApiResult};

// =============================================================================
// Configuration
// =============================================================================

/// Backend connection configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = BackendConfig::new("http://127.0.0.1:5000")
///     .timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL of the external service, scheme included.
    pub base_url: String,

    /// Per-request timeout.
    /// Default: 30 seconds
    pub timeout: Duration,
}

impl BackendConfig {
    /// Creates a configuration with default timeouts.
    pub fn new(base_url: impl Into<String>) -> Self {
        BackendConfig {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Overrides the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// =============================================================================
// HTTP Client
// =============================================================================

/// Thin wrapper around `reqwest::Client` that owns base-url joining,
/// status mapping and response decoding for every endpoint client.
#[derive(Debug, Clone)]
pub(crate) struct HttpClient {
    base_url: String,
    inner: reqwest::Client,
}

impl HttpClient {
    pub(crate) fn new(config: &BackendConfig) -> ApiResult<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ApiError::InvalidBaseUrl(config.base_url.clone()));
        }

        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(HttpClient { base_url, inner })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        debug!(path = %path, "GET");
        let response = self.inner.get(self.url(path)).send().await?;
        Self::decode(response).await
    }

    pub(crate) async fn get_json_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        debug!(path = %path, params = query.len(), "GET");
        let response = self.inner.get(self.url(path)).query(query).send().await?;
        Self::decode(response).await
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        debug!(path = %path, "POST");
        let response = self.inner.post(self.url(path)).json(body).send().await?;
        Self::decode(response).await
    }

    pub(crate) async fn delete(&self, path: &str) -> ApiResult<()> {
        debug!(path = %path, "DELETE");
        let response = self.inner.delete(self.url(path)).send().await?;
        Self::check_status(response).await?;
        Ok(())
    }

    /// Maps non-success statuses to `ApiError::Status`, carrying the
    /// response body as the message.
    async fn check_status(response: reqwest::Response) -> ApiResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        // Body size is unbounded on errors; keep logs and messages short
        let message = if message.chars().count() > 200 {
            let truncated: String = message.chars().take(200).collect();
            format!("{}…", truncated)
        } else {
            message
        };

        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
        let response = Self::check_status(response).await?;
        Ok(response.json::<T>().await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
