//! # API Client
//!
//! HTTP client for the concall backend. Every endpoint goes through
//! [`ApiClient::get_json`], which normalizes transport failures and non-2xx
//! responses into [`FrontendError`].

use crate::core::config::FrontendConfig;
use crate::core::error::{FrontendError, Result};
use crate::core::service::ConcallGateway;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::{AnalyticsSnapshot, ConcallPage, ErrorResponse};
use std::time::Instant;
use uuid::Uuid;

/// HTTP client for communicating with the concall backend.
///
/// Cheap to clone; the underlying `reqwest::Client` shares its connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `config.api_base_url` with the configured timeout.
    pub fn new(config: &FrontendConfig) -> Self {
        let client = Client::builder()
            .timeout(config.http_timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to build HTTP client, falling back to defaults");
                Client::new()
            });

        Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a client with default settings against `base_url`.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let config = FrontendConfig {
            api_base_url: base_url.into(),
            ..FrontendConfig::default()
        };
        Self::new(&config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET `path` with `query` and decode a JSON body of type `T`.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self.endpoint(path);
        let request_id = Uuid::new_v4();
        let start = Instant::now();

        tracing::debug!(request_id = %request_id, url = %url, query = ?query, "Sending request");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    request_id = %request_id,
                    url = %url,
                    error = %e,
                    duration_ms = start.elapsed().as_millis(),
                    "Network error"
                );
                FrontendError::network(e)
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(FrontendError::network)?;
        let duration = start.elapsed();

        if !status.is_success() {
            let message = error_message(status.as_u16(), &body);
            tracing::warn!(
                request_id = %request_id,
                url = %url,
                status = status.as_u16(),
                duration_ms = duration.as_millis(),
                error = %message,
                "Request failed with non-success status"
            );
            return Err(FrontendError::http(status.as_u16(), message));
        }

        let parsed = serde_json::from_slice::<T>(&body).map_err(|e| {
            tracing::error!(
                request_id = %request_id,
                url = %url,
                error = %e,
                body_len = body.len(),
                "Response parse error"
            );
            FrontendError::MalformedResponse(e.to_string())
        })?;

        tracing::debug!(
            request_id = %request_id,
            url = %url,
            status = status.as_u16(),
            duration_ms = duration.as_millis(),
            "Request completed"
        );
        Ok(parsed)
    }
}

/// User-facing message for a failed response.
///
/// Prefers the backend's `error` field; a body that is not JSON at all reads as
/// a generic network error.
fn error_message(status: u16, body: &[u8]) -> String {
    match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(value) => serde_json::from_value::<ErrorResponse>(value)
            .ok()
            .map(|e| e.error)
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| format!("HTTP error! status: {status}")),
        Err(_) => "Network error".to_string(),
    }
}

#[async_trait::async_trait]
impl ConcallGateway for ApiClient {
    async fn list_page(&self, page: u32, limit: u32) -> Result<ConcallPage> {
        crate::services::api::concalls::list_concalls(self, page, limit).await
    }

    async fn search_page(&self, name: &str, page: u32, limit: u32) -> Result<ConcallPage> {
        crate::services::api::concalls::find_concalls(self, name, page, limit).await
    }

    async fn fetch_analytics(&self) -> Result<AnalyticsSnapshot> {
        crate::services::api::analytics::get_analytics(self).await
    }
}
