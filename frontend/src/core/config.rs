//! Front-end configuration from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `CONCALL_API_URL` | `http://localhost:8080/api` |
//! | `CONCALL_PAGE_ORIGIN` | origin of `CONCALL_API_URL` |
//! | `CONCALL_STREAM_URL` | derived from the page origin |
//! | `CONCALL_DEV_STREAM` | `0`; `1` points the stream at `ws://localhost:8080/ws/analytics` |
//! | `CONCALL_PAGE_LIMIT` | `12` |
//! | `CONCALL_RECONNECT_MAX_ATTEMPTS` | `5` |
//! | `CONCALL_RECONNECT_BASE_DELAY_MS` | `1000` |
//! | `CONCALL_HTTP_TIMEOUT_SECS` | `10` |

use crate::core::error::{FrontendError, Result};
use reqwest::Url;
use shared::DEFAULT_PAGE_LIMIT;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:8080/api";
/// Path the backend serves the analytics WebSocket on
pub const STREAM_PATH: &str = "/ws/analytics";
/// Fixed stream endpoint used while developing against a local backend
pub const DEV_STREAM_URL: &str = "ws://localhost:8080/ws/analytics";

/// Reconnect policy settings for the analytics stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectConfig {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_millis(1000),
        }
    }
}

/// Front-end configuration
#[derive(Debug, Clone)]
pub struct FrontendConfig {
    /// Base URL the REST endpoints hang off (`{api}/list_concalls`, ...)
    pub api_base_url: String,
    /// Origin the stream URL is derived from
    pub page_origin: String,
    /// Explicit stream URL; wins over everything else
    pub stream_url_override: Option<String>,
    /// Use [`DEV_STREAM_URL`] instead of deriving from the page origin
    pub dev_stream: bool,
    /// Items per page for list and search calls
    pub page_limit: u32,
    pub reconnect: ReconnectConfig,
    pub http_timeout: Duration,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            page_origin: "http://localhost:8080".to_string(),
            stream_url_override: None,
            dev_stream: false,
            page_limit: DEFAULT_PAGE_LIMIT,
            reconnect: ReconnectConfig::default(),
            http_timeout: Duration::from_secs(10),
        }
    }
}

impl FrontendConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let api_base_url = lookup("CONCALL_API_URL")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base_url);
        let page_origin = match lookup("CONCALL_PAGE_ORIGIN") {
            Some(origin) => origin,
            None => origin_of(&api_base_url)?,
        };

        let page_limit = parse_var(&lookup, "CONCALL_PAGE_LIMIT")?.unwrap_or(defaults.page_limit);
        if page_limit == 0 {
            return Err(FrontendError::Config(
                "CONCALL_PAGE_LIMIT must be at least 1".to_string(),
            ));
        }

        let reconnect = ReconnectConfig {
            max_attempts: parse_var(&lookup, "CONCALL_RECONNECT_MAX_ATTEMPTS")?
                .unwrap_or(defaults.reconnect.max_attempts),
            base_delay: parse_var(&lookup, "CONCALL_RECONNECT_BASE_DELAY_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.reconnect.base_delay),
        };

        let http_timeout = parse_var(&lookup, "CONCALL_HTTP_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.http_timeout);

        Ok(Self {
            api_base_url,
            page_origin,
            stream_url_override: lookup("CONCALL_STREAM_URL").filter(|v| !v.trim().is_empty()),
            dev_stream: lookup("CONCALL_DEV_STREAM").is_some_and(|v| v == "1"),
            page_limit,
            reconnect,
            http_timeout,
        })
    }

    /// WebSocket endpoint for analytics updates.
    ///
    /// Precedence: explicit override, then the local development endpoint, then
    /// the page origin with its scheme swapped (`http`→`ws`, `https`→`wss`) and
    /// the path replaced by [`STREAM_PATH`].
    pub fn stream_url(&self) -> Result<String> {
        if let Some(raw) = &self.stream_url_override {
            let url = Url::parse(raw)
                .map_err(|e| FrontendError::Config(format!("invalid stream URL {raw}: {e}")))?;
            if !matches!(url.scheme(), "ws" | "wss") {
                return Err(FrontendError::Config(format!(
                    "stream URL must use ws or wss: {raw}"
                )));
            }
            return Ok(raw.clone());
        }
        if self.dev_stream {
            return Ok(DEV_STREAM_URL.to_string());
        }
        derive_stream_url(&self.page_origin)
    }
}

/// Swap an http(s) origin for the matching ws(s) analytics endpoint
pub fn derive_stream_url(page_origin: &str) -> Result<String> {
    let mut url = Url::parse(page_origin)
        .map_err(|e| FrontendError::Config(format!("invalid page origin {page_origin}: {e}")))?;

    let scheme = match url.scheme() {
        "https" | "wss" => "wss",
        "http" | "ws" => "ws",
        other => {
            return Err(FrontendError::Config(format!(
                "unsupported page origin scheme: {other}"
            )))
        }
    };
    url.set_scheme(scheme)
        .map_err(|_| FrontendError::Config(format!("cannot use scheme {scheme} for {page_origin}")))?;
    url.set_path(STREAM_PATH);
    url.set_query(None);
    url.set_fragment(None);

    Ok(url.to_string())
}

fn origin_of(api_base_url: &str) -> Result<String> {
    let url = Url::parse(api_base_url)
        .map_err(|e| FrontendError::Config(format!("invalid API URL {api_base_url}: {e}")))?;
    Ok(url.origin().ascii_serialization())
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| FrontendError::Config(format!("{key} has invalid value: {raw}"))),
    }
}
