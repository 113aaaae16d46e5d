//! # Common Error Types
//!
//! Consolidated error handling for the concall front-end.
//!
//! ## Error Categories
//!
//! - **Transport**: the backend was unreachable or answered with a non-2xx status
//! - **MalformedResponse**: a body could not be parsed as the expected shape
//! - **Config**: an environment value could not be used
//! - **ShutDown**: the analytics store was torn down while a caller waited on it
//!
//! An empty result set is *not* an error: zero concalls is a valid, renderable
//! state and is reported through a successful [`shared::ConcallPage`].
//!
//! ## Usage Pattern
//!
//! ```rust,no_run
//! use frontend::core::error::{FrontendError, Result};
//!
//! fn parse_limit(raw: &str) -> Result<u32> {
//!     raw.parse()
//!         .map_err(|_| FrontendError::Config(format!("invalid page limit: {raw}")))
//! }
//! ```

use thiserror::Error;

/// Front-end error type.
///
/// `Clone` because a single analytics fetch result is shared by every caller
/// attached to it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FrontendError {
    /// Network failure or non-2xx status.
    ///
    /// `message` is what the user sees: the backend's `error` field when it sent
    /// one, otherwise a generic description.
    #[error("{message}")]
    Transport {
        status: Option<u16>,
        message: String,
    },

    /// Response body did not match the expected shape.
    #[error("Failed to parse response: {0}")]
    MalformedResponse(String),

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The analytics store was shut down.
    #[error("Analytics store has been shut down")]
    ShutDown,
}

impl FrontendError {
    /// Transport error for a request that never produced a response
    pub fn network(err: impl std::fmt::Display) -> Self {
        FrontendError::Transport {
            status: None,
            message: format!("Network error: {err}"),
        }
    }

    /// Transport error for a non-2xx response
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        FrontendError::Transport {
            status: Some(status),
            message: message.into(),
        }
    }

    /// HTTP status if the backend answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            FrontendError::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

/// Convenience type alias for `Result<T, FrontendError>`.
pub type Result<T> = std::result::Result<T, FrontendError>;

impl From<reqwest::Error> for FrontendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FrontendError::MalformedResponse(err.to_string())
        } else {
            FrontendError::network(err)
        }
    }
}

impl From<serde_json::Error> for FrontendError {
    fn from(err: serde_json::Error) -> Self {
        FrontendError::MalformedResponse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_message_is_displayed_verbatim() {
        let err = FrontendError::http(500, "Failed to fetch concalls");
        assert_eq!(err.to_string(), "Failed to fetch concalls");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_network_error_has_no_status() {
        let err = FrontendError::network("connection refused");
        assert_eq!(err.to_string(), "Network error: connection refused");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_serde_error_is_malformed_response() {
        let err: FrontendError = serde_json::from_str::<u64>("\"x\"").unwrap_err().into();
        assert!(matches!(err, FrontendError::MalformedResponse(_)));
    }
}
