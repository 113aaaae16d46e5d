//! # Core Abstractions
//!
//! Error types, configuration and the service traits the rest of the crate is
//! written against.
//!
//! - **[`error`]**: [`FrontendError`] and the `Result<T>` alias
//! - **[`config`]**: [`FrontendConfig`] loaded from the environment
//! - **[`service`]**: [`ConcallGateway`] and [`StreamConnector`] seams
//!
//! ## Dependency Injection
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use frontend::core::{ConcallGateway, FrontendConfig};
//! use frontend::services::api::ApiClient;
//!
//! let config = FrontendConfig::default();
//! let gateway: Arc<dyn ConcallGateway> = Arc::new(ApiClient::new(&config));
//! ```

pub mod config;
pub mod error;
pub mod service;

pub use config::{FrontendConfig, ReconnectConfig};
pub use error::{FrontendError, Result};
pub use service::{ConcallGateway, FrameStream, StreamConnector};
