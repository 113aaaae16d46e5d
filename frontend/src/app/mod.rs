//! # Application Orchestrator
//!
//! [`App`] wires the services together once at startup and hands them to the
//! views:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  App                                                        │
//! │  ├── AnalyticsStore (one per process)                       │
//! │  │     ├── SingleFlight fetch ──► ConcallGateway::analytics │
//! │  │     ├── subscribers ──► AnalyticsUpdate (async_channel)  │
//! │  │     └── connection task ──► StreamConnector (WebSocket)  │
//! │  └── PageQueryController (one per list view)                │
//! │        └── generation-checked loads ──► ConcallGateway      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Components
//!
//! - **[`AnalyticsStore`]**: shared analytics cache (see [`analytics_store`])
//! - **[`PageQueryController`]**: list/search/paging flow (see [`query`])
//! - **[`PageQueryState`]**: what a list view renders (see [`state`])
//! - **[`AnalyticsUpdate`]**: deliveries to analytics subscribers (see [`events`])
//! - **[`connection`]**: stream connection states and reconnect policy

pub mod analytics_store;
pub mod connection;
pub mod events;
pub mod query;
pub mod single_flight;
pub mod state;

pub use analytics_store::{AnalyticsStore, Subscription, SubscriptionId};
pub use connection::{ConnectionState, ConnectionStatus, ReconnectPolicy};
pub use events::AnalyticsUpdate;
pub use query::{LoadOutcome, PageChange, PageQueryController};
pub use state::{PageQueryState, QueryMode};

use crate::core::config::FrontendConfig;
use crate::core::error::Result;
use crate::core::service::{ConcallGateway, StreamConnector};
use crate::services::api::{ApiClient, WsConnector};
use std::sync::Arc;
use tracing::info;

/// Composition root: owns the gateway and the single analytics store.
///
/// Create one per process and share it; views take what they need from it.
pub struct App {
    config: FrontendConfig,
    gateway: Arc<dyn ConcallGateway>,
    analytics: AnalyticsStore,
}

impl App {
    /// Build the production services from `config`.
    pub fn new(config: FrontendConfig) -> Result<Self> {
        let gateway: Arc<dyn ConcallGateway> = Arc::new(ApiClient::new(&config));
        Self::with_services(config, gateway, Arc::new(WsConnector))
    }

    /// Build the app around caller-supplied gateway and connector.
    pub fn with_services(
        config: FrontendConfig,
        gateway: Arc<dyn ConcallGateway>,
        connector: Arc<dyn StreamConnector>,
    ) -> Result<Self> {
        let stream_url = config.stream_url()?;
        info!(
            api = %config.api_base_url,
            stream = %stream_url,
            page_limit = config.page_limit,
            "Starting concall front-end"
        );

        let analytics = AnalyticsStore::new(
            gateway.clone(),
            connector,
            stream_url,
            config.reconnect,
        );

        Ok(Self {
            config,
            gateway,
            analytics,
        })
    }

    pub fn config(&self) -> &FrontendConfig {
        &self.config
    }

    /// The process-wide analytics store
    pub fn analytics(&self) -> &AnalyticsStore {
        &self.analytics
    }

    /// A fresh controller for one list/search view
    pub fn query_controller(&self) -> PageQueryController {
        PageQueryController::new(self.gateway.clone(), self.config.page_limit)
    }

    pub fn shutdown(&self) {
        self.analytics.shutdown();
    }
}
