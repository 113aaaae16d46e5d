//! # Service Traits
//!
//! Seams for dependency injection: the store and the query controller only
//! ever talk to the backend through these traits, so tests swap in fakes.

use crate::core::error::Result;
use async_trait::async_trait;
use futures::stream::BoxStream;
use shared::{AnalyticsSnapshot, ConcallPage};

/// Remote data gateway: the three backend operations the front-end uses.
#[async_trait]
pub trait ConcallGateway: Send + Sync {
    /// One page of the unfiltered listing
    async fn list_page(&self, page: u32, limit: u32) -> Result<ConcallPage>;

    /// One page of concalls whose name matches `name`
    async fn search_page(&self, name: &str, page: u32, limit: u32) -> Result<ConcallPage>;

    /// Current analytics counters
    async fn fetch_analytics(&self) -> Result<AnalyticsSnapshot>;
}

/// Text payloads of an open stream connection.
///
/// The stream ending (or yielding an error) means the connection is gone.
pub type FrameStream = BoxStream<'static, Result<String>>;

/// Opens persistent stream connections.
#[async_trait]
pub trait StreamConnector: Send + Sync {
    async fn connect(&self, url: &str) -> Result<FrameStream>;
}
