//! # Application Events
//!
//! Typed updates the analytics store publishes to its subscribers.

use crate::core::error::FrontendError;
use shared::AnalyticsSnapshot;

/// One delivery to an analytics subscriber
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsUpdate {
    /// A new snapshot, from a fetch or a streamed frame
    Data(AnalyticsSnapshot),
    /// A fetch failed; any snapshot already shown stays valid
    Error(FrontendError),
}
