//! Analytics DTOs: the REST snapshot and the streamed `analytics_update` frame.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `type` discriminator of streamed analytics frames
pub const ANALYTICS_UPDATE_TYPE: &str = "analytics_update";

/// Point-in-time analytics counters.
///
/// A newer snapshot always replaces an older one wholesale.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalyticsSnapshot {
    pub total_visits: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_users: Option<u64>,
    /// Hit counts keyed by endpoint path
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub endpoint_stats: BTreeMap<String, u64>,
}

impl AnalyticsSnapshot {
    pub fn with_total_visits(total_visits: u64) -> Self {
        Self {
            total_visits,
            ..Self::default()
        }
    }
}

/// Text frame pushed over `/ws/analytics`
///
/// ```text
/// { "type": "analytics_update", "total_visits": 42 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalyticsUpdateMessage {
    #[serde(rename = "type", default)]
    pub message_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_visits: Option<u64>,
}

impl AnalyticsUpdateMessage {
    /// Snapshot carried by this frame, if it is a complete analytics update.
    pub fn into_snapshot(self) -> Option<AnalyticsSnapshot> {
        if self.message_type != ANALYTICS_UPDATE_TYPE {
            return None;
        }
        self.total_visits.map(AnalyticsSnapshot::with_total_visits)
    }
}
