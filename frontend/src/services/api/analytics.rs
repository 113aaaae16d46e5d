//! # Analytics Endpoint

use super::client::ApiClient;
use crate::core::error::Result;
use shared::AnalyticsSnapshot;

/// `GET /analytics`
#[tracing::instrument(skip(client))]
pub async fn get_analytics(client: &ApiClient) -> Result<AnalyticsSnapshot> {
    let snapshot = client.get_json::<AnalyticsSnapshot>("analytics", &[]).await?;
    tracing::debug!(total_visits = snapshot.total_visits, "Analytics snapshot fetched");
    Ok(snapshot)
}
