//! # Concall Endpoints
//!
//! Paginated listing and name search.

use super::client::ApiClient;
use crate::core::error::Result;
use shared::ConcallPage;

/// `GET /list_concalls?page=&limit=`
#[tracing::instrument(skip(client))]
pub async fn list_concalls(client: &ApiClient, page: u32, limit: u32) -> Result<ConcallPage> {
    let result = client
        .get_json::<ConcallPage>(
            "list_concalls",
            &[("page", page.to_string()), ("limit", limit.to_string())],
        )
        .await;

    if let Ok(ref response) = result {
        tracing::debug!(
            count = response.data.len(),
            total = response.meta.total,
            total_pages = response.meta.total_pages,
            "Concalls listed"
        );
    }
    result
}

/// `GET /find_concalls?name=&page=&limit=`
///
/// `name` is percent-encoded by the query builder.
#[tracing::instrument(skip(client))]
pub async fn find_concalls(
    client: &ApiClient,
    name: &str,
    page: u32,
    limit: u32,
) -> Result<ConcallPage> {
    let result = client
        .get_json::<ConcallPage>(
            "find_concalls",
            &[
                ("name", name.to_string()),
                ("page", page.to_string()),
                ("limit", limit.to_string()),
            ],
        )
        .await;

    if let Ok(ref response) = result {
        tracing::debug!(
            count = response.data.len(),
            total = response.meta.total,
            "Concall search completed"
        );
    }
    result
}
