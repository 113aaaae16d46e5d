//! Integration tests for the HTTP gateway against a fake backend.

use std::sync::Arc;

use frontend::app::{AnalyticsStore, AnalyticsUpdate, LoadOutcome, PageQueryController};
use frontend::core::{ConcallGateway, FrameStream, FrontendError, ReconnectConfig, StreamConnector};
use frontend::services::api::ApiClient;
use serde_json::json;
use shared::AnalyticsSnapshot;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::with_base_url(format!("{}/api", server.uri()))
}

fn page_body() -> serde_json::Value {
    json!({
        "data": [
            { "name": "Acme Ltd", "date": "2025-08-14", "guidance": "Revenue growth of 15-18%" },
            { "name": "Acme Labs", "date": "2025-08-12", "guidance": "NA" }
        ],
        "meta": { "page": 2, "limit": 12, "total": 25, "totalPages": 3 }
    })
}

/// Stream connector for a backend without a WebSocket endpoint
struct NoStream;

#[async_trait::async_trait]
impl StreamConnector for NoStream {
    async fn connect(&self, _url: &str) -> frontend::Result<FrameStream> {
        Err(FrontendError::network("no stream in tests"))
    }
}

#[tokio::test]
async fn list_page_sends_page_and_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/list_concalls"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body()))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server).list_page(2, 12).await.expect("list page");

    assert_eq!(page.data.len(), 2);
    assert_eq!(page.meta.page, 2);
    assert_eq!(page.meta.total, 25);
    assert_eq!(page.meta.total_pages, 3);
    assert!(!page.data[1].has_guidance());
}

#[tokio::test]
async fn search_page_encodes_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/find_concalls"))
        .and(query_param("name", "Acme & Sons"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body()))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server)
        .search_page("Acme & Sons", 1, 12)
        .await
        .expect("search page");
    assert_eq!(page.data[0].name, "Acme Ltd");
}

#[tokio::test]
async fn null_data_reads_as_empty_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/find_concalls"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": null, "meta": { "page": 1, "total": 0 } })),
        )
        .mount(&server)
        .await;

    let page = client_for(&server)
        .search_page("Nobody", 1, 12)
        .await
        .expect("empty search");
    assert!(page.data.is_empty());
    assert_eq!(page.meta.total_pages, 0);
}

#[tokio::test]
async fn analytics_snapshot_with_optional_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/analytics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_visits": 1200,
            "unique_users": 340,
            "endpoint_stats": { "/api/list_concalls": 900 }
        })))
        .mount(&server)
        .await;

    let snapshot = client_for(&server).fetch_analytics().await.expect("analytics");
    assert_eq!(snapshot.total_visits, 1200);
    assert_eq!(snapshot.unique_users, Some(340));
    assert_eq!(snapshot.endpoint_stats.get("/api/list_concalls"), Some(&900));
}

#[tokio::test]
async fn error_body_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/list_concalls"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "error": "Failed to fetch concalls" })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).list_page(1, 12).await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to fetch concalls");
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn status_only_error_without_error_field() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/analytics"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({})))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_analytics().await.unwrap_err();
    assert_eq!(err.to_string(), "HTTP error! status: 404");
}

#[tokio::test]
async fn malformed_success_body_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/analytics"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_analytics().await.unwrap_err();
    assert!(
        matches!(err, FrontendError::MalformedResponse(_)),
        "expected malformed response, got {err:?}"
    );
}

#[tokio::test]
async fn unreachable_backend_is_network_error() {
    let client = ApiClient::with_base_url("http://127.0.0.1:1/api");

    let err = client.list_page(1, 12).await.unwrap_err();
    assert!(err.to_string().starts_with("Network error"), "got {err}");
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn controller_pages_through_backend() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/list_concalls"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body()))
        .mount(&server)
        .await;

    let controller = PageQueryController::new(Arc::new(client_for(&server)), 12);
    assert_eq!(controller.load_page(2, "").await, LoadOutcome::Loaded);

    let state = controller.state();
    assert_eq!(state.current_page, 2);
    assert_eq!(state.total_pages, 3);
    assert_eq!(state.items.len(), 2);
}

#[tokio::test]
async fn store_fetches_once_for_many_views() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/analytics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "total_visits": 42 })))
        .expect(1)
        .mount(&server)
        .await;

    let store = AnalyticsStore::new(
        Arc::new(client_for(&server)),
        Arc::new(NoStream),
        "ws://127.0.0.1:1/ws/analytics",
        ReconnectConfig {
            max_attempts: 0,
            ..ReconnectConfig::default()
        },
    );

    let views: Vec<_> = (0..3).map(|_| store.subscribe()).collect();
    for view in &views {
        assert_eq!(
            view.recv().await,
            Some(AnalyticsUpdate::Data(AnalyticsSnapshot::with_total_visits(42)))
        );
    }

    let late = store.subscribe();
    assert_eq!(
        late.try_recv(),
        Some(AnalyticsUpdate::Data(AnalyticsSnapshot::with_total_visits(42)))
    );
    store.shutdown();
}
