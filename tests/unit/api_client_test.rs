//! Unit tests for the HTTP API client against an in-process stub server.

#[path = "../support/mod.rs"]
mod support;

use std::time::Duration;

use reqwest::Method;

use linkshelf::services::api_client::{ApiClient, ApiResponse, BookmarkApi, SettingsRemote};
use linkshelf::types::bookmark::{BookmarkEdit, BookmarkRef};
use linkshelf::types::errors::ApiError;
use linkshelf::types::settings::DisplaySettings;
use support::http_stub::{HttpStub, StubResponse};

const LIST_BODY: &str = r#"[
    {"id": 1, "url": "https://www.rust-lang.org", "title": "Rust", "thumbnail": null,
     "created_date": "Tue, 15 Oct 2024 10:00:00 GMT", "visit": 4},
    {"id": 2, "url": "https://docs.rs", "title": "Docs", "thumbnail": "https://docs.rs/t.png",
     "created_date": "2024-10-16T08:00:00Z"}
]"#;

fn client(stub: &HttpStub) -> ApiClient {
    ApiClient::new(&stub.base_url, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_fetch_bookmarks_decodes_list() {
    let stub = HttpStub::start(vec![("GET /api/urls", StubResponse::json(200, LIST_BODY))]).await;
    let bookmarks = client(&stub).fetch_bookmarks().await.unwrap();

    assert_eq!(bookmarks.len(), 2);
    assert_eq!(bookmarks[0].visit_count, 4);
    assert_eq!(bookmarks[1].visit_count, 0);
    assert_eq!(bookmarks[1].thumbnail.as_deref(), Some("https://docs.rs/t.png"));
}

#[tokio::test]
async fn test_non_success_status_carries_message() {
    let stub = HttpStub::start(vec![(
        "PUT /api/urls",
        StubResponse::json(400, r#"{"message":"title too long"}"#),
    )])
    .await;
    let edit = BookmarkEdit {
        id: 1,
        url: "https://a.io".to_string(),
        title: "A".to_string(),
        thumbnail: None,
    };

    let err = client(&stub).update_bookmark(&edit).await.unwrap_err();
    match err {
        ApiError::Http { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "title too long");
        }
        other => panic!("expected HTTP error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_update_sends_json_body() {
    let stub = HttpStub::start(vec![(
        "PUT /api/urls",
        StubResponse::json(200, r#"{"status":"success"}"#),
    )])
    .await;
    let edit = BookmarkEdit {
        id: 9,
        url: "https://a.io".to_string(),
        title: "Renamed".to_string(),
        thumbnail: Some("https://a.io/t.png".to_string()),
    };
    client(&stub).update_bookmark(&edit).await.unwrap();

    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "PUT");
    assert_eq!(requests[0].content_type.as_deref(), Some("application/json"));
    let body: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
    assert_eq!(body["id"], 9);
    assert_eq!(body["title"], "Renamed");
    assert_eq!(body["thumbnail"], "https://a.io/t.png");
}

#[tokio::test]
async fn test_delete_sends_id_and_url() {
    let stub = HttpStub::start(vec![(
        "DELETE /api/urls",
        StubResponse::json(200, r#"{"success":true}"#),
    )])
    .await;
    let target = BookmarkRef {
        id: 3,
        url: "https://gone.io".to_string(),
    };
    client(&stub).delete_bookmark(&target).await.unwrap();

    let body: serde_json::Value = serde_json::from_str(&stub.requests()[0].body).unwrap();
    assert_eq!(body["id"], 3);
    assert_eq!(body["url"], "https://gone.io");
}

#[tokio::test]
async fn test_record_visit_posts_to_visit_endpoint() {
    let stub = HttpStub::start(vec![("POST /api/urls/5/visit", StubResponse::empty(200))]).await;
    client(&stub).record_visit(5).await.unwrap();
    assert_eq!(stub.requests()[0].path, "/api/urls/5/visit");
}

#[tokio::test]
async fn test_text_and_empty_responses() {
    let stub = HttpStub::start(vec![
        ("GET /plain", StubResponse::text(200, "pong")),
        ("GET /nothing", StubResponse::empty(200)),
    ])
    .await;
    let api = client(&stub);

    let text = api.send_request::<()>(Method::GET, "/plain", None).await.unwrap();
    assert_eq!(text, ApiResponse::Text("pong".to_string()));

    let empty = api.send_request::<()>(Method::GET, "/nothing", None).await.unwrap();
    assert_eq!(empty, ApiResponse::Empty);
}

#[tokio::test]
async fn test_fetch_bookmarks_rejects_malformed_json() {
    let stub = HttpStub::start(vec![(
        "GET /api/urls",
        StubResponse::json(200, r#"{"not":"a list"}"#),
    )])
    .await;
    let err = client(&stub).fetch_bookmarks().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_settings_endpoints() {
    let stub = HttpStub::start(vec![
        (
            "GET /api/settings",
            StubResponse::json(200, r#"{"refreshInterval": 60000, "itemsPerPage": 10}"#),
        ),
        ("PUT /api/settings", StubResponse::empty(200)),
    ])
    .await;
    let api = client(&stub);

    let settings = api.fetch_settings().await.unwrap();
    assert_eq!(
        settings,
        DisplaySettings {
            refresh_interval: 60_000,
            items_per_page: 10
        }
    );

    api.store_settings(&settings).await.unwrap();
    let put = stub
        .requests()
        .into_iter()
        .find(|r| r.method == "PUT")
        .unwrap();
    let body: serde_json::Value = serde_json::from_str(&put.body).unwrap();
    assert_eq!(body, serde_json::json!({"refreshInterval": 60000, "itemsPerPage": 10}));
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    // Bind then drop to get a port with nothing listening.
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let api = ApiClient::new(&format!("http://{}", addr), Duration::from_secs(2)).unwrap();
    let err = api.fetch_bookmarks().await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}

#[tokio::test]
async fn test_fetch_bookmarks_tolerates_untitled_rows() {
    let stub = HttpStub::start(vec![(
        "GET /api/urls",
        StubResponse::json(
            200,
            r#"[
                {"id": 1, "url": "https://a.io", "title": "A", "created_date": 0},
                {"id": 2, "url": "https://b.io", "title": null, "created_date": 0}
            ]"#,
        ),
    )])
    .await;

    let bookmarks = client(&stub).fetch_bookmarks().await.unwrap();

    assert_eq!(bookmarks.len(), 2);
    assert_eq!(bookmarks[1].title, "");
}

#[tokio::test]
async fn test_unknown_route_is_http_not_found() {
    let stub = HttpStub::start(Vec::new()).await;

    let err = client(&stub).fetch_settings().await.unwrap_err();

    match err {
        ApiError::Http { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "not found");
        }
        other => panic!("expected HTTP error, got {:?}", other),
    }
    assert_eq!(stub.requests()[0].path, "/api/settings");
}
