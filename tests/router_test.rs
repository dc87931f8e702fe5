// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use catalog_agent::app::{create_router, AppState, VERSION};
use catalog_agent::models::page::{ErrorPanel, SearchPage};
use catalog_agent::models::preferences::{FontSize, PreferencesResponse, Theme, ViewMode};
use catalog_agent::models::search::SearchOptions;
use catalog_agent::models::settings::AppConfig;
use catalog_agent::models::version::VersionResponse;
use catalog_agent::services::search::SearchClient;
use httpmock::prelude::*;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

fn test_config(host: &str) -> AppConfig {
    AppConfig::from_lookup(|key| match key {
        "MEILISEARCH_HOST" => Some(host.to_string()),
        "MEILISEARCH_SEARCH_KEY" => Some("test-search-key".to_string()),
        _ => None,
    })
    .expect("Failed to build test config")
}

fn state_with_search(server: &MockServer) -> AppState {
    let config = test_config(&server.base_url());
    let client = SearchClient::new(
        &config.meilisearch_host,
        config.search_key.clone(),
        config.indexes.content.clone(),
        None,
    )
    .expect("Failed to create search client");
    AppState::new(&config, Some(Arc::new(client)))
}

fn app_with_search(server: &MockServer) -> Router {
    create_router(state_with_search(server))
}

fn put_preferences(body: &'static str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("PUT")
        .uri("/preferences")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body)).unwrap()
}

fn app_without_search() -> Router {
    let config = test_config("http://127.0.0.1:7700");
    create_router(AppState::new(&config, None))
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

async fn read_json<T: DeserializeOwned>(response: axum::response::Response) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn set_cookies(response: &axum::response::Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_version_endpoint_response() {
    let response = app_without_search()
        .oneshot(get("/version", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let version: VersionResponse = read_json(response).await;
    assert_eq!(version.agent, "catalog-agent");
    assert_eq!(version.version, VERSION);
    assert_eq!(VERSION.split('.').count(), 3);
}

#[tokio::test]
async fn test_invalid_route_returns_404() {
    let response = app_without_search()
        .oneshot(get("/invalid", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_view_mode_survives_cookie_round_trip() {
    let app = app_without_search();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/preferences")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"view_mode":"grid"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookies = set_cookies(&response);
    let view_cookie = cookies
        .iter()
        .find(|c| c.starts_with("viewMode="))
        .expect("viewMode cookie not set");
    assert!(view_cookie.starts_with("viewMode=grid"));
    assert!(view_cookie.contains("Max-Age=2592000"));
    assert!(view_cookie.contains("Path=/"));

    let updated: PreferencesResponse = read_json(response).await;
    assert_eq!(updated.view_mode, ViewMode::Grid);

    // Simulated reload: the browser sends the cookie back
    let response = app
        .oneshot(get("/preferences", Some("viewMode=grid")))
        .await
        .unwrap();
    let reloaded: PreferencesResponse = read_json(response).await;
    assert_eq!(reloaded.view_mode, ViewMode::Grid);
}

#[tokio::test]
async fn test_unchanged_preference_writes_no_cookie() {
    let response = app_without_search()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/preferences")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::COOKIE, "viewMode=list; userLanguage=en")
                .body(Body::from(r#"{"view_mode":"list","language":"en"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookies(&response).is_empty());
}

#[tokio::test]
async fn test_theme_and_font_size_survive_cookie_round_trip() {
    let app = app_without_search();

    let response = app
        .clone()
        .oneshot(put_preferences(r#"{"theme":"dark","font_size":"large"}"#, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookies = set_cookies(&response);
    assert!(cookies.iter().any(|c| c.starts_with("userTheme=dark")));
    assert!(cookies.iter().any(|c| c.starts_with("userFontSize=large")));
    assert!(!cookies.iter().any(|c| c.starts_with("viewMode=")));

    let response = app
        .oneshot(get("/preferences", Some("userTheme=dark; userFontSize=large")))
        .await
        .unwrap();
    let reloaded: PreferencesResponse = read_json(response).await;
    assert_eq!(reloaded.theme, Theme::Dark);
    assert_eq!(reloaded.font_size, FontSize::Large);
    assert_eq!(reloaded.view_mode, ViewMode::List);
}

#[tokio::test]
async fn test_invalid_cookie_rewritten_when_default_chosen() {
    let response = app_without_search()
        .oneshot(put_preferences(
            r#"{"view_mode":"list","font_size":"medium"}"#,
            Some("viewMode=bogus; userFontSize=huge"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookies = set_cookies(&response);
    assert!(cookies.iter().any(|c| c.starts_with("viewMode=list")));
    assert!(cookies.iter().any(|c| c.starts_with("userFontSize=medium")));
}

#[tokio::test]
async fn test_preferences_defaults_and_token() {
    let response = app_without_search()
        .oneshot(get("/preferences", Some("token=opaque; viewMode=bogus")))
        .await
        .unwrap();

    let prefs: PreferencesResponse = read_json(response).await;
    assert_eq!(prefs.view_mode, ViewMode::List);
    assert!(prefs.signed_in);
}

#[tokio::test]
async fn test_search_without_client_is_unavailable() {
    let response = app_without_search()
        .oneshot(get("/search?q=rpg", Some("userLanguage=en")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let panel: ErrorPanel = read_json(response).await;
    assert_eq!(panel.message, "Something went wrong. Please try again.");
    assert_eq!(panel.action, "reload");
}

#[tokio::test]
async fn test_options_without_client_are_empty() {
    let response = app_without_search()
        .oneshot(get("/search/options", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let options: SearchOptions = read_json(response).await;
    assert!(options.categories.is_empty());
    assert!(options.tags.is_empty());
    assert!(options.platforms.is_empty());
}

#[tokio::test]
async fn test_search_page_end_to_end() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/indexes/article/search")
                .header("authorization", "Bearer test-search-key")
                .json_body(json!({
                    "q": "visual novel",
                    "offset": 12,
                    "limit": 12,
                    "filter": ["categories.id = \"5\""],
                    "sort": ["updatedAt:desc"]
                }));
            then.status(200).json_body(json!({
                "hits": [{
                    "id": 13,
                    "title": "Sunset Diary",
                    "slug": "sunset-diary",
                    "categories": [{ "id": 5, "name": "Visual Novel" }],
                    "updatedAt": "2024-05-01T10:30:00Z"
                }],
                "estimatedTotalHits": 30,
                "offset": 12,
                "limit": 12,
                "processingTimeMs": 4
            }));
        })
        .await;

    let response = app_with_search(&server)
        .oneshot(get(
            "/search?q=visual%20novel&page=2&category=5",
            Some("viewMode=grid"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookies(&response)
        .iter()
        .any(|c| c.starts_with("searchSession=")));

    let page: SearchPage = read_json(response).await;
    mock.assert_async().await;

    assert_eq!(page.view_mode, ViewMode::Grid);
    assert_eq!(page.hits.len(), 1);
    assert_eq!(page.hits[0].href, "/article/sunset-diary");
    assert_eq!(page.hits[0].categories, vec!["Visual Novel"]);
    assert_eq!(page.hits[0].updated.as_deref(), Some("2024-05-01"));
    assert_eq!(page.pagination.page, 2);
    assert_eq!(page.pagination.total_pages, 3);
    assert_eq!(
        page.pagination.prev_href.as_deref(),
        Some("/search?q=visual+novel&category=5")
    );
    assert_eq!(
        page.pagination.next_href.as_deref(),
        Some("/search?q=visual+novel&page=3&category=5")
    );
    assert!(page.empty_message.is_none());
}

#[tokio::test]
async fn test_search_empty_result_is_not_an_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/indexes/article/search");
            then.status(200).json_body(json!({ "hits": [], "estimatedTotalHits": 0 }));
        })
        .await;

    let response = app_with_search(&server)
        .oneshot(get("/search?q=nothing", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let page: SearchPage = read_json(response).await;
    assert!(page.hits.is_empty());
    assert_eq!(page.empty_message.as_deref(), Some("ไม่พบผลลัพธ์ที่ตรงกับการค้นหา"));
}

#[tokio::test]
async fn test_upstream_failure_renders_error_panel() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/indexes/article/search");
            then.status(500).body("index unavailable");
        })
        .await;

    let response = app_with_search(&server)
        .oneshot(get("/search", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let panel: ErrorPanel = read_json(response).await;
    assert_eq!(panel.message, "เกิดข้อผิดพลาดบางอย่าง กรุณาลองใหม่อีกครั้ง");
    assert_eq!(panel.action, "reload");
}

#[tokio::test]
async fn test_stale_search_response_is_discarded() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/indexes/article/search")
                .json_body(json!({ "q": "slow", "offset": 0, "limit": 12, "sort": ["updatedAt:desc"] }));
            then.status(200)
                .delay(Duration::from_millis(400))
                .json_body(json!({ "hits": [{ "id": 1, "title": "Slow" }], "estimatedTotalHits": 1 }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/indexes/article/search")
                .json_body(json!({ "q": "fast", "offset": 0, "limit": 12, "sort": ["updatedAt:desc"] }));
            then.status(200)
                .json_body(json!({ "hits": [{ "id": 2, "title": "Fast" }], "estimatedTotalHits": 1 }));
        })
        .await;

    let app = app_with_search(&server);
    let cookie = "searchSession=visitor-1";

    let slow = tokio::spawn({
        let app = app.clone();
        async move { app.oneshot(get("/search?q=slow", Some(cookie))).await.unwrap() }
    });
    tokio::time::sleep(Duration::from_millis(100)).await;

    let fast = app
        .oneshot(get("/search?q=fast", Some(cookie)))
        .await
        .unwrap();
    assert_eq!(fast.status(), StatusCode::OK);
    let page: SearchPage = read_json(fast).await;
    assert_eq!(page.hits[0].title, "Fast");

    let slow = slow.await.unwrap();
    assert_eq!(slow.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = read_json(slow).await;
    assert_eq!(body, json!({ "superseded": true }));
}

#[tokio::test]
async fn test_superseded_failure_is_discarded() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/indexes/article/search")
                .json_body(json!({ "q": "slow", "offset": 0, "limit": 12, "sort": ["updatedAt:desc"] }));
            then.status(500)
                .delay(Duration::from_millis(400))
                .body("index unavailable");
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/indexes/article/search")
                .json_body(json!({ "q": "fast", "offset": 0, "limit": 12, "sort": ["updatedAt:desc"] }));
            then.status(200)
                .json_body(json!({ "hits": [{ "id": 2, "title": "Fast" }], "estimatedTotalHits": 1 }));
        })
        .await;

    let app = app_with_search(&server);
    let cookie = "searchSession=visitor-2";

    let slow = tokio::spawn({
        let app = app.clone();
        async move { app.oneshot(get("/search?q=slow", Some(cookie))).await.unwrap() }
    });
    tokio::time::sleep(Duration::from_millis(100)).await;

    let fast = app
        .oneshot(get("/search?q=fast", Some(cookie)))
        .await
        .unwrap();
    assert_eq!(fast.status(), StatusCode::OK);

    // The older search failed after the newer one rendered; no error panel
    let slow = slow.await.unwrap();
    assert_eq!(slow.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = read_json(slow).await;
    assert_eq!(body, json!({ "superseded": true }));
}

#[tokio::test]
async fn test_search_without_session_cookie_is_not_tracked() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/indexes/article/search");
            then.status(200).json_body(json!({ "hits": [], "estimatedTotalHits": 0 }));
        })
        .await;

    let state = state_with_search(&server);
    let sessions = state.sessions.clone();
    let app = create_router(state);

    for _ in 0..20 {
        let response = app.clone().oneshot(get("/search", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(set_cookies(&response)
            .iter()
            .any(|c| c.starts_with("searchSession=")));
    }
    assert!(sessions.is_empty());

    app.oneshot(get("/search", Some("searchSession=returning")))
        .await
        .unwrap();
    assert_eq!(sessions.len(), 1);
}

#[tokio::test]
async fn test_hit_with_null_fields_still_renders() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/indexes/article/search");
            then.status(200).json_body(json!({
                "hits": [{
                    "id": 1,
                    "title": "A",
                    "images": null,
                    "categories": null,
                    "tags": [{ "id": 4, "name": "Horror" }]
                }],
                "estimatedTotalHits": 1
            }));
        })
        .await;

    let response = app_with_search(&server)
        .oneshot(get("/search", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let page: SearchPage = read_json(response).await;
    assert_eq!(page.hits[0].title, "A");
    assert!(page.hits[0].categories.is_empty());
    assert_eq!(page.hits[0].tags, vec!["Horror"]);
    assert!(page.hits[0].cover_image.is_none());
}

#[tokio::test]
async fn test_openapi_document_served() {
    let response = app_without_search()
        .oneshot(get("/api-docs/openapi.json", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let doc: serde_json::Value = read_json(response).await;
    assert!(doc["components"]["schemas"]["SearchPage"].is_object());
}
