// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Application state, route handlers, and router construction.
//!
//! This module is `pub` so that integration tests can build a test router directly
//! without starting the full binary.

use crate::models::filters::FilterState;
use crate::models::page::{ErrorPanel, SearchPage, SupersededResponse};
use crate::models::preferences::Language;
use crate::models::search::SearchOptions;
use crate::models::settings::{AppConfig, IndexNames};
use crate::models::version::VersionResponse;
use crate::routes::{preferences_router, ApiDoc};
use crate::services::options::fetch_options;
use crate::services::preferences::{
    existing_search_session, start_search_session, ClientSession,
};
use crate::services::query_builder::build_search_query;
use crate::services::render::render_page;
use crate::services::search::{FetchError, SearchClient};
use crate::services::sequencer::{RequestSequencer, SearchSessions};
use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tower_cookies::{CookieManagerLayer, Cookies};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Application version extracted from `Cargo.toml` at compile time.
/// The patch segment can be overridden via `CATALOG_PATCH_VERSION` (see `build.rs`).
pub const VERSION: &str = env!("CATALOG_VERSION");

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Shared application state injected into every route handler via `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    /// `None` when the search index could not be configured; search routes
    /// then answer 503 and option lists stay empty.
    pub search_client: Option<Arc<SearchClient>>,
    pub indexes: IndexNames,
    pub page_size: u32,
    pub options_limit: u32,
    pub sessions: Arc<SearchSessions>,
}

impl AppState {
    pub fn new(config: &AppConfig, search_client: Option<Arc<SearchClient>>) -> Self {
        Self {
            search_client,
            indexes: config.indexes.clone(),
            page_size: config.page_size,
            options_limit: config.options_limit,
            sessions: Arc::new(SearchSessions::new()),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Page-level failures. Rendered as a localized error panel whose only
/// recovery action is a reload.
#[derive(Debug)]
pub enum AppError {
    SearchUnavailable(Language),
    Upstream(Language, FetchError),
    Superseded,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, language) = match self {
            AppError::Superseded => {
                return (
                    StatusCode::CONFLICT,
                    Json(SupersededResponse { superseded: true }),
                )
                    .into_response();
            }
            AppError::SearchUnavailable(language) => {
                tracing::warn!("search requested but no search client is configured");
                (StatusCode::SERVICE_UNAVAILABLE, language)
            }
            AppError::Upstream(language, e) => {
                tracing::error!(error = %e, "search failed");
                (StatusCode::BAD_GATEWAY, language)
            }
        };

        let panel = ErrorPanel {
            message: language.error_message().to_string(),
            action: "reload".to_string(),
        };
        (status, Json(panel)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

pub async fn version_handler() -> Json<VersionResponse> {
    Json(VersionResponse {
        agent: "catalog-agent".to_string(),
        version: VERSION.to_string(),
    })
}

/// GET /search - filter state from the query string, one search, one page.
pub async fn search_handler(
    State(state): State<AppState>,
    cookies: Cookies,
    RawQuery(raw): RawQuery,
) -> Result<Json<SearchPage>, AppError> {
    let session = ClientSession::from_cookies(&cookies);
    let client = state
        .search_client
        .as_ref()
        .ok_or(AppError::SearchUnavailable(session.language))?;

    let filter_state = FilterState::from_query(raw.as_deref());
    let body = build_search_query(
        &filter_state.query,
        filter_state.page,
        &filter_state.filters,
        state.page_size,
    );

    // A visitor without a session cookie has no earlier search to supersede
    let sequencer = match existing_search_session(&cookies) {
        Some(id) => state.sessions.sequencer(&id),
        None => {
            start_search_session(&cookies);
            Arc::new(RequestSequencer::new())
        }
    };
    let ticket = sequencer.begin();

    // Superseded requests are dropped whether they succeeded or failed
    let outcome = sequencer
        .complete(ticket, client.search(&body).await)
        .ok_or(AppError::Superseded)?;
    let result = outcome.map_err(|e| AppError::Upstream(session.language, e))?;

    Ok(Json(render_page(
        &result,
        &filter_state,
        session.view_mode,
        session.language,
        state.page_size,
    )))
}

/// GET /search/options - categories, tags and platforms for the filter UI.
pub async fn options_handler(State(state): State<AppState>) -> Json<SearchOptions> {
    let options = match &state.search_client {
        Some(client) => fetch_options(client, &state.indexes, state.options_limit).await,
        None => SearchOptions::default(),
    };
    Json(options)
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the Axum application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/version", get(version_handler))
        .route("/search", get(search_handler))
        .route("/search/options", get(options_handler))
        .merge(preferences_router())
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CookieManagerLayer::new())
}
