// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Preference route handlers.

use crate::models::preferences::{PreferencesResponse, PreferencesUpdate};
use crate::services::preferences::ClientSession;
use axum::{routing::get, Json, Router};
use tower_cookies::Cookies;

/// Create the router for `/preferences`. Needs no state.
pub fn preferences_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route(
        "/preferences",
        get(get_preferences_handler).put(update_preferences_handler),
    )
}

/// GET /preferences - Current visitor preferences.
async fn get_preferences_handler(cookies: Cookies) -> Json<PreferencesResponse> {
    Json(ClientSession::from_cookies(&cookies).to_response())
}

/// PUT /preferences - Change preferences; each changed value is written back as a cookie.
async fn update_preferences_handler(
    cookies: Cookies,
    Json(update): Json<PreferencesUpdate>,
) -> Json<PreferencesResponse> {
    let mut session = ClientSession::from_cookies(&cookies);
    session.apply(&cookies, &update);

    tracing::debug!(
        view_mode = session.view_mode.as_str(),
        language = session.language.as_str(),
        "preferences updated"
    );

    Json(session.to_response())
}
