// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Cookie-backed client session.
//!
//! All cookie access for visitor state goes through [`ClientSession`]:
//! - `viewMode`, `userLanguage`, `userTheme`, `userFontSize`: preferences
//! - `token`: opaque backend auth token, read only
//! - `searchSession`: identifies the visitor for search sequencing

use crate::models::preferences::{
    FontSize, Language, PreferencesResponse, PreferencesUpdate, Theme, ViewMode,
};
use tower_cookies::cookie::time::Duration;
use tower_cookies::cookie::SameSite;
use tower_cookies::{Cookie, Cookies};

pub const VIEW_MODE_COOKIE: &str = "viewMode";
pub const LANGUAGE_COOKIE: &str = "userLanguage";
pub const THEME_COOKIE: &str = "userTheme";
pub const FONT_SIZE_COOKIE: &str = "userFontSize";
pub const TOKEN_COOKIE: &str = "token";
pub const SEARCH_SESSION_COOKIE: &str = "searchSession";

/// Preference cookies live for 30 days
pub const PREFERENCE_MAX_AGE_DAYS: i64 = 30;

/// Visitor state read from the request cookies
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientSession {
    pub view_mode: ViewMode,
    pub language: Language,
    pub theme: Theme,
    pub font_size: FontSize,
    auth_token: Option<String>,
}

impl ClientSession {
    /// Read every preference; missing or invalid values fall back to defaults.
    pub fn from_cookies(cookies: &Cookies) -> Self {
        let value = |name: &str| cookies.get(name).map(|c| c.value().to_string());
        Self {
            view_mode: value(VIEW_MODE_COOKIE)
                .and_then(|v| ViewMode::parse(&v))
                .unwrap_or_default(),
            language: value(LANGUAGE_COOKIE)
                .and_then(|v| Language::parse(&v))
                .unwrap_or_default(),
            theme: value(THEME_COOKIE)
                .and_then(|v| Theme::parse(&v))
                .unwrap_or_default(),
            font_size: value(FONT_SIZE_COOKIE)
                .and_then(|v| FontSize::parse(&v))
                .unwrap_or_default(),
            auth_token: value(TOKEN_COOKIE).filter(|t| !t.is_empty()),
        }
    }

    /// Apply an update. A cookie is written for every field whose stored
    /// value differs, so an invalid cookie is replaced even when the visitor
    /// picks the default.
    pub fn apply(&mut self, cookies: &Cookies, update: &PreferencesUpdate) {
        if let Some(view_mode) = update.view_mode {
            self.view_mode = view_mode;
            store_preference(cookies, VIEW_MODE_COOKIE, view_mode.as_str());
        }
        if let Some(language) = update.language {
            self.language = language;
            store_preference(cookies, LANGUAGE_COOKIE, language.as_str());
        }
        if let Some(theme) = update.theme {
            self.theme = theme;
            store_preference(cookies, THEME_COOKIE, theme.as_str());
        }
        if let Some(font_size) = update.font_size {
            self.font_size = font_size;
            store_preference(cookies, FONT_SIZE_COOKIE, font_size.as_str());
        }
    }

    pub fn to_response(&self) -> PreferencesResponse {
        PreferencesResponse {
            view_mode: self.view_mode,
            language: self.language,
            theme: self.theme,
            font_size: self.font_size,
            signed_in: self.auth_token.is_some(),
        }
    }
}

/// Create a preference cookie readable by client scripts
pub fn preference_cookie(name: &'static str, value: &str) -> Cookie<'static> {
    Cookie::build((name, value.to_string()))
        .path("/")
        .same_site(SameSite::Lax)
        .max_age(Duration::days(PREFERENCE_MAX_AGE_DAYS))
        .build()
}

fn store_preference(cookies: &Cookies, name: &'static str, value: &str) {
    if cookies.get(name).is_some_and(|c| c.value() == value) {
        return;
    }
    cookies.add(preference_cookie(name, value));
}

/// Search session id sent by the visitor, if any
pub fn existing_search_session(cookies: &Cookies) -> Option<String> {
    cookies
        .get(SEARCH_SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

/// Issue a new search session id and set its cookie
pub fn start_search_session(cookies: &Cookies) -> String {
    let id = uuid::Uuid::now_v7().to_string();
    cookies.add(
        Cookie::build((SEARCH_SESSION_COOKIE, id.clone()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build(),
    );
    id
}
