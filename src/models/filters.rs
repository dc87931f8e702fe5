// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Search intent carried in URL query parameters.
//!
//! The query string is the single source of truth for what the visitor is
//! looking at: `q`, `page`, `category`, `tag`, `platform` and `code`.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;
use utoipa::ToSchema;

/// Typed filter values taken from the query string.
///
/// Repeated parameters accumulate in order, but only the first value of each
/// list takes part in the search query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SearchFilters {
    pub category_ids: Vec<String>,
    pub tag_ids: Vec<String>,
    pub platform_ids: Vec<String>,
    pub sequential_code: Option<String>,
}

impl SearchFilters {
    pub fn is_empty(&self) -> bool {
        self.category_ids.is_empty()
            && self.tag_ids.is_empty()
            && self.platform_ids.is_empty()
            && self.sequential_code.is_none()
    }
}

/// Everything the search page needs to know about the current request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FilterState {
    pub query: String,
    pub page: u32,
    pub filters: SearchFilters,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            query: String::new(),
            page: 1,
            filters: SearchFilters::default(),
        }
    }
}

impl FilterState {
    /// Parse a raw, percent-encoded query string (without the leading `?`).
    pub fn from_query(raw: Option<&str>) -> Self {
        let mut state = FilterState::default();
        let Some(raw) = raw else {
            return state;
        };

        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match &*key {
                "q" => state.query = value.to_string(),
                "page" => state.page = parse_page(value),
                "category" => state.filters.category_ids.push(value.to_string()),
                "tag" => state.filters.tag_ids.push(value.to_string()),
                "platform" => state.filters.platform_ids.push(value.to_string()),
                "code" => {
                    if state.filters.sequential_code.is_none() {
                        state.filters.sequential_code = Some(value.to_string());
                    }
                }
                _ => {}
            }
        }

        state
    }

    /// Serialize back to a canonical query string. Defaults are omitted.
    pub fn to_query_string(&self) -> String {
        let mut out = form_urlencoded::Serializer::new(String::new());
        if !self.query.is_empty() {
            out.append_pair("q", &self.query);
        }
        if self.page > 1 {
            out.append_pair("page", &self.page.to_string());
        }
        for id in &self.filters.category_ids {
            out.append_pair("category", id);
        }
        for id in &self.filters.tag_ids {
            out.append_pair("tag", id);
        }
        for id in &self.filters.platform_ids {
            out.append_pair("platform", id);
        }
        if let Some(code) = &self.filters.sequential_code {
            out.append_pair("code", code);
        }
        out.finish()
    }

    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }
}

fn parse_page(value: &str) -> u32 {
    value.parse::<u32>().ok().filter(|p| *p >= 1).unwrap_or(1)
}
