// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use crate::models::filters::FilterState;
use crate::models::preferences::ViewMode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Display-ready view of one hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HitCard {
    pub title: String,
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequential_code: Option<String>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub platforms: Vec<String>,
    /// Last update as `YYYY-MM-DD`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
}

/// Pagination state plus the rewritten URLs for neighbouring pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationInfo {
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub total_hits: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_href: Option<String>,
}

/// Response for `GET /search`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchPage {
    pub state: FilterState,
    pub view_mode: ViewMode,
    pub hits: Vec<HitCard>,
    pub pagination: PaginationInfo,
    pub processing_ms: u64,
    /// Localized empty-state message, set only when there are no hits
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
}

/// Page-level failure panel. The only offered recovery is a reload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorPanel {
    pub message: String,
    pub action: String,
}

/// Returned when a newer search from the same visitor finished first
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SupersededResponse {
    pub superseded: bool,
}
