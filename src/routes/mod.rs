// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Route handlers for the HTTP API.

pub mod preferences;

use crate::models::filters::{FilterState, SearchFilters};
use crate::models::page::{ErrorPanel, HitCard, PaginationInfo, SearchPage, SupersededResponse};
use crate::models::preferences::{
    FontSize, Language, PreferencesResponse, PreferencesUpdate, Theme, ViewMode,
};
use crate::models::search::{FilterOption, SearchOptions};
use crate::models::version::VersionResponse;
use utoipa::OpenApi;

pub use preferences::preferences_router;

/// OpenAPI document for the models served by the agent
#[derive(OpenApi)]
#[openapi(
    info(title = "catalog-agent", description = "Catalog search and visitor preferences"),
    components(schemas(
        SearchPage,
        HitCard,
        PaginationInfo,
        FilterState,
        SearchFilters,
        SearchOptions,
        FilterOption,
        ErrorPanel,
        SupersededResponse,
        PreferencesResponse,
        PreferencesUpdate,
        ViewMode,
        Language,
        Theme,
        FontSize,
        VersionResponse,
    ))
)]
pub struct ApiDoc;
