// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Filter dropdown contents, fetched from the category, tag and platform indexes.

use crate::models::search::{FilterOption, SearchOptions};
use crate::models::settings::IndexNames;
use crate::services::query_builder::build_options_query;
use crate::services::search::SearchClient;
use serde_json::Value;

/// Fetch one option index. Failures degrade to an empty list.
async fn fetch_facet(client: &SearchClient, index: &str, limit: u32) -> Vec<FilterOption> {
    match client
        .search_index::<Value>(index, &build_options_query(limit))
        .await
    {
        Ok(result) => result.hits.iter().filter_map(FilterOption::from_hit).collect(),
        Err(e) => {
            tracing::warn!(index, error = %e, "failed to load filter options");
            Vec::new()
        }
    }
}

/// Load categories, tags and platforms concurrently.
///
/// Never fails: an unreachable index leaves its list empty without
/// affecting the other two.
pub async fn fetch_options(client: &SearchClient, indexes: &IndexNames, limit: u32) -> SearchOptions {
    let (categories, tags, platforms) = futures::join!(
        fetch_facet(client, &indexes.category, limit),
        fetch_facet(client, &indexes.tag, limit),
        fetch_facet(client, &indexes.platform, limit),
    );

    SearchOptions {
        categories,
        tags,
        platforms,
    }
}
