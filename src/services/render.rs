// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Turns raw search results into display-ready pages.

use crate::models::filters::FilterState;
use crate::models::page::{HitCard, SearchPage};
use crate::models::preferences::{Language, ViewMode};
use crate::models::search::{Hit, Label, SearchResult};
use crate::services::pagination::Pagination;
use chrono::{DateTime, NaiveDate};
use serde_json::Value;
use std::fmt::Write;

/// Path the pagination links point at
pub const SEARCH_PATH: &str = "/search";

const GRID_CELL_WIDTH: usize = 28;

/// Build the response for one search.
///
/// `hits` are whatever the index returned for the requested page, while
/// `pagination.page` is clamped to `[1, total_pages]`. A page past the end
/// therefore renders no hits next to the last valid page number, and its
/// prev link leads back into range.
pub fn render_page(
    result: &SearchResult,
    state: &FilterState,
    view_mode: ViewMode,
    language: Language,
    page_size: u32,
) -> SearchPage {
    let pagination = Pagination::new(state.page, page_size, result.estimated_total_hits);
    let hits: Vec<HitCard> = result
        .hits
        .iter()
        .map(|hit| hit_card(hit, language))
        .collect();
    let empty_message = hits
        .is_empty()
        .then(|| language.empty_message().to_string());

    SearchPage {
        state: state.clone(),
        view_mode,
        hits,
        pagination: pagination.info(SEARCH_PATH, state),
        processing_ms: result.processing_time_ms,
        empty_message,
    }
}

pub fn hit_card(hit: &Hit, language: Language) -> HitCard {
    let title = hit
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(language.untitled())
        .to_string();

    let key = hit
        .slug
        .as_deref()
        .filter(|s| !s.is_empty())
        .or(hit.id.as_deref())
        .unwrap_or_default();

    HitCard {
        title,
        href: format!("/article/{}", key),
        cover_image: hit
            .cover_image
            .clone()
            .filter(|c| !c.is_empty())
            .or_else(|| hit.images.first().cloned()),
        sequential_code: hit.sequential_code.clone(),
        categories: label_names(&hit.categories),
        tags: label_names(&hit.tags),
        platforms: label_names(&hit.platforms),
        updated: hit.updated_at.as_ref().and_then(format_date),
    }
}

fn label_names(labels: &[Label]) -> Vec<String> {
    labels
        .iter()
        .filter_map(|l| l.name.clone().or_else(|| l.id.clone()))
        .collect()
}

/// Format an RFC 3339 string or epoch milliseconds as `YYYY-MM-DD`
pub fn format_date(value: &Value) -> Option<String> {
    let date: NaiveDate = match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.date_naive())
            .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
            .ok()?,
        Value::Number(n) => DateTime::from_timestamp_millis(n.as_i64()?)?.date_naive(),
        _ => return None,
    };
    Some(date.format("%Y-%m-%d").to_string())
}

/// Render a page for the terminal
pub fn render_text(page: &SearchPage, columns: usize) -> String {
    let mut out = String::new();

    if let Some(message) = &page.empty_message {
        let _ = writeln!(out, "{message}");
        return out;
    }

    match page.view_mode {
        ViewMode::List => render_list(&mut out, &page.hits),
        ViewMode::Grid => render_grid(&mut out, &page.hits, columns.max(1)),
    }

    let p = &page.pagination;
    let _ = writeln!(
        out,
        "page {}/{} · {} results · {} ms",
        p.page, p.total_pages, p.total_hits, page.processing_ms
    );
    out
}

fn render_list(out: &mut String, hits: &[HitCard]) {
    for card in hits {
        let _ = writeln!(out, "{}", card.title);
        let _ = writeln!(out, "  {}", card.href);
        let labels: Vec<&str> = card
            .categories
            .iter()
            .chain(&card.platforms)
            .chain(&card.tags)
            .map(String::as_str)
            .collect();
        if !labels.is_empty() {
            let _ = writeln!(out, "  {}", labels.join(", "));
        }
        if let Some(updated) = &card.updated {
            let _ = writeln!(out, "  updated {updated}");
        }
        out.push('\n');
    }
}

fn render_grid(out: &mut String, hits: &[HitCard], columns: usize) {
    for row in hits.chunks(columns) {
        let titles: Vec<String> = row.iter().map(|c| cell(&c.title)).collect();
        let platforms: Vec<String> = row.iter().map(|c| cell(&c.platforms.join("/"))).collect();
        let _ = writeln!(out, "{}", titles.join(" | ").trim_end());
        let _ = writeln!(out, "{}", platforms.join(" | ").trim_end());
        out.push('\n');
    }
}

fn cell(text: &str) -> String {
    let count = text.chars().count();
    if count > GRID_CELL_WIDTH {
        let cut: String = text.chars().take(GRID_CELL_WIDTH - 1).collect();
        format!("{cut}…")
    } else {
        format!("{text}{}", " ".repeat(GRID_CELL_WIDTH - count))
    }
}
