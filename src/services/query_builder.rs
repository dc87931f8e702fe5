// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Translates filter state into search-index request bodies.

use crate::models::filters::SearchFilters;
use crate::models::search::SearchQueryBody;

/// Results are always newest first
pub const DEFAULT_SORT: &str = "updatedAt:desc";

/// One typed predicate of the filter expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterClause {
    Category(String),
    Tag(String),
    Platform(String),
    SequentialCode(String),
}

impl FilterClause {
    fn attribute(&self) -> &'static str {
        match self {
            FilterClause::Category(_) => "categories.id",
            FilterClause::Tag(_) => "tags.id",
            FilterClause::Platform(_) => "platforms.id",
            FilterClause::SequentialCode(_) => "sequentialCode",
        }
    }

    fn value(&self) -> &str {
        match self {
            FilterClause::Category(v)
            | FilterClause::Tag(v)
            | FilterClause::Platform(v)
            | FilterClause::SequentialCode(v) => v,
        }
    }

    /// Serialize as `attribute = "value"` with the value escaped
    pub fn to_expression(&self) -> String {
        format!("{} = \"{}\"", self.attribute(), escape_value(self.value()))
    }
}

/// Escape a value for use inside a double-quoted filter literal
pub fn escape_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if c == '\\' || c == '"' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Clauses for the given filters, in category, tag, platform, code order.
///
/// Only the first value of each multi-select list is applied.
pub fn filter_clauses(filters: &SearchFilters) -> Vec<FilterClause> {
    let mut clauses = Vec::new();
    if let Some(id) = filters.category_ids.first() {
        clauses.push(FilterClause::Category(id.clone()));
    }
    if let Some(id) = filters.tag_ids.first() {
        clauses.push(FilterClause::Tag(id.clone()));
    }
    if let Some(id) = filters.platform_ids.first() {
        clauses.push(FilterClause::Platform(id.clone()));
    }
    if let Some(code) = &filters.sequential_code {
        clauses.push(FilterClause::SequentialCode(code.clone()));
    }
    clauses
}

/// Build the body for a content search.
///
/// `page` and `page_size` below 1 are treated as 1.
pub fn build_search_query(
    query: &str,
    page: u32,
    filters: &SearchFilters,
    page_size: u32,
) -> SearchQueryBody {
    let page = page.max(1);
    let page_size = page_size.max(1);

    let expressions: Vec<String> = filter_clauses(filters)
        .iter()
        .map(FilterClause::to_expression)
        .collect();

    SearchQueryBody {
        q: query.to_string(),
        offset: (page - 1).saturating_mul(page_size),
        limit: page_size,
        filter: (!expressions.is_empty()).then_some(expressions),
        sort: vec![DEFAULT_SORT.to_string()],
    }
}

/// Build the body used to list every entry of an option index
pub fn build_options_query(limit: u32) -> SearchQueryBody {
    SearchQueryBody {
        q: String::new(),
        offset: 0,
        limit,
        filter: None,
        sort: Vec::new(),
    }
}
