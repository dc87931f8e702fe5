// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Body of `POST /indexes/{index}/search`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQueryBody {
    /// Search query string, empty for "everything"
    pub q: String,
    pub offset: u32,
    pub limit: u32,
    /// Filter expressions, omitted entirely when nothing is filtered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<String>,
}

/// Search response from the index, with missing fields normalized
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchResult<T = Hit> {
    pub hits: Vec<T>,
    pub estimated_total_hits: u64,
    pub offset: u64,
    pub limit: u64,
    pub processing_time_ms: u64,
}

/// One article or game as stored in the content index.
///
/// Every field is optional; the renderer supplies fallbacks. A field that is
/// `null` or of the wrong type reads as missing instead of failing the hit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Hit {
    #[serde(deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub slug: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub sequential_code: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub cover_image: Option<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub images: Vec<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub categories: Vec<Label>,
    #[serde(deserialize_with = "lenient_list")]
    pub tags: Vec<Label>,
    #[serde(deserialize_with = "lenient_list")]
    pub platforms: Vec<Label>,
    pub created_at: Option<Value>,
    pub updated_at: Option<Value>,
}

/// Category, tag or platform reference embedded in a hit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Label {
    #[serde(deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub name: Option<String>,
}

/// Selectable value for one of the filter dropdowns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FilterOption {
    pub id: String,
    pub name: String,
}

impl FilterOption {
    /// Normalize a raw option hit. `name` falls back to `title`, then to the id.
    pub fn from_hit(hit: &Value) -> Option<Self> {
        let id = hit.get("id").and_then(id_to_string)?;
        let name = ["name", "title"]
            .iter()
            .filter_map(|key| hit.get(*key).and_then(Value::as_str))
            .find(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| id.clone());
        Some(Self { id, name })
    }
}

/// Filter dropdown contents returned by `GET /search/options`
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SearchOptions {
    pub categories: Vec<FilterOption>,
    pub tags: Vec<FilterOption>,
    pub platforms: Vec<FilterOption>,
}

fn id_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// Ids come back as numbers from the content database and as strings from
// older imports.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(id_to_string))
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Ok(Some(s)),
        _ => Ok(None),
    }
}

// Anything but an array reads as empty; elements that don't decode are dropped.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => Ok(items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect()),
        _ => Ok(Vec::new()),
    }
}
