// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Visitor preferences persisted in cookies.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Result layout chosen by the visitor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    List,
    Grid,
}

impl ViewMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "list" => Some(ViewMode::List),
            "grid" => Some(ViewMode::Grid),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::List => "list",
            ViewMode::Grid => "grid",
        }
    }
}

/// Interface language. Thai is the site default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Th,
    En,
}

impl Language {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "th" => Some(Language::Th),
            "en" => Some(Language::En),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Th => "th",
            Language::En => "en",
        }
    }

    /// Message for the page-level error panel
    pub fn error_message(&self) -> &'static str {
        match self {
            Language::Th => "เกิดข้อผิดพลาดบางอย่าง กรุณาลองใหม่อีกครั้ง",
            Language::En => "Something went wrong. Please try again.",
        }
    }

    /// Message shown when a search has no hits
    pub fn empty_message(&self) -> &'static str {
        match self {
            Language::Th => "ไม่พบผลลัพธ์ที่ตรงกับการค้นหา",
            Language::En => "No results match your search.",
        }
    }

    pub fn untitled(&self) -> &'static str {
        match self {
            Language::Th => "ไม่มีชื่อ",
            Language::En => "Untitled",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl FontSize {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "small" => Some(FontSize::Small),
            "medium" => Some(FontSize::Medium),
            "large" => Some(FontSize::Large),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FontSize::Small => "small",
            FontSize::Medium => "medium",
            FontSize::Large => "large",
        }
    }
}

/// Response for `GET /preferences` and `PUT /preferences`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PreferencesResponse {
    pub view_mode: ViewMode,
    pub language: Language,
    pub theme: Theme,
    pub font_size: FontSize,
    /// Whether the visitor carries a backend auth token
    pub signed_in: bool,
}

/// Request to change one or more preferences; absent fields stay as they are
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct PreferencesUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_mode: Option<ViewMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<FontSize>,
}
