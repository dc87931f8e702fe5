// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Runtime configuration read from environment variables.

use anyhow::{anyhow, Result};
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_PAGE_SIZE: u32 = 12;
pub const DEFAULT_OPTIONS_LIMIT: u32 = 1000;
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";

/// Names of the indexes the agent reads from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexNames {
    /// Articles and games
    pub content: String,
    pub category: String,
    pub tag: String,
    pub platform: String,
}

/// Agent configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub meilisearch_host: String,
    /// Bearer key for searches. Meilisearch accepts an empty key when
    /// the instance runs without a master key.
    pub search_key: String,
    /// Key with settings/documents rights, needed only by `setup-index`
    pub admin_key: Option<String>,
    pub indexes: IndexNames,
    pub page_size: u32,
    pub options_limit: u32,
    pub request_timeout: Option<Duration>,
    pub listen_addr: SocketAddr,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup (the environment in production)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let or_default = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let meilisearch_host = get("MEILISEARCH_HOST")
            .ok_or_else(|| anyhow!("MEILISEARCH_HOST environment variable not set"))?;

        let page_size = parse_number(get("SEARCH_PAGE_SIZE"), "SEARCH_PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
        if page_size == 0 {
            return Err(anyhow!("SEARCH_PAGE_SIZE must be at least 1"));
        }

        let options_limit =
            parse_number(get("OPTIONS_LIMIT"), "OPTIONS_LIMIT", DEFAULT_OPTIONS_LIMIT)?;

        let request_timeout = get("SEARCH_TIMEOUT_SECS")
            .map(|v| {
                v.parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|_| anyhow!("SEARCH_TIMEOUT_SECS must be a valid number, got: {v}"))
            })
            .transpose()?;

        let listen_addr = or_default("LISTEN_ADDR", DEFAULT_LISTEN_ADDR);
        let listen_addr = listen_addr
            .parse::<SocketAddr>()
            .map_err(|e| anyhow!("LISTEN_ADDR is not a socket address ({listen_addr}): {e}"))?;

        Ok(Self {
            meilisearch_host,
            search_key: get("MEILISEARCH_SEARCH_KEY").unwrap_or_default(),
            admin_key: get("MEILISEARCH_ADMIN_KEY"),
            indexes: IndexNames {
                content: or_default("SEARCH_INDEX", "article"),
                category: or_default("CATEGORY_INDEX", "category"),
                tag: or_default("TAG_INDEX", "tag"),
                platform: or_default("PLATFORM_INDEX", "platform"),
            },
            page_size,
            options_limit,
            request_timeout,
            listen_addr,
        })
    }
}

fn parse_number(value: Option<String>, key: &str, default: u32) -> Result<u32> {
    match value {
        Some(v) => v
            .trim()
            .parse::<u32>()
            .map_err(|_| anyhow!("{key} must be a valid number, got: {v}")),
        None => Ok(default),
    }
}
