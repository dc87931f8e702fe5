// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use crate::models::search::{SearchQueryBody, SearchResult};
use crate::services::logging::redact_key;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

/// Failure talking to the search index
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("search request failed: {0}")]
    Network(String),

    #[error("search index returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode search response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

/// Construct the full URL if only host:port is provided
pub fn normalize_host(host: &str) -> String {
    let url = if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("http://{}", host)
    };
    url.trim_end_matches('/').to_string()
}

/// Read-only client for the hosted search index.
///
/// Every call is a fresh request: no caching, no retries.
pub struct SearchClient {
    http: reqwest::Client,
    host: String,
    api_key: String,
    index_name: String,
}

impl SearchClient {
    /// Create a new client for searches against `index_name`
    pub fn new(
        host: &str,
        api_key: String,
        index_name: String,
        timeout: Option<Duration>,
    ) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        let host = normalize_host(host);

        tracing::info!(
            host = %host,
            index = %index_name,
            key = %redact_key(&api_key),
            "search client configured"
        );

        Ok(Self {
            http,
            host,
            api_key,
            index_name,
        })
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    fn search_url(&self, index: &str) -> String {
        format!("{}/indexes/{}/search", self.host, index)
    }

    /// Search the content index
    pub async fn search(&self, body: &SearchQueryBody) -> Result<SearchResult, FetchError> {
        self.search_index(&self.index_name, body).await
    }

    /// Search any index, decoding hits as `T`
    pub async fn search_index<T: DeserializeOwned + Default>(
        &self,
        index: &str,
        body: &SearchQueryBody,
    ) -> Result<SearchResult<T>, FetchError> {
        tracing::debug!(
            index,
            offset = body.offset,
            limit = body.limit,
            filters = body.filter.as_ref().map_or(0, Vec::len),
            "searching"
        );

        let response = self
            .http
            .post(self.search_url(index))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .inspect_err(|e| tracing::warn!(index, error = %e, "search request failed"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(index, status = status.as_u16(), "search index rejected request");
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| FetchError::Decode(e.to_string()))
    }
}
