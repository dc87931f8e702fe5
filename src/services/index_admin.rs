// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use crate::models::settings::IndexNames;
use crate::services::search::normalize_host;
use anyhow::{anyhow, Result};
use meilisearch_sdk::client::Client;
use serde_json::Value;

/// Attributes the query builder filters on
pub const CONTENT_FILTERABLE: [&str; 4] =
    ["categories.id", "tags.id", "platforms.id", "sequentialCode"];

/// Attributes the query builder sorts on
pub const CONTENT_SORTABLE: [&str; 1] = ["updatedAt"];

/// Meilisearch admin client preparing indexes for the search pages
pub struct IndexAdmin {
    client: Client,
    indexes: IndexNames,
}

impl IndexAdmin {
    pub fn new(host: &str, admin_key: Option<String>, indexes: IndexNames) -> Result<Self> {
        let url = normalize_host(host);
        let client = Client::new(&url, admin_key)?;

        tracing::info!(url = %url, "connected to Meilisearch for index administration");

        Ok(Self { client, indexes })
    }

    /// Configure filterable and sortable attributes on every index
    pub async fn configure(&self) -> Result<()> {
        let content = self.client.index(&self.indexes.content);
        content
            .set_filterable_attributes(CONTENT_FILTERABLE)
            .await
            .map_err(|e| anyhow!("Failed to set filterable attributes: {}", e))?;
        content
            .set_sortable_attributes(CONTENT_SORTABLE)
            .await
            .map_err(|e| anyhow!("Failed to set sortable attributes: {}", e))?;

        for name in self.option_indexes() {
            self.client
                .index(name)
                .set_filterable_attributes(["id"])
                .await
                .map_err(|e| anyhow!("Failed to configure index {}: {}", name, e))?;
        }

        tracing::info!(index = %self.indexes.content, "configured search indexes");
        Ok(())
    }

    fn option_indexes(&self) -> [&str; 3] {
        [
            self.indexes.category.as_str(),
            self.indexes.tag.as_str(),
            self.indexes.platform.as_str(),
        ]
    }

    /// Add or replace documents (primary key `id`) in `index`
    pub async fn import_documents(&self, index: &str, docs: &[Value]) -> Result<usize> {
        if docs.is_empty() {
            return Ok(0);
        }

        self.client
            .index(index)
            .add_documents(docs, Some("id"))
            .await
            .map_err(|e| anyhow!("Failed to import documents into {}: {}", index, e))?;

        tracing::info!(index, count = docs.len(), "queued documents for indexing");
        Ok(docs.len())
    }
}

/// Parse an import file: a JSON array of documents
pub fn parse_documents(raw: &str) -> Result<Vec<Value>> {
    let value: Value = serde_json::from_str(raw)?;
    match value {
        Value::Array(docs) => Ok(docs),
        _ => Err(anyhow!("Import file must contain a JSON array of documents")),
    }
}
