// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use anyhow::{Context, Result};
use catalog_agent::app::{create_router, AppState, VERSION};
use catalog_agent::models::filters::{FilterState, SearchFilters};
use catalog_agent::models::preferences::{Language, ViewMode};
use catalog_agent::models::settings::AppConfig;
use catalog_agent::services::index_admin::{parse_documents, IndexAdmin};
use catalog_agent::services::logging::init_tracing;
use catalog_agent::services::query_builder::build_search_query;
use catalog_agent::services::render::{render_page, render_text};
use catalog_agent::services::search::SearchClient;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "catalog-agent", version = VERSION, about = "Catalog search agent")]
struct Cli {
    /// Results per page (overrides SEARCH_PAGE_SIZE)
    #[arg(long, global = true)]
    page_size: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the search API
    Serve {
        /// Address to bind (overrides LISTEN_ADDR)
        #[arg(long)]
        listen: Option<SocketAddr>,
    },
    /// Run one search and print the results
    Search {
        #[arg(default_value = "")]
        query: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        tag: Option<String>,
        #[arg(long)]
        platform: Option<String>,
        /// Sequential code of a single item
        #[arg(long)]
        code: Option<String>,
        /// Lay results out in a grid instead of a list
        #[arg(long)]
        grid: bool,
        #[arg(long, default_value_t = 3)]
        columns: usize,
        /// Message language: th or en
        #[arg(long, default_value = "th")]
        lang: String,
    },
    /// Configure filterable/sortable attributes and optionally import documents
    SetupIndex {
        /// JSON array of documents to import
        #[arg(long)]
        import: Option<PathBuf>,
        /// Index to import into (defaults to the content index)
        #[arg(long)]
        index: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env()?;
    if let Some(page_size) = cli.page_size.filter(|p| *p >= 1) {
        config.page_size = page_size;
    }

    match cli.command {
        Command::Serve { listen } => {
            if let Some(listen) = listen {
                config.listen_addr = listen;
            }
            serve(config).await
        }
        Command::Search {
            query,
            page,
            category,
            tag,
            platform,
            code,
            grid,
            columns,
            lang,
        } => {
            let state = FilterState {
                query,
                page: page.max(1),
                filters: SearchFilters {
                    category_ids: category.into_iter().collect(),
                    tag_ids: tag.into_iter().collect(),
                    platform_ids: platform.into_iter().collect(),
                    sequential_code: code,
                },
            };
            let view_mode = if grid { ViewMode::Grid } else { ViewMode::List };
            let language = Language::parse(&lang).unwrap_or_default();
            search_once(&config, &state, view_mode, language, columns).await
        }
        Command::SetupIndex { import, index } => setup_index(&config, import, index).await,
    }
}

fn search_client(config: &AppConfig) -> Result<SearchClient> {
    SearchClient::new(
        &config.meilisearch_host,
        config.search_key.clone(),
        config.indexes.content.clone(),
        config.request_timeout,
    )
    .context("Failed to create search client")
}

async fn serve(config: AppConfig) -> Result<()> {
    let search_client = match search_client(&config) {
        Ok(client) => Some(Arc::new(client)),
        Err(e) => {
            tracing::error!(error = %e, "continuing without search functionality");
            None
        }
    };

    let app = create_router(AppState::new(&config, search_client));

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;

    tracing::info!("catalog-agent v{} listening on {}", VERSION, config.listen_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

async fn search_once(
    config: &AppConfig,
    state: &FilterState,
    view_mode: ViewMode,
    language: Language,
    columns: usize,
) -> Result<()> {
    let client = search_client(config)?;
    let body = build_search_query(&state.query, state.page, &state.filters, config.page_size);

    let result = match client.search(&body).await {
        Ok(result) => result,
        Err(e) => {
            eprintln!("{}", language.error_message());
            return Err(e.into());
        }
    };

    let page = render_page(&result, state, view_mode, language, config.page_size);
    print!("{}", render_text(&page, columns));
    Ok(())
}

async fn setup_index(
    config: &AppConfig,
    import: Option<PathBuf>,
    index: Option<String>,
) -> Result<()> {
    let admin = IndexAdmin::new(
        &config.meilisearch_host,
        config.admin_key.clone(),
        config.indexes.clone(),
    )?;
    admin.configure().await?;

    if let Some(path) = import {
        let raw = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let docs = parse_documents(&raw)?;
        let index = index.unwrap_or_else(|| config.indexes.content.clone());
        let count = admin.import_documents(&index, &docs).await?;
        println!("Queued {} documents for index {}", count, index);
    }

    Ok(())
}
