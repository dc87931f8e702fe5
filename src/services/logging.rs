// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Logging setup and redaction of secrets in log lines.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "catalog_agent=info";

/// Install the global tracing subscriber. Safe to call more than once.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Redact an API key or token for logging.
/// Shows the first four characters only: "abcd***"
pub fn redact_key(key: &str) -> String {
    if key.is_empty() {
        return "<none>".to_string();
    }
    if key.chars().count() <= 8 {
        // Short keys would be mostly revealed by a prefix
        return "***".to_string();
    }
    let prefix: String = key.chars().take(4).collect();
    format!("{}***", prefix)
}
