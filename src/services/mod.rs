// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

pub mod index_admin;
pub mod logging;
pub mod options;
pub mod pagination;
pub mod preferences;
pub mod query_builder;
pub mod render;
pub mod search;
pub mod sequencer;
