// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Latest-intent-wins ordering for overlapping searches.
//!
//! Each search takes a [`Ticket`] before it is sent. When the response
//! arrives it is only applied if no newer ticket was issued in the meantime,
//! so a slow response to an old query can never overwrite a newer one.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Sessions unused for this long are dropped
pub const SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Upper bound on tracked sessions; the least recently used is evicted past it
pub const MAX_SEARCH_SESSIONS: usize = 10_000;

/// Idle sessions are swept at most this often
const PRUNE_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Issues tickets for one visitor
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a ticket for a new request; it supersedes every earlier ticket.
    pub fn begin(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Keep `value` only if `ticket` is still the newest one
    pub fn complete<T>(&self, ticket: Ticket, value: T) -> Option<T> {
        if self.is_current(&ticket) {
            Some(value)
        } else {
            tracing::debug!(ticket = ticket.0, "discarding superseded response");
            None
        }
    }
}

struct SessionEntry {
    sequencer: Arc<RequestSequencer>,
    last_used: Instant,
}

struct SessionMap {
    entries: HashMap<String, SessionEntry>,
    last_pruned: Instant,
}

/// One sequencer per visitor, keyed by the search session cookie
pub struct SearchSessions {
    sessions: Mutex<SessionMap>,
    idle_timeout: Duration,
    max_sessions: usize,
}

impl Default for SearchSessions {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchSessions {
    pub fn new() -> Self {
        Self::with_limits(SESSION_IDLE_TIMEOUT, MAX_SEARCH_SESSIONS)
    }

    pub fn with_limits(idle_timeout: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: Mutex::new(SessionMap {
                entries: HashMap::new(),
                last_pruned: Instant::now(),
            }),
            idle_timeout,
            max_sessions: max_sessions.max(1),
        }
    }

    /// Sequencer for `session_id`, creating it if needed
    pub fn sequencer(&self, session_id: &str) -> Arc<RequestSequencer> {
        let now = Instant::now();
        // A poisoned map only means another request panicked mid-insert
        let mut sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(entry) = sessions.entries.get_mut(session_id) {
            entry.last_used = now;
            return entry.sequencer.clone();
        }

        let full = sessions.entries.len() >= self.max_sessions;
        let sweep_due =
            now.duration_since(sessions.last_pruned) >= self.idle_timeout.min(PRUNE_INTERVAL);
        if full || sweep_due {
            let timeout = self.idle_timeout;
            sessions
                .entries
                .retain(|_, entry| now.duration_since(entry.last_used) < timeout);
            sessions.last_pruned = now;
        }

        if sessions.entries.len() >= self.max_sessions {
            let oldest = sessions
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(id, _)| id.clone());
            if let Some(oldest) = oldest {
                tracing::debug!(session = %oldest, "evicting least recently used search session");
                sessions.entries.remove(&oldest);
            }
        }

        let sequencer = Arc::new(RequestSequencer::new());
        sessions.entries.insert(
            session_id.to_string(),
            SessionEntry {
                sequencer: sequencer.clone(),
                last_used: now,
            },
        );
        sequencer
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().map(|s| s.entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
