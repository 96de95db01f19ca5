//! Token-guarded session state container.

use crate::catalog::Catalog;
use crate::session::result::{GenerationResult, GenerationStatus, ItemOutcome};
use crate::types::{EncodedImage, FormatId};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Generation counter identifying one session. Later sessions compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SessionToken(u64);

impl SessionToken {
    pub fn value(self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        SessionToken(self.0 + 1)
    }
}

impl std::fmt::Display for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// What happened to a write offered to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// The write came from a superseded session.
    Stale,
    /// The record already reached a terminal state in this session.
    AlreadyTerminal,
    UnknownFormat,
}

/// Read-only copy of the session for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub token: SessionToken,
    pub image: Option<EncodedImage>,
    /// Catalog order
    pub results: Vec<GenerationResult>,
    pub in_flight: bool,
    pub global_error: Option<String>,
}

impl SessionSnapshot {
    pub fn result(&self, format_id: FormatId) -> Option<&GenerationResult> {
        self.results.iter().find(|r| r.format_id == format_id)
    }

    pub fn count(&self, status: GenerationStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }

    pub fn all_terminal(&self) -> bool {
        self.results.iter().all(|r| r.status.is_terminal())
    }
}

struct SessionState {
    token: SessionToken,
    image: Option<EncodedImage>,
    results: Vec<GenerationResult>,
    in_flight: bool,
    global_error: Option<String>,
}

/// Shared session arena. Cloning shares the same state.
///
/// The lock is never held across an await point.
#[derive(Clone)]
pub struct SessionStore {
    catalog: Arc<Catalog>,
    index: Arc<HashMap<FormatId, usize>>,
    state: Arc<RwLock<SessionState>>,
}

impl SessionStore {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let index = catalog
            .iter()
            .enumerate()
            .map(|(slot, format)| (format.id, slot))
            .collect();
        let state = SessionState {
            token: SessionToken(0),
            image: None,
            results: idle_results(&catalog),
            in_flight: false,
            global_error: None,
        };
        Self {
            catalog,
            index: Arc::new(index),
            state: Arc::new(RwLock::new(state)),
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn current_token(&self) -> SessionToken {
        self.state.read().token
    }

    pub fn is_current(&self, token: SessionToken) -> bool {
        self.current_token() == token
    }

    /// Start a new session for `image`. Every entry becomes Pending and the
    /// previous session's token stops being accepted.
    pub fn begin(&self, image: EncodedImage) -> SessionToken {
        let mut state = self.state.write();
        state.token = state.token.next();
        state.image = Some(image);
        state.results = self.catalog.iter().map(|f| GenerationResult::pending(f.id)).collect();
        state.in_flight = true;
        state.global_error = None;
        debug!(token = %state.token, items = state.results.len(), "Session started");
        state.token
    }

    /// Record the outcome of `format_id` for the session identified by `token`.
    pub fn apply(&self, token: SessionToken, format_id: FormatId, outcome: ItemOutcome) -> ApplyOutcome {
        let mut state = self.state.write();
        if state.token != token {
            debug!(
                stale = %token,
                current = %state.token,
                format_id,
                "Discarding completion from superseded session"
            );
            return ApplyOutcome::Stale;
        }
        let Some(&slot) = self.index.get(&format_id) else {
            warn!(format_id, "Completion for unknown format id");
            return ApplyOutcome::UnknownFormat;
        };
        if state.results[slot].complete(outcome) {
            ApplyOutcome::Applied
        } else {
            warn!(format_id, status = state.results[slot].status.as_str(), "Ignoring second completion");
            ApplyOutcome::AlreadyTerminal
        }
    }

    /// Clear the in-flight flag if `token` is still current.
    pub fn finish(&self, token: SessionToken) -> bool {
        let mut state = self.state.write();
        if state.token != token {
            return false;
        }
        state.in_flight = false;
        true
    }

    /// Drop the active image and all results. In-flight calls of the old
    /// session become stale.
    pub fn reset(&self) -> SessionToken {
        let mut state = self.state.write();
        state.token = state.token.next();
        state.image = None;
        state.results = idle_results(&self.catalog);
        state.in_flight = false;
        state.global_error = None;
        debug!(token = %state.token, "Session reset");
        state.token
    }

    /// Show a session-level banner. Per-item state is left untouched.
    pub fn set_global_error(&self, message: impl Into<String>) {
        self.state.write().global_error = Some(message.into());
    }

    pub fn dismiss_error(&self) {
        self.state.write().global_error = None;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.read();
        SessionSnapshot {
            token: state.token,
            image: state.image.clone(),
            results: state.results.clone(),
            in_flight: state.in_flight,
            global_error: state.global_error.clone(),
        }
    }

    pub fn result(&self, format_id: FormatId) -> Option<GenerationResult> {
        let slot = *self.index.get(&format_id)?;
        Some(self.state.read().results[slot].clone())
    }
}

fn idle_results(catalog: &Catalog) -> Vec<GenerationResult> {
    catalog.iter().map(|f| GenerationResult::idle(f.id)).collect()
}
