//! Event schema for progress observability.

use chrono::Utc;
use serde::Serialize;

use crate::generation::DispatchMode;
use crate::session::SessionToken;
use crate::types::FormatId;

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressEvent {
    SessionStarted {
        session: SessionToken,
        total: usize,
        dispatch: DispatchMode,
    },
    ItemSucceeded {
        session: SessionToken,
        format_id: FormatId,
        duration_ms: u128,
    },
    ItemFailed {
        session: SessionToken,
        format_id: FormatId,
        message: String,
        duration_ms: u128,
    },
    SessionCompleted {
        session: SessionToken,
        succeeded: usize,
        failed: usize,
        superseded: bool,
    },
}

impl ProgressEvent {
    pub fn session(&self) -> SessionToken {
        match self {
            ProgressEvent::SessionStarted { session, .. }
            | ProgressEvent::ItemSucceeded { session, .. }
            | ProgressEvent::ItemFailed { session, .. }
            | ProgressEvent::SessionCompleted { session, .. } => *session,
        }
    }

    /// Format id for item transitions.
    pub fn format_id(&self) -> Option<FormatId> {
        match self {
            ProgressEvent::ItemSucceeded { format_id, .. }
            | ProgressEvent::ItemFailed { format_id, .. } => Some(*format_id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgressEnvelope {
    pub ts: i64,
    pub seq: u64,
    #[serde(flatten)]
    pub event: ProgressEvent,
}

impl ProgressEnvelope {
    pub fn with_now(seq: u64, event: ProgressEvent) -> Self {
        Self {
            ts: now_millis(),
            seq,
            event,
        }
    }
}
