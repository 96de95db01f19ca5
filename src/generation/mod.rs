//! Generation orchestration: drives the catalog against a [`MockupGenerator`]
//! and records each outcome in the session store.
//!
//! [`MockupGenerator`]: crate::provider::MockupGenerator

pub mod orchestrator;
pub mod summary;

pub use orchestrator::GenerationOrchestrator;
pub use summary::RunSummary;

use serde::{Deserialize, Serialize};

/// How catalog entries are dispatched to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchMode {
    /// One call at a time, in catalog order. At most one request is ever
    /// outstanding against the remote service.
    #[default]
    Sequential,
    /// Every call issued at once and collected as each completes.
    Concurrent,
}

impl DispatchMode {
    pub fn as_str(self) -> &'static str {
        match self {
            DispatchMode::Sequential => "sequential",
            DispatchMode::Concurrent => "concurrent",
        }
    }
}
