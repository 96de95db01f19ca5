use crate::session::SessionToken;
use serde::Serialize;

/// Counts for one orchestrator run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub token: SessionToken,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// A newer session started before this run finished; its late results were discarded.
    pub superseded: bool,
}

impl RunSummary {
    pub(crate) fn new(token: SessionToken, total: usize) -> Self {
        Self {
            token,
            total,
            succeeded: 0,
            failed: 0,
            superseded: false,
        }
    }

    pub fn completed(&self) -> usize {
        self.succeeded + self.failed
    }
}
