//! Per-format outcome records.

use crate::types::{EncodedImage, FormatId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    /// No session has touched this entry yet, or the session was reset.
    Idle,
    Pending,
    Succeeded,
    Failed,
}

impl GenerationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            GenerationStatus::Idle => "idle",
            GenerationStatus::Pending => "pending",
            GenerationStatus::Succeeded => "succeeded",
            GenerationStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, GenerationStatus::Succeeded | GenerationStatus::Failed)
    }
}

/// Final outcome of one remote call, as recorded in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Succeeded(EncodedImage),
    /// User-facing failure message
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub format_id: FormatId,
    pub status: GenerationStatus,
    pub image: Option<EncodedImage>,
    pub error: Option<String>,
}

impl GenerationResult {
    pub fn idle(format_id: FormatId) -> Self {
        Self {
            format_id,
            status: GenerationStatus::Idle,
            image: None,
            error: None,
        }
    }

    pub fn pending(format_id: FormatId) -> Self {
        Self {
            status: GenerationStatus::Pending,
            ..Self::idle(format_id)
        }
    }

    /// Move out of Pending. Returns false, leaving the record unchanged,
    /// if the record is not Pending.
    pub(crate) fn complete(&mut self, outcome: ItemOutcome) -> bool {
        if self.status != GenerationStatus::Pending {
            return false;
        }
        match outcome {
            ItemOutcome::Succeeded(image) => {
                self.status = GenerationStatus::Succeeded;
                self.image = Some(image);
                self.error = None;
            }
            ItemOutcome::Failed(message) => {
                self.status = GenerationStatus::Failed;
                self.image = None;
                self.error = Some(message);
            }
        }
        true
    }
}
