//! Session state: one upload-to-results lifecycle.
//!
//! The result table is an arena keyed by format id and guarded by a
//! monotonically increasing [`SessionToken`]. Writes carry the token of the
//! session that issued them, so completions from a superseded session are
//! discarded instead of applied.

pub mod result;
pub mod store;

pub use result::{GenerationResult, GenerationStatus, ItemOutcome};
pub use store::{ApplyOutcome, SessionSnapshot, SessionStore, SessionToken};
