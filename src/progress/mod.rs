//! Progress observability primitives.
//!
//! The orchestrator publishes one event per item transition so a view can
//! update live instead of polling the session store.

pub mod bus;
pub mod event;

pub use bus::ProgressBus;
pub use event::{now_millis, ProgressEnvelope, ProgressEvent};
