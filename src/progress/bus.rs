//! In-process event bus for progress events.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::progress::event::{ProgressEnvelope, ProgressEvent};

#[derive(Clone)]
pub struct ProgressBus {
    sender: UnboundedSender<ProgressEnvelope>,
    seq: Arc<AtomicU64>,
}

impl ProgressBus {
    pub fn new_pair() -> (Self, UnboundedReceiver<ProgressEnvelope>) {
        let (sender, receiver) = unbounded_channel();
        (
            Self {
                sender,
                seq: Arc::new(AtomicU64::new(1)),
            },
            receiver,
        )
    }

    /// Publish `event`. A dropped receiver is not an error for the producer.
    pub fn emit_best_effort(&self, event: ProgressEvent) {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        if self.sender.send(ProgressEnvelope::with_now(seq, event)).is_err() {
            tracing::trace!(seq, "Progress receiver dropped; event discarded");
        }
    }
}
