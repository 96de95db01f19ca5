//! Generation orchestrator: runs every catalog entry against the client for one image.
//! Owns the dispatch discipline and failure aggregation; results go to the session store.

use crate::catalog::AdFormatSpec;
use crate::generation::{DispatchMode, RunSummary};
use crate::progress::{ProgressBus, ProgressEvent};
use crate::provider::MockupGenerator;
use crate::session::{ApplyOutcome, ItemOutcome, SessionStore, SessionToken};
use crate::types::EncodedImage;
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, info_span, warn, Instrument};

/// Fans one image out over the catalog.
///
/// No item's failure stops or changes another item, and `run` itself never
/// fails: every outcome ends up as a Succeeded or Failed record.
pub struct GenerationOrchestrator {
    client: Arc<dyn MockupGenerator>,
    store: SessionStore,
    dispatch: DispatchMode,
    progress: Option<ProgressBus>,
}

impl GenerationOrchestrator {
    pub fn new(client: Arc<dyn MockupGenerator>, store: SessionStore, dispatch: DispatchMode) -> Self {
        Self {
            client,
            store,
            dispatch,
            progress: None,
        }
    }

    pub fn with_progress(mut self, progress: ProgressBus) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn dispatch(&self) -> DispatchMode {
        self.dispatch
    }

    /// Start a new session for `image` and drive every catalog entry to a
    /// terminal state.
    pub async fn run(&self, image: EncodedImage) -> RunSummary {
        let token = self.store.begin(image.clone());
        let span = info_span!(
            "generation_run",
            session = %token,
            dispatch = self.dispatch.as_str(),
            provider = self.client.provider_name()
        );
        self.run_session(token, image).instrument(span).await
    }

    async fn run_session(&self, token: SessionToken, image: EncodedImage) -> RunSummary {
        let catalog = Arc::clone(self.store.catalog());
        let mut summary = RunSummary::new(token, catalog.len());

        info!(total = catalog.len(), "Generation started");
        self.emit(ProgressEvent::SessionStarted {
            session: token,
            total: catalog.len(),
            dispatch: self.dispatch,
        });

        match self.dispatch {
            DispatchMode::Sequential => {
                for format in catalog.iter() {
                    if !self.store.is_current(token) {
                        debug!(format_id = format.id, "Session superseded; not issuing remaining calls");
                        break;
                    }
                    let (format, outcome, duration_ms) = self.call(&image, format).await;
                    self.record(token, format, outcome, duration_ms, &mut summary);
                }
            }
            DispatchMode::Concurrent => {
                let mut futures = FuturesUnordered::new();
                for format in catalog.iter() {
                    futures.push(self.call(&image, format));
                }
                while let Some((format, outcome, duration_ms)) = futures.next().await {
                    self.record(token, format, outcome, duration_ms, &mut summary);
                }
            }
        }

        summary.superseded = !self.store.finish(token);
        if summary.superseded {
            info!(
                succeeded = summary.succeeded,
                failed = summary.failed,
                "Generation superseded by a newer session"
            );
        } else {
            info!(
                succeeded = summary.succeeded,
                failed = summary.failed,
                "Generation completed"
            );
        }
        self.emit(ProgressEvent::SessionCompleted {
            session: token,
            succeeded: summary.succeeded,
            failed: summary.failed,
            superseded: summary.superseded,
        });
        summary
    }

    /// One remote call, converted into a recorded outcome.
    async fn call<'a>(
        &self,
        image: &EncodedImage,
        format: &'a AdFormatSpec,
    ) -> (&'a AdFormatSpec, ItemOutcome, u128) {
        let started = Instant::now();
        let outcome = match self.client.generate(image, &format.prompt).await {
            Ok(generated) => ItemOutcome::Succeeded(generated),
            Err(err) => {
                warn!(
                    format_id = format.id,
                    label = %format.label,
                    detail = %err.detail(),
                    "Mockup generation failed"
                );
                ItemOutcome::Failed(err.user_message())
            }
        };
        (format, outcome, started.elapsed().as_millis())
    }

    fn record(
        &self,
        token: SessionToken,
        format: &AdFormatSpec,
        outcome: ItemOutcome,
        duration_ms: u128,
        summary: &mut RunSummary,
    ) {
        let event = match &outcome {
            ItemOutcome::Succeeded(_) => ProgressEvent::ItemSucceeded {
                session: token,
                format_id: format.id,
                duration_ms,
            },
            ItemOutcome::Failed(message) => ProgressEvent::ItemFailed {
                session: token,
                format_id: format.id,
                message: message.clone(),
                duration_ms,
            },
        };
        let succeeded = matches!(outcome, ItemOutcome::Succeeded(_));

        match self.store.apply(token, format.id, outcome) {
            ApplyOutcome::Applied => {
                if succeeded {
                    summary.succeeded += 1;
                } else {
                    summary.failed += 1;
                }
                debug!(format_id = format.id, duration_ms = duration_ms as u64, succeeded, "Item completed");
                self.emit(event);
            }
            other => {
                debug!(format_id = format.id, outcome = ?other, "Item result not recorded");
            }
        }
    }

    fn emit(&self, event: ProgressEvent) {
        if let Some(progress) = &self.progress {
            progress.emit_best_effort(event);
        }
    }
}
