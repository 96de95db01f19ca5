//! Mockup API
//!
//! Entry point for an embedding UI: upload a product image, observe the
//! per-format results, reset. Intake failures become the session banner and
//! never start a run; per-item failures stay on their cards.

use crate::catalog::Catalog;
use crate::config::{resolve_api_key, AppConfig};
use crate::error::{AppError, IntakeError};
use crate::gallery::GalleryView;
use crate::generation::{GenerationOrchestrator, RunSummary};
use crate::intake::Intake;
use crate::progress::ProgressBus;
use crate::provider::{GeminiClient, MockupGenerator};
use crate::session::{SessionSnapshot, SessionStore};
use crate::types::EncodedImage;
use std::sync::Arc;
use tokio::io::AsyncRead;
use tracing::{info, warn};

pub struct MockupApi {
    intake: Intake,
    orchestrator: GenerationOrchestrator,
}

impl MockupApi {
    /// Assemble the API around any generator.
    pub fn new(client: Arc<dyn MockupGenerator>, catalog: Arc<Catalog>, config: &AppConfig) -> Self {
        let store = SessionStore::new(catalog);
        Self {
            intake: Intake::new(&config.intake),
            orchestrator: GenerationOrchestrator::new(client, store, config.generation.dispatch),
        }
    }

    /// Gemini-backed API over the built-in catalog.
    pub fn with_api_key(config: &AppConfig, api_key: String) -> Result<Self, AppError> {
        let client = GeminiClient::new(&config.generation, api_key)?;
        info!(
            model = client.model_name(),
            dispatch = config.generation.dispatch.as_str(),
            "Mockup API ready"
        );
        Ok(Self::new(Arc::new(client), Arc::new(Catalog::builtin()), config))
    }

    /// Like [`MockupApi::with_api_key`], reading the credential from the
    /// environment. Fails when no credential is set.
    pub fn from_env(config: &AppConfig) -> Result<Self, AppError> {
        let api_key = resolve_api_key(|name| std::env::var(name).ok())?;
        Self::with_api_key(config, api_key)
    }

    pub fn with_progress(mut self, progress: ProgressBus) -> Self {
        self.orchestrator = self.orchestrator.with_progress(progress);
        self
    }

    /// Read, validate and encode an upload, then generate every format for it.
    pub async fn upload<R>(&self, declared_type: &str, reader: R) -> Result<RunSummary, IntakeError>
    where
        R: AsyncRead + Unpin,
    {
        self.store().dismiss_error();
        let image = self.intake.ingest(declared_type, reader).await;
        self.start(image).await
    }

    /// [`MockupApi::upload`] for content already in memory.
    pub async fn upload_bytes(&self, declared_type: &str, bytes: &[u8]) -> Result<RunSummary, IntakeError> {
        self.store().dismiss_error();
        let image = self.intake.ingest_bytes(declared_type, bytes);
        self.start(image).await
    }

    async fn start(&self, image: Result<EncodedImage, IntakeError>) -> Result<RunSummary, IntakeError> {
        match image {
            Ok(image) => Ok(self.orchestrator.run(image).await),
            Err(err) => {
                warn!(error = %err, "Upload rejected");
                self.store().set_global_error(err.to_string());
                Err(err)
            }
        }
    }

    /// Drop the active image and every result.
    pub fn reset(&self) {
        self.store().reset();
    }

    pub fn dismiss_error(&self) {
        self.store().dismiss_error();
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.store().snapshot()
    }

    pub fn gallery(&self) -> GalleryView {
        GalleryView::build(self.store().catalog(), &self.snapshot())
    }

    pub fn store(&self) -> &SessionStore {
        self.orchestrator.store()
    }

    pub fn catalog(&self) -> &Catalog {
        self.store().catalog()
    }
}
