//! Admock: Product Ad Mockup Generation
//!
//! Takes one product photo and produces a gallery of advertising mockups,
//! one per entry in a fixed catalog of ad formats. Each mockup is an
//! independent call to a remote image-generation model; failures stay local
//! to the entry that produced them.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod gallery;
pub mod generation;
pub mod intake;
pub mod logging;
pub mod progress;
pub mod provider;
pub mod session;
pub mod types;

pub use api::MockupApi;
pub use catalog::{AdFormatSpec, Catalog};
pub use config::{AppConfig, ConfigLoader};
pub use error::{AppError, GenerationError, IntakeError};
pub use generation::{DispatchMode, GenerationOrchestrator, RunSummary};
pub use provider::{GeminiClient, MockupGenerator};
pub use session::{GenerationResult, GenerationStatus, SessionSnapshot, SessionStore, SessionToken};
pub use types::{EncodedImage, FormatId};
