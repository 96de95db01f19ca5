//! Configuration System
//!
//! Layered configuration: built-in defaults, then the user config file
//! (`$XDG_CONFIG_HOME/admock/config.toml`), then an explicit file, then
//! `ADMOCK_*` environment variables. The API credential is resolved
//! separately and is the only required setting.

use crate::error::AppError;
use crate::generation::DispatchMode;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

mod credential;
mod merge;
mod sources;

pub use credential::{resolve_api_key, API_KEY_VARS};
pub use sources::user_file::user_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Remote generation settings
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Upload limits
    #[serde(default)]
    pub intake: IntakeConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote model and dispatch settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// How the catalog is dispatched against the client
    #[serde(default)]
    pub dispatch: DispatchMode,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

pub(crate) fn default_model() -> String {
    "gemini-2.5-flash-image-preview".to_string()
}

pub(crate) fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    120
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            dispatch: DispatchMode::default(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Upload settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeConfig {
    /// Largest accepted upload in bytes
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,
}

fn default_max_bytes() -> usize {
    10 * 1024 * 1024 // 10 MB
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Generation(String),
    Intake(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Generation(msg) => write!(f, "Generation: {}", msg),
            ValidationError::Intake(msg) => write!(f, "Intake: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl GenerationConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("Model cannot be empty".to_string());
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(format!("Base URL must be http(s): {}", self.base_url));
        }
        if self.request_timeout_secs == 0 {
            return Err("Request timeout must be greater than zero".to_string());
        }
        Ok(())
    }
}

impl AppConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.generation.validate() {
            errors.push(ValidationError::Generation(e));
        }
        if self.intake.max_bytes == 0 {
            errors.push(ValidationError::Intake(
                "max_bytes must be greater than zero".to_string(),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Builds [`AppConfig`] from its layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load defaults, the user config file, an optional explicit file and the environment.
    pub fn load(config_path: Option<&Path>) -> Result<AppConfig, AppError> {
        let mut builder = merge::builder_with_defaults()?;
        builder = sources::user_file::add_to_builder(builder)?;
        if let Some(path) = config_path {
            builder = sources::explicit_file::add_to_builder(builder, path)?;
        }
        builder = sources::environment::add_to_builder(builder);

        let config: AppConfig = builder.build()?.try_deserialize()?;
        Self::checked(config)
    }

    /// Load a single file on top of the defaults, ignoring other sources.
    pub fn load_from_file(path: &Path) -> Result<AppConfig, AppError> {
        let builder = merge::builder_with_defaults()?;
        let builder = sources::explicit_file::add_to_builder(builder, path)?;
        let config: AppConfig = builder.build()?.try_deserialize()?;
        Self::checked(config)
    }

    fn checked(config: AppConfig) -> Result<AppConfig, AppError> {
        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            AppError::Config(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        Ok(config)
    }
}
