//! Error types for the ad mockup generator.
//!
//! Errors are split by where they surface: intake failures become the
//! session banner, generation failures stay on the affected card, and
//! application errors stop startup.

use thiserror::Error;

/// Generic card message for any failed remote call.
pub const GENERIC_GENERATION_MESSAGE: &str =
    "Failed to generate ad. The model may be unable to process the request.";

/// Fallback used when a failure carries no message at all.
pub const FALLBACK_GENERATION_MESSAGE: &str = "Generation failed";

/// Upload errors, surfaced as a session-level banner.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IntakeError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Read(String),
}

impl IntakeError {
    pub fn invalid_type() -> Self {
        IntakeError::InvalidInput("Invalid file type. Please upload an image.".to_string())
    }

    pub fn too_large(limit: usize) -> Self {
        IntakeError::InvalidInput(format!(
            "Image is over {} bytes. Please upload a smaller image.",
            limit
        ))
    }

    pub fn read_failed() -> Self {
        IntakeError::Read("Error reading file. Please try a different file.".to_string())
    }

    pub fn empty() -> Self {
        IntakeError::Read("Could not read the image file. Please try again.".to_string())
    }
}

/// Classification of an upstream failure, kept for logs only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamKind {
    Auth,
    RateLimit,
    Timeout,
    Connect,
    Status(u16),
    Malformed,
    Transport,
}

impl std::fmt::Display for UpstreamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpstreamKind::Auth => write!(f, "auth"),
            UpstreamKind::RateLimit => write!(f, "rate_limit"),
            UpstreamKind::Timeout => write!(f, "timeout"),
            UpstreamKind::Connect => write!(f, "connect"),
            UpstreamKind::Status(code) => write!(f, "status_{}", code),
            UpstreamKind::Malformed => write!(f, "malformed"),
            UpstreamKind::Transport => write!(f, "transport"),
        }
    }
}

/// Per-item generation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerationError {
    #[error("No image was generated in the response.")]
    NoImageReturned,

    /// `message` is shown to the user; `detail` only goes to the log.
    #[error("{message}")]
    Upstream {
        kind: UpstreamKind,
        message: String,
        detail: String,
    },
}

impl GenerationError {
    /// Upstream failure carrying the generic card message.
    pub fn upstream(kind: UpstreamKind, detail: impl Into<String>) -> Self {
        GenerationError::Upstream {
            kind,
            message: GENERIC_GENERATION_MESSAGE.to_string(),
            detail: detail.into(),
        }
    }

    /// Message shown on the failed card. Never empty.
    pub fn user_message(&self) -> String {
        let message = match self {
            GenerationError::NoImageReturned => GENERIC_GENERATION_MESSAGE,
            GenerationError::Upstream { message, .. } => message.as_str(),
        };
        if message.trim().is_empty() {
            FALLBACK_GENERATION_MESSAGE.to_string()
        } else {
            message.to_string()
        }
    }

    /// Diagnostic text for logs.
    pub fn detail(&self) -> &str {
        match self {
            GenerationError::NoImageReturned => "response contained no inline image part",
            GenerationError::Upstream { detail, .. } => detail,
        }
    }
}

/// Startup and configuration errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0} environment variable not set.")]
    MissingCredential(String),

    #[error("Logging error: {0}")]
    Logging(String),

    #[error("Client error: {0}")]
    Client(String),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}
