//! Image Intake
//!
//! Turns an uploaded file (declared MIME type plus content) into an
//! [`EncodedImage`]. Intake never touches session state; the caller assigns
//! the result.

use crate::config::IntakeConfig;
use crate::error::IntakeError;
use crate::types::EncodedImage;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, warn};

/// Validates and encodes uploads.
#[derive(Debug, Clone)]
pub struct Intake {
    max_bytes: usize,
}

impl Intake {
    pub fn new(config: &IntakeConfig) -> Self {
        Self {
            max_bytes: config.max_bytes,
        }
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Read `reader` to the end and encode it.
    ///
    /// The declared type is checked before any byte is read.
    pub async fn ingest<R>(&self, declared_type: &str, reader: R) -> Result<EncodedImage, IntakeError>
    where
        R: AsyncRead + Unpin,
    {
        let media_type = check_declared_type(declared_type)?;

        let mut bytes = Vec::new();
        let limit = self.max_bytes as u64 + 1;
        reader.take(limit).read_to_end(&mut bytes).await.map_err(|e| {
            warn!(error = %e, "Upload read failed");
            IntakeError::read_failed()
        })?;

        self.encode(media_type, &bytes)
    }

    /// Encode content that is already in memory.
    pub fn ingest_bytes(&self, declared_type: &str, bytes: &[u8]) -> Result<EncodedImage, IntakeError> {
        let media_type = check_declared_type(declared_type)?;
        self.encode(media_type, bytes)
    }

    fn encode(&self, media_type: String, bytes: &[u8]) -> Result<EncodedImage, IntakeError> {
        if bytes.is_empty() {
            warn!(media_type = %media_type, "Upload produced no content");
            return Err(IntakeError::empty());
        }
        if bytes.len() > self.max_bytes {
            warn!(size = bytes.len(), limit = self.max_bytes, "Upload exceeds size limit");
            return Err(IntakeError::too_large(self.max_bytes));
        }
        debug!(media_type = %media_type, size = bytes.len(), "Upload encoded");
        Ok(EncodedImage::new(BASE64.encode(bytes), media_type))
    }
}

impl Default for Intake {
    fn default() -> Self {
        Self::new(&IntakeConfig::default())
    }
}

fn check_declared_type(declared_type: &str) -> Result<String, IntakeError> {
    match declared_type.strip_prefix("image/") {
        Some(subtype) if !subtype.trim().is_empty() => Ok(declared_type.to_string()),
        _ => {
            warn!(declared_type = %declared_type, "Rejected upload with non-image type");
            Err(IntakeError::invalid_type())
        }
    }
}
