//! Shared value types.

use serde::{Deserialize, Serialize};

/// Identifier of an ad format in the catalog.
pub type FormatId = u32;

/// Image bytes in base64 together with their media type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedImage {
    /// Standard base64 of the image bytes
    pub data: String,
    /// MIME type, e.g. `image/png`
    pub media_type: String,
}

impl EncodedImage {
    pub fn new(data: impl Into<String>, media_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            media_type: media_type.into(),
        }
    }

    /// `data:<media_type>;base64,<data>`
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.data)
    }
}
