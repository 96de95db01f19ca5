//! Request and response bodies for the `generateContent` endpoint.
//!
//! Response parts are heterogeneous; they are converted into [`ContentPart`]
//! so callers select images by variant instead of probing optional fields.

use crate::types::EncodedImage;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<RequestContent>,
    pub generation_config: RequestGenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct RequestContent {
    pub role: String,
    pub parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestGenerationConfig {
    pub response_modalities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    #[serde(default, alias = "mime_type")]
    pub mime_type: String,
    #[serde(default)]
    pub data: String,
}

impl GenerateContentRequest {
    /// One user turn: the product image, then the scenario prompt.
    pub fn new(image: &EncodedImage, prompt: &str) -> Self {
        Self {
            contents: vec![RequestContent {
                role: "user".to_string(),
                parts: vec![
                    RequestPart {
                        inline_data: Some(InlineData {
                            mime_type: image.media_type.clone(),
                            data: image.data.clone(),
                        }),
                        text: None,
                    },
                    RequestPart {
                        inline_data: None,
                        text: Some(prompt.to_string()),
                    },
                ],
            }],
            generation_config: RequestGenerationConfig {
                response_modalities: vec!["IMAGE".to_string(), "TEXT".to_string()],
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<RawPart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPart {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, alias = "inline_data")]
    pub inline_data: Option<InlineData>,
}

/// One piece of model output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPart {
    Text(String),
    Image(EncodedImage),
    Other,
}

impl From<RawPart> for ContentPart {
    fn from(part: RawPart) -> Self {
        match (part.inline_data, part.text) {
            (Some(inline), _) if !inline.data.is_empty() => {
                let media_type = if inline.mime_type.is_empty() {
                    "image/png".to_string()
                } else {
                    inline.mime_type
                };
                ContentPart::Image(EncodedImage::new(inline.data, media_type))
            }
            (_, Some(text)) => ContentPart::Text(text),
            _ => ContentPart::Other,
        }
    }
}

impl GenerateContentResponse {
    /// All parts across candidates, in response order.
    pub fn into_parts(self) -> Vec<ContentPart> {
        self.candidates
            .into_iter()
            .filter_map(|candidate| candidate.content)
            .flat_map(|content| content.parts)
            .map(ContentPart::from)
            .collect()
    }

    pub fn finish_reasons(&self) -> Vec<&str> {
        self.candidates
            .iter()
            .filter_map(|c| c.finish_reason.as_deref())
            .collect()
    }
}

/// First image among `parts`.
pub fn first_image(parts: Vec<ContentPart>) -> Option<EncodedImage> {
    parts.into_iter().find_map(|part| match part {
        ContentPart::Image(image) => Some(image),
        _ => None,
    })
}
