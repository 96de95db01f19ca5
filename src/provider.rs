//! Mockup Generation Client
//!
//! One remote call per (image, prompt) pair. The client submits the product
//! image and scenario prompt as a single multi-part request, then returns the
//! first inline image of the response. It never retries; failures are
//! terminal for the item that issued them.

use crate::config::GenerationConfig;
use crate::error::{AppError, GenerationError, UpstreamKind};
use crate::types::EncodedImage;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

pub mod wire;

pub use wire::{first_image, ContentPart, GenerateContentRequest, GenerateContentResponse};

/// Produces one mockup image from a product image and a scenario prompt.
#[async_trait]
pub trait MockupGenerator: Send + Sync {
    async fn generate(
        &self,
        image: &EncodedImage,
        prompt: &str,
    ) -> Result<EncodedImage, GenerationError>;

    /// Get the provider name
    fn provider_name(&self) -> &str;
}

const MAX_DETAIL_CHARS: usize = 500;

fn truncate_text(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let mut out: String = value.chars().take(max_chars).collect();
    out.push_str("...");
    out
}

/// Upstream kind for a non-success HTTP status.
pub fn classify_status(status: u16) -> UpstreamKind {
    match status {
        401 | 403 => UpstreamKind::Auth,
        429 => UpstreamKind::RateLimit,
        408 | 504 => UpstreamKind::Timeout,
        other => UpstreamKind::Status(other),
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(error: reqwest::Error) -> Self {
        let kind = if let Some(status) = error.status() {
            classify_status(status.as_u16())
        } else if error.is_timeout() {
            UpstreamKind::Timeout
        } else if error.is_connect() {
            UpstreamKind::Connect
        } else if error.is_decode() {
            UpstreamKind::Malformed
        } else {
            UpstreamKind::Transport
        };
        GenerationError::upstream(kind, error.to_string())
    }
}

fn build_http_client(config: &GenerationConfig) -> Result<Client, AppError> {
    Client::builder()
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()
        .map_err(|e| AppError::Client(format!("Failed to create HTTP client: {}", e)))
}

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    client: Client,
    model: String,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(config: &GenerationConfig, api_key: String) -> Result<Self, AppError> {
        let client = build_http_client(config)?;
        Ok(Self {
            client,
            model: config.model.clone(),
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> String {
        let trimmed = self.model.trim();
        let model_path = if trimmed.starts_with("models/") {
            trimmed.to_string()
        } else {
            format!("models/{}", trimmed)
        };
        format!("{}/{}:generateContent", self.base_url, model_path)
    }
}

#[async_trait]
impl MockupGenerator for GeminiClient {
    async fn generate(
        &self,
        image: &EncodedImage,
        prompt: &str,
    ) -> Result<EncodedImage, GenerationError> {
        let request = GenerateContentRequest::new(image, prompt);
        let url = self.endpoint();
        debug!(model = %self.model, media_type = %image.media_type, "Submitting generation request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GenerationError::upstream(
                classify_status(status.as_u16()),
                format!(
                    "Request failed with status {}: {}",
                    status,
                    truncate_text(&error_text, MAX_DETAIL_CHARS)
                ),
            ));
        }

        let body: GenerateContentResponse = response.json().await.map_err(|e| {
            GenerationError::upstream(
                UpstreamKind::Malformed,
                format!("Failed to parse response: {}", e),
            )
        })?;

        let finish_reasons: Vec<String> =
            body.finish_reasons().into_iter().map(str::to_string).collect();
        match first_image(body.into_parts()) {
            Some(image) => Ok(image),
            None => {
                debug!(finish_reasons = ?finish_reasons, "Response carried no image part");
                Err(GenerationError::NoImageReturned)
            }
        }
    }

    fn provider_name(&self) -> &str {
        "gemini"
    }
}

// Mock generator for testing
#[cfg(test)]
pub struct MockGenerator {
    responses: std::collections::HashMap<String, Result<EncodedImage, GenerationError>>,
    calls: std::sync::Arc<std::sync::Mutex<Vec<String>>>,
}

#[cfg(test)]
impl MockGenerator {
    pub fn new() -> Self {
        Self {
            responses: std::collections::HashMap::new(),
            calls: std::sync::Arc::new(std::sync::Mutex::new(Vec::new())),
        }
    }

    pub fn respond(mut self, prompt: &str, outcome: Result<EncodedImage, GenerationError>) -> Self {
        self.responses.insert(prompt.to_string(), outcome);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl MockupGenerator for MockGenerator {
    async fn generate(
        &self,
        _image: &EncodedImage,
        prompt: &str,
    ) -> Result<EncodedImage, GenerationError> {
        self.calls.lock().unwrap().push(prompt.to_string());
        tokio::task::yield_now().await;
        self.responses
            .get(prompt)
            .cloned()
            .unwrap_or_else(|| Ok(EncodedImage::new(format!("mock:{}", prompt), "image/png")))
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}
