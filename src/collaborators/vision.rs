//! Vision reasoning client for Groq chat completions.
//!
//! The staged image is re-encoded locally as a base64 `data:` URL and sent
//! inline alongside the prompt as a single user message. Nothing is ever
//! uploaded anywhere except to the completion endpoint itself.

use std::path::Path;

use async_trait::async_trait;
use base64::Engine;
use serde::Deserialize;
use serde_json::json;

use super::transcription::DEFAULT_GROQ_BASE_URL;
use super::VisionAnalyst;
use crate::error::Service;
use crate::{Error, Result};

pub const DEFAULT_VISION_MODEL: &str = "meta-llama/llama-4-scout-17b-16e-instruct";

// The original consultation flow always sent JPEG; keep that as the
// fallback when the staged extension is unknown.
const FALLBACK_IMAGE_MIME: &str = "image/jpeg";

/// Client for the `/chat/completions` endpoint with image input.
pub struct GroqVisionAnalyst {
    http_client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionBody {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

/// Encode staged image bytes as an inline `data:` URL.
fn image_data_url(path: &Path, contents: &[u8]) -> String {
    let mime = mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(FALLBACK_IMAGE_MIME);
    let encoded = base64::engine::general_purpose::STANDARD.encode(contents);
    format!("data:{};base64,{}", mime, encoded)
}

impl GroqVisionAnalyst {
    pub fn builder() -> GroqVisionAnalystBuilder {
        GroqVisionAnalystBuilder::new()
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl VisionAnalyst for GroqVisionAnalyst {
    async fn analyze(&self, image_path: &Path, prompt: &str) -> Result<String> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            Error::configuration("Groq API key is not configured (set GROQ_API_KEY)")
        })?;
        let contents = tokio::fs::read(image_path).await?;
        let data_url = image_data_url(image_path, &contents);
        let body = json!({
            "model": self.model,
            "messages": [{
                "role": "user",
                "content": [
                    {"type": "text", "text": prompt},
                    {"type": "image_url", "image_url": {"url": data_url}},
                ],
            }],
        });
        let endpoint = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let response = self
            .http_client
            .post(&endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                Error::collaborator(Service::VisionReasoning, format!("request failed: {}", e))
            })?;
        let status = response.status();
        let text = response.text().await.map_err(|e| {
            Error::collaborator(
                Service::VisionReasoning,
                format!("failed to read response: {}", e),
            )
        })?;
        if !status.is_success() {
            return Err(Error::collaborator_status(
                Service::VisionReasoning,
                status.as_u16(),
                text,
            ));
        }
        let parsed: ChatCompletionBody = serde_json::from_str(&text).map_err(|e| {
            Error::collaborator(
                Service::VisionReasoning,
                format!("unexpected response body: {}", e),
            )
        })?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                Error::collaborator(
                    Service::VisionReasoning,
                    "completion contained no message content",
                )
            })
    }
}

pub struct GroqVisionAnalystBuilder {
    base_url: Option<String>,
    model: Option<String>,
    api_key: Option<String>,
    timeout_secs: u64,
}

impl GroqVisionAnalystBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            model: None,
            api_key: None,
            timeout_secs: 60,
        }
    }
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn build(self) -> Result<GroqVisionAnalyst> {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(self.timeout_secs))
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))?;
        Ok(GroqVisionAnalyst {
            http_client,
            base_url: self
                .base_url
                .unwrap_or_else(|| DEFAULT_GROQ_BASE_URL.to_string()),
            model: self
                .model
                .unwrap_or_else(|| DEFAULT_VISION_MODEL.to_string()),
            api_key: self.api_key,
        })
    }
}

impl Default for GroqVisionAnalystBuilder {
    fn default() -> Self {
        Self::new()
    }
}
