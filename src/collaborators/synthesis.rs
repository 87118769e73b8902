//! Speech synthesis client for the ElevenLabs API.

use async_trait::async_trait;
use futures::StreamExt;
use serde_json::json;

use super::SpeechSynthesizer;
use crate::error::Service;
use crate::{Error, Result};

pub const DEFAULT_ELEVENLABS_BASE_URL: &str = "https://api.elevenlabs.io";
/// Voice "Aria".
pub const DEFAULT_VOICE_ID: &str = "9BWtsMINqrJLrRacOk9x";
pub const DEFAULT_SYNTHESIS_MODEL: &str = "eleven_turbo_v2";
pub const DEFAULT_OUTPUT_FORMAT: &str = "mp3_22050_32";

/// Client for `/v1/text-to-speech/{voice_id}`.
pub struct ElevenLabsSynthesizer {
    http_client: reqwest::Client,
    base_url: String,
    voice_id: String,
    model_id: String,
    output_format: String,
    api_key: Option<String>,
}

impl ElevenLabsSynthesizer {
    pub fn builder() -> ElevenLabsSynthesizerBuilder {
        ElevenLabsSynthesizerBuilder::new()
    }

    pub fn voice_id(&self) -> &str {
        &self.voice_id
    }
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            Error::configuration("ElevenLabs API key is not configured (set ELEVEN_API_KEY)")
        })?;
        let endpoint = format!(
            "{}/v1/text-to-speech/{}",
            self.base_url.trim_end_matches('/'),
            self.voice_id
        );
        let body = json!({
            "text": text,
            "model_id": self.model_id,
        });
        let response = self
            .http_client
            .post(&endpoint)
            .query(&[("output_format", self.output_format.as_str())])
            .header("xi-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                Error::collaborator(Service::SpeechSynthesis, format!("request failed: {}", e))
            })?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::collaborator_status(
                Service::SpeechSynthesis,
                status.as_u16(),
                body,
            ));
        }
        // Audio arrives chunked; collect it into one contiguous buffer.
        let mut audio = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| {
                Error::collaborator(
                    Service::SpeechSynthesis,
                    format!("failed to read audio stream: {}", e),
                )
            })?;
            audio.extend_from_slice(&chunk);
        }
        Ok(audio)
    }
}

pub struct ElevenLabsSynthesizerBuilder {
    base_url: Option<String>,
    voice_id: Option<String>,
    model_id: Option<String>,
    output_format: Option<String>,
    api_key: Option<String>,
    timeout_secs: u64,
}

impl ElevenLabsSynthesizerBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            voice_id: None,
            model_id: None,
            output_format: None,
            api_key: None,
            timeout_secs: 60,
        }
    }
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }
    pub fn voice_id(mut self, voice_id: impl Into<String>) -> Self {
        self.voice_id = Some(voice_id.into());
        self
    }
    pub fn model_id(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }
    pub fn output_format(mut self, output_format: impl Into<String>) -> Self {
        self.output_format = Some(output_format.into());
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

    pub fn build(self) -> Result<ElevenLabsSynthesizer> {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(self.timeout_secs))
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))?;
        Ok(ElevenLabsSynthesizer {
            http_client,
            base_url: self
                .base_url
                .unwrap_or_else(|| DEFAULT_ELEVENLABS_BASE_URL.to_string()),
            voice_id: self
                .voice_id
                .unwrap_or_else(|| DEFAULT_VOICE_ID.to_string()),
            model_id: self
                .model_id
                .unwrap_or_else(|| DEFAULT_SYNTHESIS_MODEL.to_string()),
            output_format: self
                .output_format
                .unwrap_or_else(|| DEFAULT_OUTPUT_FORMAT.to_string()),
            api_key: self.api_key,
        })
    }
}

impl Default for ElevenLabsSynthesizerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
