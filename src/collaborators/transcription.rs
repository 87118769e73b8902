//! Speech-to-text client for Groq's OpenAI-compatible audio API.

use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;

use super::Transcriber;
use crate::error::Service;
use crate::{Error, Result};

pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_TRANSCRIPTION_MODEL: &str = "whisper-large-v3";
pub const DEFAULT_TRANSCRIPTION_LANGUAGE: &str = "en";

/// Client for the `/audio/transcriptions` endpoint.
///
/// The credential is optional at construction time and checked when
/// [`Transcriber::transcribe`] runs; a missing key yields a configuration
/// error before any request is sent.
pub struct GroqTranscriber {
    http_client: reqwest::Client,
    base_url: String,
    model: String,
    language: Option<String>,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TranscriptionBody {
    text: String,
}

impl GroqTranscriber {
    pub fn builder() -> GroqTranscriberBuilder {
        GroqTranscriberBuilder::new()
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Transcriber for GroqTranscriber {
    async fn transcribe(&self, audio_path: &Path) -> Result<String> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            Error::configuration("Groq API key is not configured (set GROQ_API_KEY)")
        })?;
        let audio = tokio::fs::read(audio_path).await?;
        let file_name = audio_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio.wav")
            .to_string();
        let mime = mime_guess::from_path(audio_path).first_or_octet_stream();
        let part = reqwest::multipart::Part::bytes(audio)
            .file_name(file_name)
            .mime_str(mime.essence_str())
            .map_err(|e| Error::configuration(format!("Invalid mime: {}", e)))?;
        let mut form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("model", self.model.clone());
        if let Some(lang) = &self.language {
            form = form.text("language", lang.clone());
        }
        let endpoint = format!(
            "{}/audio/transcriptions",
            self.base_url.trim_end_matches('/')
        );
        let response = self
            .http_client
            .post(&endpoint)
            .bearer_auth(api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                Error::collaborator(Service::Transcription, format!("request failed: {}", e))
            })?;
        let status = response.status();
        let body = response.text().await.map_err(|e| {
            Error::collaborator(
                Service::Transcription,
                format!("failed to read response: {}", e),
            )
        })?;
        if !status.is_success() {
            return Err(Error::collaborator_status(
                Service::Transcription,
                status.as_u16(),
                body,
            ));
        }
        let parsed: TranscriptionBody = serde_json::from_str(&body).map_err(|e| {
            Error::collaborator(
                Service::Transcription,
                format!("unexpected response body: {}", e),
            )
        })?;
        Ok(parsed.text)
    }
}

pub struct GroqTranscriberBuilder {
    base_url: Option<String>,
    model: Option<String>,
    language: Option<String>,
    api_key: Option<String>,
    timeout_secs: u64,
}

impl GroqTranscriberBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            model: None,
            language: None,
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
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
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

    pub fn build(self) -> Result<GroqTranscriber> {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(self.timeout_secs))
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))?;
        Ok(GroqTranscriber {
            http_client,
            base_url: self
                .base_url
                .unwrap_or_else(|| DEFAULT_GROQ_BASE_URL.to_string()),
            model: self
                .model
                .unwrap_or_else(|| DEFAULT_TRANSCRIPTION_MODEL.to_string()),
            language: self.language,
            api_key: self.api_key,
        })
    }
}

impl Default for GroqTranscriberBuilder {
    fn default() -> Self {
        Self::new()
    }
}
