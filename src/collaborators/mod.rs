//! Hosted inference collaborators.
//!
//! The pipeline talks to three independent services: speech-to-text and
//! vision reasoning (both Groq-hosted, sharing one credential) and speech
//! synthesis (ElevenLabs). Each is reached through a small trait so tests
//! can substitute in-process fakes for the real HTTP clients.

mod synthesis;
mod transcription;
mod vision;

pub use synthesis::{
    ElevenLabsSynthesizer, ElevenLabsSynthesizerBuilder, DEFAULT_ELEVENLABS_BASE_URL,
    DEFAULT_OUTPUT_FORMAT, DEFAULT_SYNTHESIS_MODEL, DEFAULT_VOICE_ID,
};
pub use transcription::{
    GroqTranscriber, GroqTranscriberBuilder, DEFAULT_GROQ_BASE_URL, DEFAULT_TRANSCRIPTION_LANGUAGE,
    DEFAULT_TRANSCRIPTION_MODEL,
};
pub use vision::{GroqVisionAnalyst, GroqVisionAnalystBuilder, DEFAULT_VISION_MODEL};

use std::path::Path;

use async_trait::async_trait;

use crate::Result;

/// Speech-to-text over a staged audio file.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe the staged audio file. The output is opaque text and may
    /// be empty; callers do no further validation on it.
    async fn transcribe(&self, audio_path: &Path) -> Result<String>;
}

/// Vision-capable reasoning over a staged image plus a textual prompt.
#[async_trait]
pub trait VisionAnalyst: Send + Sync {
    /// Produce the reply text for the given image and prompt.
    async fn analyze(&self, image_path: &Path, prompt: &str) -> Result<String>;
}

/// Text-to-speech synthesis.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Render `text` as audio and return the complete byte stream.
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>>;
}
