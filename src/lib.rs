//! # ai-doctor
//!
//! Voice and vision medical consultation service over hosted inference APIs.
//!
//! ## Overview
//!
//! A patient submits a medical image and a spoken question as one multipart
//! upload. The service stages both to scratch files, transcribes the audio
//! (Groq Whisper), reasons over the image and the transcription with a
//! vision-capable chat model (Groq), speaks the reply (ElevenLabs), and
//! returns all three artifacts in a single JSON response:
//!
//! ```json
//! { "transcribed_text": "...", "doctor_response": "...", "doctor_audio_base64": "..." }
//! ```
//!
//! ## Design
//!
//! - **Fixed pipeline**: transcribe, reason, synthesize, in that order. No
//!   retries, no fallbacks, no partial results.
//! - **Lazy credentials**: a missing API key fails the affected stage at
//!   request time; startup always succeeds.
//! - **Scratch hygiene**: uploads are staged under UUID names and removed
//!   on every exit path via RAII handles.
//! - **Injectable collaborators**: the three services sit behind traits so
//!   tests run the whole pipeline against in-process fakes.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use ai_doctor::collaborators::{ElevenLabsSynthesizer, GroqTranscriber, GroqVisionAnalyst};
//! use ai_doctor::{create_router, AppConfig, AppState, ConsultationPipeline};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::from_env();
//!
//!     let transcriber = GroqTranscriber::builder().api_key("gsk-...").build()?;
//!     let analyst = GroqVisionAnalyst::builder().api_key("gsk-...").build()?;
//!     let synthesizer = ElevenLabsSynthesizer::builder().api_key("el-...").build()?;
//!
//!     let pipeline = ConsultationPipeline::new(
//!         Arc::new(transcriber),
//!         Arc::new(analyst),
//!         Arc::new(synthesizer),
//!         config.server.scratch_dir.clone(),
//!     );
//!     let app = create_router(AppState::new(pipeline), config.server.max_upload_bytes);
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`api`] | HTTP routes, state, and error mapping |
//! | [`collaborators`] | Transcription, vision, and synthesis clients |
//! | [`config`] | Environment-backed configuration |
//! | [`consultation`] | The pipeline and its request/response types |
//! | [`scratch`] | Scratch-file staging with RAII cleanup |

pub mod api;
pub mod collaborators;
pub mod config;
pub mod consultation;
pub mod scratch;

// Re-export main types for convenience
pub use api::{create_router, ApiError, AppState};
pub use collaborators::{
    ElevenLabsSynthesizer, GroqTranscriber, GroqVisionAnalyst, SpeechSynthesizer, Transcriber,
    VisionAnalyst,
};
pub use config::AppConfig;
pub use consultation::{ArtifactUpload, Consultation, ConsultationPipeline};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, Service};
