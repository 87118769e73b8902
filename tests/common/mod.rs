//! Shared test doubles and request-building helpers.
//!
//! The three collaborators are replaced by counting fakes that record what
//! they were handed (staged paths, staged bytes, prompts, reply text) so
//! tests can assert on call ordering and early aborts without any network.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use ai_doctor::collaborators::{SpeechSynthesizer, Transcriber, VisionAnalyst};
use ai_doctor::{ConsultationPipeline, Error, Result, Service};

/// Sample payloads. The audio bytes stay ASCII so multipart bodies remain
/// valid UTF-8 for mock-server matching elsewhere.
pub const JPEG_HEADER: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46];
pub const WAV_SAMPLE: &[u8] = b"RIFF$fakewavWAVEfmt ";

enum Outcome<T> {
    Ok(T),
    Collaborator(Service),
    Configuration(&'static str),
}

impl<T: Clone> Outcome<T> {
    fn produce(&self, failure_msg: &str) -> Result<T> {
        match self {
            Outcome::Ok(value) => Ok(value.clone()),
            Outcome::Collaborator(service) => Err(Error::collaborator(*service, failure_msg)),
            Outcome::Configuration(msg) => Err(Error::configuration(*msg)),
        }
    }
}

pub struct FakeTranscriber {
    outcome: Outcome<String>,
    calls: AtomicUsize,
    /// Staged path and file contents observed at call time.
    pub seen: Mutex<Vec<(PathBuf, Vec<u8>)>>,
}

impl FakeTranscriber {
    pub fn ok(text: &str) -> Arc<Self> {
        Self::with_outcome(Outcome::Ok(text.to_string()))
    }

    pub fn failing() -> Arc<Self> {
        Self::with_outcome(Outcome::Collaborator(Service::Transcription))
    }

    pub fn unconfigured() -> Arc<Self> {
        Self::with_outcome(Outcome::Configuration(
            "Groq API key is not configured (set GROQ_API_KEY)",
        ))
    }

    fn with_outcome(outcome: Outcome<String>) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transcriber for FakeTranscriber {
    async fn transcribe(&self, audio_path: &Path) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let contents = std::fs::read(audio_path)?;
        self.seen
            .lock()
            .unwrap()
            .push((audio_path.to_path_buf(), contents));
        self.outcome.produce("simulated transcription outage")
    }
}

pub struct FakeVisionAnalyst {
    outcome: Outcome<String>,
    calls: AtomicUsize,
    pub seen: Mutex<Vec<(PathBuf, Vec<u8>)>>,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeVisionAnalyst {
    pub fn ok(reply: &str) -> Arc<Self> {
        Self::with_outcome(Outcome::Ok(reply.to_string()))
    }

    pub fn failing() -> Arc<Self> {
        Self::with_outcome(Outcome::Collaborator(Service::VisionReasoning))
    }

    fn with_outcome(outcome: Outcome<String>) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VisionAnalyst for FakeVisionAnalyst {
    async fn analyze(&self, image_path: &Path, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let contents = std::fs::read(image_path)?;
        self.seen
            .lock()
            .unwrap()
            .push((image_path.to_path_buf(), contents));
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.outcome.produce("simulated reasoning outage")
    }
}

pub struct FakeSynthesizer {
    outcome: Outcome<Vec<u8>>,
    calls: AtomicUsize,
    pub spoken: Mutex<Vec<String>>,
}

impl FakeSynthesizer {
    pub fn ok(audio: &[u8]) -> Arc<Self> {
        Self::with_outcome(Outcome::Ok(audio.to_vec()))
    }

    pub fn failing() -> Arc<Self> {
        Self::with_outcome(Outcome::Collaborator(Service::SpeechSynthesis))
    }

    pub fn unconfigured() -> Arc<Self> {
        Self::with_outcome(Outcome::Configuration(
            "ElevenLabs API key is not configured (set ELEVEN_API_KEY)",
        ))
    }

    fn with_outcome(outcome: Outcome<Vec<u8>>) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: AtomicUsize::new(0),
            spoken: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechSynthesizer for FakeSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.spoken.lock().unwrap().push(text.to_string());
        self.outcome.produce("simulated synthesis outage")
    }
}

pub fn pipeline(
    transcriber: &Arc<FakeTranscriber>,
    analyst: &Arc<FakeVisionAnalyst>,
    synthesizer: &Arc<FakeSynthesizer>,
    scratch_dir: &Path,
) -> ConsultationPipeline {
    ConsultationPipeline::new(
        transcriber.clone(),
        analyst.clone(),
        synthesizer.clone(),
        scratch_dir.to_path_buf(),
    )
}

pub fn scratch_entries(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}

/// Boundary used by hand-built multipart bodies in router tests.
pub const MULTIPART_BOUNDARY: &str = "consultation-test-boundary";

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", MULTIPART_BOUNDARY)
}

/// Build a multipart body from `(field name, filename, payload)` triples.
pub fn multipart_body(parts: &[(&str, &str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, filename, payload) in parts {
        body.extend_from_slice(format!("--{}\r\n", MULTIPART_BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                name, filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(payload);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", MULTIPART_BOUNDARY).as_bytes());
    body
}
