//! The consultation pipeline.
//!
//! One request runs a fixed sequence: stage the two uploads to scratch
//! files, transcribe the audio, compose the reasoning prompt, analyze the
//! image, synthesize the spoken reply, and base64-encode the audio. There
//! are no retries, no fallbacks, and no partial results: the first failing
//! stage aborts the request and later stages never run. Scratch files are
//! removed on every exit path.

use std::path::PathBuf;
use std::sync::Arc;

use base64::Engine;
use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, info};

use crate::collaborators::{SpeechSynthesizer, Transcriber, VisionAnalyst};
use crate::scratch::ScratchFile;
use crate::Result;

/// Instruction block prepended to every reasoning prompt.
pub const DOCTOR_INSTRUCTIONS: &str = "You have to act as a professional doctor, i know you are not but this is for learning purpose. What's in this image?. Do you find anything wrong with it medically? If you make a differential, suggest some remedies for them. Donot add any numbers or special characters in your response. Your response should be in one long paragraph. Also always answer as if you are answering to a real person. Donot say 'In the image I see' but say 'With what I see, I think you have ....' Dont respond as an AI model in markdown, your answer should mimic that of an actual doctor not an AI bot, Keep your answer concise (max 2 sentences). No preamble, start your answer right away please";

const PATIENT_QUERY_SEPARATOR: &str = "\n\nPatient asks: ";

/// One uploaded artifact: the client-supplied filename and the raw payload.
///
/// The filename contributes only its extension to the scratch path; see
/// [`crate::scratch::ScratchFile`].
#[derive(Debug, Clone)]
pub struct ArtifactUpload {
    pub filename: String,
    pub bytes: Bytes,
}

impl ArtifactUpload {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }
}

/// A completed consultation, serialized as the response body verbatim.
#[derive(Debug, Clone, Serialize)]
pub struct Consultation {
    /// What the patient said, per the transcription service.
    pub transcribed_text: String,
    /// The doctor's textual reply.
    pub doctor_response: String,
    /// The spoken reply, standard base64 over the synthesized audio bytes.
    pub doctor_audio_base64: String,
}

/// Compose the reasoning prompt: fixed instructions, fixed separator, then
/// the transcription verbatim (even when empty).
pub fn compose_prompt(transcribed_text: &str) -> String {
    format!(
        "{}{}{}",
        DOCTOR_INSTRUCTIONS, PATIENT_QUERY_SEPARATOR, transcribed_text
    )
}

/// Orchestrates the three collaborators over staged artifacts.
///
/// Collaborators are injected as trait objects; production wiring lives in
/// the binary, tests substitute counting fakes.
pub struct ConsultationPipeline {
    transcriber: Arc<dyn Transcriber>,
    analyst: Arc<dyn VisionAnalyst>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    scratch_dir: PathBuf,
}

impl ConsultationPipeline {
    pub fn new(
        transcriber: Arc<dyn Transcriber>,
        analyst: Arc<dyn VisionAnalyst>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        scratch_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            transcriber,
            analyst,
            synthesizer,
            scratch_dir: scratch_dir.into(),
        }
    }

    /// Run the full pipeline over one image/audio pair.
    ///
    /// Both payloads must be non-empty; the HTTP layer rejects requests
    /// that are not before this runs.
    pub async fn process(
        &self,
        image: ArtifactUpload,
        audio: ArtifactUpload,
    ) -> Result<Consultation> {
        let image_file = ScratchFile::stage(&self.scratch_dir, &image.filename, &image.bytes).await?;
        let audio_file = ScratchFile::stage(&self.scratch_dir, &audio.filename, &audio.bytes).await?;
        debug!(
            image = %image_file.path().display(),
            audio = %audio_file.path().display(),
            "staged consultation artifacts"
        );

        let transcribed_text = self.transcriber.transcribe(audio_file.path()).await?;
        info!(chars = transcribed_text.len(), "transcription complete");

        // An empty transcription still reaches the reasoning stage unchanged.
        let prompt = compose_prompt(&transcribed_text);
        let doctor_response = self.analyst.analyze(image_file.path(), &prompt).await?;
        info!(chars = doctor_response.len(), "vision reasoning complete");

        let audio_bytes = self.synthesizer.synthesize(&doctor_response).await?;
        info!(bytes = audio_bytes.len(), "speech synthesis complete");

        let doctor_audio_base64 =
            base64::engine::general_purpose::STANDARD.encode(&audio_bytes);
        Ok(Consultation {
            transcribed_text,
            doctor_response,
            doctor_audio_base64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_starts_with_instructions() {
        let prompt = compose_prompt("I have a headache");
        assert!(prompt.starts_with(DOCTOR_INSTRUCTIONS));
    }

    #[test]
    fn prompt_appends_transcription_after_separator() {
        let prompt = compose_prompt("I have a headache");
        assert!(prompt.ends_with("\n\nPatient asks: I have a headache"));
    }

    #[test]
    fn empty_transcription_is_passed_through_unchanged() {
        let prompt = compose_prompt("");
        assert!(prompt.ends_with("\n\nPatient asks: "));
        assert_eq!(
            prompt.len(),
            DOCTOR_INSTRUCTIONS.len() + PATIENT_QUERY_SEPARATOR.len()
        );
    }

    #[test]
    fn transcription_is_not_escaped_or_trimmed() {
        let prompt = compose_prompt("  pain in my \"left\" arm\n");
        assert!(prompt.ends_with("Patient asks:   pain in my \"left\" arm\n"));
    }
}
