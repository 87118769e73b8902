//! Environment-backed service configuration.
//!
//! All settings are read once at startup into an [`AppConfig`] and injected
//! into the collaborator builders from there. Leaf code never reads the
//! environment directly, and absent credentials do not fail startup: they
//! are detected lazily when the affected pipeline stage runs.

use std::env;
use std::path::PathBuf;

use tracing::warn;

use crate::collaborators::{
    DEFAULT_ELEVENLABS_BASE_URL, DEFAULT_GROQ_BASE_URL, DEFAULT_OUTPUT_FORMAT,
    DEFAULT_SYNTHESIS_MODEL, DEFAULT_TRANSCRIPTION_LANGUAGE, DEFAULT_TRANSCRIPTION_MODEL,
    DEFAULT_VISION_MODEL, DEFAULT_VOICE_ID,
};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;
const DEFAULT_COLLABORATOR_TIMEOUT_SECS: u64 = 60;

/// Top-level configuration for the service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub groq: GroqConfig,
    pub elevenlabs: ElevenLabsConfig,
}

/// HTTP server and scratch-staging settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound for the multipart request body.
    pub max_upload_bytes: usize,
    /// Directory where uploads are staged before collaborator calls.
    pub scratch_dir: PathBuf,
    /// Per-request timeout applied to each collaborator HTTP client.
    pub collaborator_timeout_secs: u64,
}

/// Settings for the Groq-backed transcription and vision stages.
///
/// Both stages share one credential; it is checked immediately before each
/// stage runs, never at startup.
#[derive(Debug, Clone)]
pub struct GroqConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub stt_model: String,
    pub stt_language: String,
    pub vision_model: String,
}

/// Settings for the ElevenLabs-backed speech synthesis stage.
#[derive(Debug, Clone)]
pub struct ElevenLabsConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub voice_id: String,
    pub model_id: String,
    pub output_format: String,
}

impl AppConfig {
    /// Assemble the configuration from the process environment.
    ///
    /// Unset or empty variables fall back to defaults; unparsable numeric
    /// values are logged and replaced by their defaults rather than
    /// aborting startup.
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                host: env_string("AIDOCTOR_HOST", DEFAULT_HOST),
                port: env_u16("AIDOCTOR_PORT", DEFAULT_PORT),
                max_upload_bytes: env_usize("AIDOCTOR_MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES),
                scratch_dir: env::var("AIDOCTOR_SCRATCH_DIR")
                    .ok()
                    .filter(|v| !v.is_empty())
                    .map(PathBuf::from)
                    .unwrap_or_else(env::temp_dir),
                collaborator_timeout_secs: env_u64(
                    "AIDOCTOR_COLLABORATOR_TIMEOUT_SECS",
                    DEFAULT_COLLABORATOR_TIMEOUT_SECS,
                ),
            },
            groq: GroqConfig {
                api_key: optional_env("GROQ_API_KEY"),
                base_url: env_string("GROQ_BASE_URL", DEFAULT_GROQ_BASE_URL),
                stt_model: env_string("STT_MODEL", DEFAULT_TRANSCRIPTION_MODEL),
                stt_language: env_string("STT_LANGUAGE", DEFAULT_TRANSCRIPTION_LANGUAGE),
                vision_model: env_string("VISION_MODEL", DEFAULT_VISION_MODEL),
            },
            elevenlabs: ElevenLabsConfig {
                api_key: optional_env("ELEVEN_API_KEY"),
                base_url: env_string("ELEVENLABS_BASE_URL", DEFAULT_ELEVENLABS_BASE_URL),
                voice_id: env_string("ELEVENLABS_VOICE_ID", DEFAULT_VOICE_ID),
                model_id: env_string("ELEVENLABS_MODEL_ID", DEFAULT_SYNTHESIS_MODEL),
                output_format: env_string("ELEVENLABS_OUTPUT_FORMAT", DEFAULT_OUTPUT_FORMAT),
            },
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            scratch_dir: env::temp_dir(),
            collaborator_timeout_secs: DEFAULT_COLLABORATOR_TIMEOUT_SECS,
        }
    }
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_GROQ_BASE_URL.to_string(),
            stt_model: DEFAULT_TRANSCRIPTION_MODEL.to_string(),
            stt_language: DEFAULT_TRANSCRIPTION_LANGUAGE.to_string(),
            vision_model: DEFAULT_VISION_MODEL.to_string(),
        }
    }
}

impl Default for ElevenLabsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_ELEVENLABS_BASE_URL.to_string(),
            voice_id: DEFAULT_VOICE_ID.to_string(),
            model_id: DEFAULT_SYNTHESIS_MODEL.to_string(),
            output_format: DEFAULT_OUTPUT_FORMAT.to_string(),
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

fn env_string(key: &str, default: &str) -> String {
    optional_env(key).unwrap_or_else(|| default.to_string())
}

fn env_u16(key: &str, default: u16) -> u16 {
    match optional_env(key) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("Invalid {}='{}', falling back to {}", key, raw, default);
            default
        }),
        None => default,
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    match optional_env(key) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("Invalid {}='{}', falling back to {}", key, raw, default);
            default
        }),
        None => default,
    }
}

fn env_usize(key: &str, default: usize) -> usize {
    match optional_env(key) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("Invalid {}='{}', falling back to {}", key, raw, default);
            default
        }),
        None => default,
    }
}
