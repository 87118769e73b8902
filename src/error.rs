use thiserror::Error;

/// Pipeline stage backed by a hosted inference service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Transcription,
    VisionReasoning,
    SpeechSynthesis,
}

impl Service {
    /// Human-readable stage label used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Transcription => "Speech-to-text",
            Self::VisionReasoning => "Vision reasoning",
            Self::SpeechSynthesis => "Speech synthesis",
        }
    }
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Unified error type for the consultation service.
///
/// Every failure the pipeline can produce collapses into one of three
/// categories: a missing credential, a failed collaborator call, or a
/// scratch-file I/O error. The HTTP layer maps all of them to a 500
/// with the message as the response detail.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("{} failed{}: {message}", .service.label(), format_status(.status))]
    Collaborator {
        service: Service,
        status: Option<u16>,
        message: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Helper to format the optional HTTP status for display
fn format_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (HTTP {})", code),
        None => String::new(),
    }
}

impl Error {
    /// Create a configuration error (missing credential or invalid setting).
    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration {
            message: msg.into(),
        }
    }

    /// Create a collaborator error with no HTTP status (transport failures,
    /// malformed response bodies).
    pub fn collaborator(service: Service, msg: impl Into<String>) -> Self {
        Error::Collaborator {
            service,
            status: None,
            message: msg.into(),
        }
    }

    /// Create a collaborator error carrying the upstream HTTP status.
    pub fn collaborator_status(service: Service, status: u16, msg: impl Into<String>) -> Self {
        Error::Collaborator {
            service,
            status: Some(status),
            message: msg.into(),
        }
    }

    /// The failing stage, if this is a collaborator error.
    pub fn service(&self) -> Option<Service> {
        match self {
            Error::Collaborator { service, .. } => Some(*service),
            _ => None,
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration { .. })
    }
}
