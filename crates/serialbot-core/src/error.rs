// ── Pipeline error taxonomy ──
//
// One enum per stage, each carrying a human-readable cause. `Display` is
// the cause text; `PipelineError::user_message` adds the stage prefix and
// the marker. Raw payloads and response shapes never reach these strings.

use serialbot_api::Rejection;
use thiserror::Error;

/// Serial number input failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please provide a serial number.")]
    EmptyInput,

    #[error("Please provide only a single serial number (e.g., 92000000).")]
    MultipleValues,

    #[error(
        "Invalid serial number format. Please provide an 8-digit serial starting with 92 (e.g., 92000000)."
    )]
    InvalidFormat,
}

/// Channel gate failure: the channel is not allow-listed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("This command is not allowed in this channel.")]
pub struct Forbidden {
    pub channel_id: String,
}

/// Login failures. Callers treat every variant alike; the
/// variant only selects the cause text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Login failed: Authentication rejected by server")]
    Rejected,

    #[error("Login failed: Invalid response from API")]
    MalformedResponse,

    #[error("Login failed: {0}")]
    Transport(String),
}

impl From<Rejection> for AuthError {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::Refused { .. } => Self::Rejected,
            Rejection::Unexpected { .. } => Self::MalformedResponse,
        }
    }
}

/// Serial-to-UUID mapping failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
    #[error(
        "Device with serial {serial} not found or not accessible. Please check the serial number and try again."
    )]
    NotFound { serial: String },

    #[error("Invalid response: controller mapping not found")]
    MalformedResponse,

    #[error("API request failed: {0}")]
    Rejected(String),

    #[error("UUID conversion failed: {0}")]
    Transport(String),
}

impl From<Rejection> for TranslationError {
    fn from(rejection: Rejection) -> Self {
        Self::Rejected(rejection.to_string())
    }
}

/// Device feature query failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error("Snapshot retrieval failed: Device not found or not accessible")]
    DeviceUnavailable,

    #[error("Snapshot retrieval failed: Invalid response from API")]
    MalformedResponse,

    #[error("Snapshot retrieval failed: {0}")]
    Transport(String),
}

impl From<Rejection> for ResolutionError {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::Refused { .. } => Self::DeviceUnavailable,
            Rejection::Unexpected { .. } => Self::MalformedResponse,
        }
    }
}

/// Terminal failure of a pipeline run: the first stage error, unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Forbidden(#[from] Forbidden),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Translation(#[from] TranslationError),

    #[error("Snapshot request failed: {0}")]
    Resolution(#[from] ResolutionError),
}

impl PipelineError {
    /// Single-line message for the chat reply.
    pub fn user_message(&self) -> String {
        format!("❌ {self}")
    }

    /// Name of the stage that failed, for logs.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Forbidden(_) => "authorize",
            Self::Validation(_) => "normalize",
            Self::Auth(_) => "login",
            Self::Translation(_) => "translate",
            Self::Resolution(_) => "resolve",
        }
    }
}
