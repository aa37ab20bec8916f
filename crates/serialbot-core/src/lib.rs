// serialbot-core: Serial-number lookup pipeline between the webhook surface and the cloud API.

pub mod capability;
pub mod channel;
pub mod config;
pub mod credentials;
pub mod dashboard;
pub mod error;
pub mod pipeline;
mod remote;
pub mod serial;
pub mod translate;
pub mod verdict;

// ── Primary re-exports ──────────────────────────────────────────────
pub use capability::CapabilityState;
pub use config::{CloudCredentials, PipelineConfig};
pub use error::{
    AuthError, Forbidden, PipelineError, ResolutionError, TranslationError, ValidationError,
};
pub use pipeline::{Pipeline, PipelineResult};
pub use serial::SerialNumber;
