//! CLI error types with miette diagnostics.
//!
//! Maps config, client-build, and pipeline failures into user-facing
//! errors with actionable help text and distinct exit codes.

use miette::Diagnostic;
use thiserror::Error;

use serialbot_config::ConfigError;
use serialbot_core::{PipelineError, TranslationError};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONFIG: i32 = 6;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Configuration ────────────────────────────────────────────────

    #[error("Configuration error: {source}")]
    #[diagnostic(
        code(serialbot::config),
        help(
            "Expected config at: {path}\n\
             Every key can also be set from the environment, e.g. SERIALBOT_CLOUD__USER_ID."
        )
    )]
    Config {
        path: String,
        #[source]
        source: ConfigError,
    },

    #[error("No allowed channels configured")]
    #[diagnostic(
        code(serialbot::no_channel),
        help("Pass --channel or add a channel to slack.allowed_channels.")
    )]
    NoChannel,

    // ── Cloud client ─────────────────────────────────────────────────

    #[error("Could not build the cloud API client")]
    #[diagnostic(
        code(serialbot::client),
        help("Check cloud.ca_cert and cloud.endpoint in your configuration.")
    )]
    Client(#[source] serialbot_api::Error),

    // ── Pipeline ─────────────────────────────────────────────────────

    #[error("{}", .0.user_message())]
    #[diagnostic(code(serialbot::lookup_failed))]
    Pipeline(#[from] PipelineError),

    // ── Server ───────────────────────────────────────────────────────

    #[error("Server error on {bind}: {source}")]
    #[diagnostic(
        code(serialbot::server),
        help("Check that the address is free and valid, or pass --bind.")
    )]
    Server {
        bind: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not write output: {0}")]
    #[diagnostic(code(serialbot::io))]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } | Self::NoChannel => exit_code::CONFIG,
            Self::Client(_) | Self::Server { .. } => exit_code::CONNECTION,
            Self::Pipeline(err) => match err {
                PipelineError::Forbidden(_) => exit_code::PERMISSION,
                PipelineError::Validation(_) => exit_code::USAGE,
                PipelineError::Auth(_) => exit_code::AUTH,
                PipelineError::Translation(TranslationError::NotFound { .. }) => {
                    exit_code::NOT_FOUND
                }
                PipelineError::Translation(_) | PipelineError::Resolution(_) => {
                    exit_code::CONNECTION
                }
            },
            Self::Io(_) => exit_code::GENERAL,
        }
    }
}
