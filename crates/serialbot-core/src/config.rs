// ── Runtime pipeline configuration ──
//
// Everything the pipeline needs, built by the config crate (or a test)
// and handed to `Pipeline::new`. Core never reads files or environment.

use std::collections::HashSet;

use secrecy::SecretString;
use serialbot_api::TransportConfig;
use url::Url;

/// Organization account used for `login_with_id_and_password`.
#[derive(Debug, Clone)]
pub struct CloudCredentials {
    pub user_id: String,
    pub password: SecretString,
    pub oem_id: String,
}

/// Configuration threaded into the pipeline at construction.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Cloud request endpoint.
    pub endpoint: Url,
    /// Account credentials exchanged for a bearer token on every run.
    pub credentials: CloudCredentials,
    /// Channel identifiers allowed to issue lookups.
    pub allowed_channels: HashSet<String>,
    /// Reporting dashboard base URL; `serial_number` is appended.
    pub dashboard_url: Url,
    /// HTTP client settings for the cloud endpoint.
    pub transport: TransportConfig,
}
