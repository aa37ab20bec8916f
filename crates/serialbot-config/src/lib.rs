//! Configuration for the serialbot server and CLI.
//!
//! TOML file + `SERIALBOT_` environment overrides, secret resolution,
//! and translation to `serialbot_core::PipelineConfig`. Core never sees
//! these types; it receives a pre-built `PipelineConfig`.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use url::Url;

use serialbot_api::{TlsMode, TransportConfig, client::DEFAULT_ENDPOINT};
use serialbot_core::{CloudCredentials, PipelineConfig};

/// Prefix for environment overrides. Nested keys use `__`,
/// e.g. `SERIALBOT_CLOUD__USER_ID`.
pub const ENV_PREFIX: &str = "SERIALBOT_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no cloud credentials configured (missing {field})")]
    NoCredentials { field: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: Server,

    #[serde(default)]
    pub cloud: Cloud,

    #[serde(default)]
    pub slack: Slack,

    #[serde(default)]
    pub dashboard: Dashboard,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Server {
    /// Socket address for the webhook listener.
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:3000".into()
}

/// Cloud API account and transport settings.
#[derive(Debug, Deserialize, Serialize)]
pub struct Cloud {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default, deserialize_with = "string_or_number")]
    pub user_id: Option<String>,

    /// Password (plaintext -- prefer `password_env`).
    #[serde(default, deserialize_with = "string_or_number")]
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    #[serde(default, deserialize_with = "string_or_number")]
    pub oem_id: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Path to a custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    #[serde(default)]
    pub insecure: bool,
}

impl Default for Cloud {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            user_id: None,
            password: None,
            password_env: None,
            oem_id: None,
            timeout: default_timeout(),
            ca_cert: None,
            insecure: false,
        }
    }
}

/// Environment values are typed by figment, so `SERIALBOT_CLOUD__OEM_ID=1`
/// arrives as an integer. Account fields keep their text form either way.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Unsigned(u64),
        Signed(i64),
        Float(f64),
    }

    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|scalar| match scalar {
        Scalar::Text(s) => s,
        Scalar::Unsigned(n) => n.to_string(),
        Scalar::Signed(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
    }))
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.into()
}
fn default_timeout() -> u64 {
    30
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Slack {
    /// Channel IDs allowed to run commands.
    #[serde(default)]
    pub allowed_channels: Vec<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Dashboard {
    /// Reporting dashboard URL; `serial_number` is appended per lookup.
    pub base_url: Option<String>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "serialbot", "serialbot").map_or_else(
        || PathBuf::from("serialbot.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from defaults, the TOML file, and environment.
///
/// `path` overrides the platform config location. A missing file is not
/// an error; every value can come from the environment.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Render a config as pretty TOML (used by `serialbot config show`).
pub fn to_toml(cfg: &Config) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(cfg)?)
}

// ── Secret resolution ───────────────────────────────────────────────

/// Resolve the cloud password: the `password_env` variable first, then
/// the `password` field (file or `SERIALBOT_CLOUD__PASSWORD`).
pub fn resolve_password(cloud: &Cloud) -> Result<SecretString, ConfigError> {
    resolve_password_with(cloud, |name| std::env::var(name).ok())
}

fn resolve_password_with(
    cloud: &Cloud,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<SecretString, ConfigError> {
    if let Some(val) = cloud.password_env.as_deref().and_then(&lookup) {
        return Ok(SecretString::from(val));
    }

    if let Some(ref pw) = cloud.password {
        return Ok(SecretString::from(pw.clone()));
    }

    Err(ConfigError::NoCredentials {
        field: "cloud.password".into(),
    })
}

// ── Translation to core config ──────────────────────────────────────

/// Build a validated `PipelineConfig`.
pub fn to_pipeline_config(cfg: &Config) -> Result<PipelineConfig, ConfigError> {
    let endpoint = parse_url("cloud.endpoint", &cfg.cloud.endpoint)?;

    let base_url = cfg
        .dashboard
        .base_url
        .as_deref()
        .ok_or_else(|| ConfigError::Validation {
            field: "dashboard.base_url".into(),
            reason: "not set".into(),
        })?;
    let dashboard_url = parse_url("dashboard.base_url", base_url)?;

    let credentials = CloudCredentials {
        user_id: required(cfg.cloud.user_id.as_deref(), "cloud.user_id")?,
        password: resolve_password(&cfg.cloud)?,
        oem_id: required(cfg.cloud.oem_id.as_deref(), "cloud.oem_id")?,
    };

    let allowed_channels: HashSet<String> = cfg
        .slack
        .allowed_channels
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .map(str::to_owned)
        .collect();
    if allowed_channels.is_empty() {
        return Err(ConfigError::Validation {
            field: "slack.allowed_channels".into(),
            reason: "at least one channel is required".into(),
        });
    }

    Ok(PipelineConfig {
        endpoint,
        credentials,
        allowed_channels,
        dashboard_url,
        transport: transport_config(&cfg.cloud)?,
    })
}

fn transport_config(cloud: &Cloud) -> Result<TransportConfig, ConfigError> {
    if cloud.timeout == 0 {
        return Err(ConfigError::Validation {
            field: "cloud.timeout".into(),
            reason: "must be greater than zero".into(),
        });
    }

    let tls = if cloud.insecure {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ref ca_path) = cloud.ca_cert {
        TlsMode::CustomCa(ca_path.clone())
    } else {
        TlsMode::System
    };

    Ok(TransportConfig {
        tls,
        timeout: Duration::from_secs(cloud.timeout),
    })
}

fn parse_url(field: &str, raw: &str) -> Result<Url, ConfigError> {
    raw.parse().map_err(|e| ConfigError::Validation {
        field: field.into(),
        reason: format!("invalid URL {raw:?}: {e}"),
    })
}

fn required(value: Option<&str>, field: &str) -> Result<String, ConfigError> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(str::to_owned)
        .ok_or_else(|| ConfigError::NoCredentials {
            field: field.into(),
        })
}
