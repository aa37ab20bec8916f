// ── Request pipeline ──
//
// Sequences the stages for one request:
//
//   authorize → normalize → login → translate → resolve → render
//
// Each stage consumes the previous stage's output; the first failure is
// terminal. The orchestrator holds only immutable configuration and a
// stateless HTTP client, so one `Pipeline` serves concurrent requests
// with no shared mutable state.

use serialbot_api::CloudClient;
use tracing::{info, instrument, warn};

use crate::capability::query_capability;
use crate::channel::authorize;
use crate::config::PipelineConfig;
use crate::credentials::login;
use crate::dashboard::render_link;
use crate::error::PipelineError;
use crate::serial::normalize;
use crate::translate::resolve;
use crate::verdict::render;

/// Terminal value of a run: the reply text, or the failing stage's error.
pub type PipelineResult = Result<String, PipelineError>;

/// Request pipeline bound to one configuration.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    client: CloudClient,
}

impl Pipeline {
    /// Create a pipeline with an explicit client.
    pub fn new(config: PipelineConfig, client: CloudClient) -> Self {
        Self { config, client }
    }

    /// Create a pipeline whose client is built from `config.transport`.
    pub fn from_config(config: PipelineConfig) -> Result<Self, serialbot_api::Error> {
        let client = CloudClient::new(config.endpoint.clone(), &config.transport)?;
        Ok(Self::new(config, client))
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Dashboard link for the serial in `text`. Never calls the cloud API.
    #[instrument(skip(self, text))]
    pub fn dashboard_link(&self, channel_id: &str, text: &str) -> PipelineResult {
        let outcome = self.build_link(channel_id, text);
        log_outcome(&outcome);
        outcome
    }

    /// Firmware verdict for the serial in `text`.
    #[instrument(skip(self, text))]
    pub async fn check_device(&self, channel_id: &str, text: &str) -> PipelineResult {
        let outcome = self.resolve_verdict(channel_id, text).await;
        log_outcome(&outcome);
        outcome
    }

    fn build_link(&self, channel_id: &str, text: &str) -> PipelineResult {
        authorize(channel_id, &self.config.allowed_channels)?;
        let serial = normalize(text)?;
        let message = render_link(&self.config.dashboard_url, &serial);
        info!(%serial, "generated dashboard link");
        Ok(message)
    }

    async fn resolve_verdict(&self, channel_id: &str, text: &str) -> PipelineResult {
        authorize(channel_id, &self.config.allowed_channels)?;
        let serial = normalize(text)?;
        let session = login(&self.client, &self.config.credentials).await?;
        let uuid = resolve(&self.client, &serial, &session).await?;
        let state = query_capability(&self.client, &uuid, &session).await?;
        info!(%serial, uuid = %uuid, ?state, "device status resolved");
        Ok(render(&serial, state))
    }
}

fn log_outcome(outcome: &PipelineResult) {
    if let Err(err) = outcome {
        warn!(stage = err.stage(), error = %err, "pipeline failed");
    }
}
