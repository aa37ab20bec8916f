// ── Device feature lookup ──
//
// Asks the hub for its feature list and reduces the entry for the
// doorbell streaming feature to a three-valued state.

use serde::Serialize;
use serde_json::{Map, Value};
use serialbot_api::payload::{FEATURE_STATUS_FIELD, feature_map};
use serialbot_api::{AuthToken, CloudClient, RawCommand};
use tracing::{debug, warn};

use crate::error::ResolutionError;
use crate::remote::remote;

/// Feature whose presence and state decide the verdict.
pub const CAPABILITY_KEY: &str = "mqttwebrtc.v2";

/// `status` value that marks an installed feature as disabled.
pub const STATUS_OFF: &str = "off";

/// Outcome of the feature lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityState {
    /// Feature not installed.
    Absent,
    /// Installed, `status` is `"off"`.
    PresentOff,
    /// Installed and on. Also any other, null, or missing `status`.
    PresentOn,
}

impl CapabilityState {
    /// Reduce a hub feature map to a state.
    ///
    /// Fails open: anything other than an explicit `"off"` counts as on.
    pub fn from_features(features: &Map<String, Value>) -> Self {
        let Some(entry) = features.get(CAPABILITY_KEY) else {
            return Self::Absent;
        };
        match entry.get(FEATURE_STATUS_FIELD).and_then(Value::as_str) {
            Some(STATUS_OFF) => Self::PresentOff,
            _ => Self::PresentOn,
        }
    }
}

/// Query the feature list of controller `uuid`.
pub async fn query_capability(
    client: &CloudClient,
    uuid: &str,
    session: &AuthToken,
) -> Result<CapabilityState, ResolutionError> {
    let command = RawCommand::features_list();
    let envelope = remote(
        client.controller_raw_command(uuid, &command, session),
        ResolutionError::Transport,
    )
    .await?;

    let data = envelope.into_data().map_err(|rejection| {
        warn!(uuid, %rejection, "feature list rejected");
        ResolutionError::from(rejection)
    })?;

    let Some(features) = feature_map(&data) else {
        warn!(uuid, "feature map missing or not an object");
        return Err(ResolutionError::MalformedResponse);
    };

    let state = CapabilityState::from_features(features);
    debug!(uuid, ?state, features = features.len(), "capability resolved");
    Ok(state)
}
