// ── Serial to UUID mapping ──
//
// Serial → controller UUID via a one-serial `legacy_id_mapping` batch.

use serde_json::Value;
use serialbot_api::payload::id_mapping;
use serialbot_api::{AuthToken, CloudClient};
use tracing::{debug, warn};

use crate::error::TranslationError;
use crate::remote::remote;
use crate::serial::SerialNumber;

/// Resolve `serial` to the cloud's controller UUID.
pub async fn resolve(
    client: &CloudClient,
    serial: &SerialNumber,
    session: &AuthToken,
) -> Result<String, TranslationError> {
    let envelope = remote(
        client.legacy_id_mapping(serial.as_str(), session),
        TranslationError::Transport,
    )
    .await?;

    let data = envelope.into_data().map_err(|rejection| {
        warn!(%rejection, "id mapping rejected");
        TranslationError::from(rejection)
    })?;

    let Some(mapping) = id_mapping(&data) else {
        warn!("controller mapping missing or not an object");
        return Err(TranslationError::MalformedResponse);
    };

    match mapping.get(serial.as_str()).and_then(uuid_value) {
        Some(uuid) => {
            debug!(%serial, uuid = %uuid, "serial resolved");
            Ok(uuid)
        }
        None => {
            warn!(%serial, returned = mapping.len(), "serial not in controller mapping");
            Err(TranslationError::NotFound {
                serial: serial.to_string(),
            })
        }
    }
}

/// UUIDs normally arrive as strings; accept bare numbers too. Empty or
/// null entries count as missing.
fn uuid_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
