// Request bodies for the single POST endpoint.
//
// Every call is `{ "call": <name>, "params": {...} }`; the API routes on
// `call`. Bodies may carry the account password, so `Debug` only shows
// the call name.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::{Value, json};
use uuid::Uuid;

/// Seconds the hub is given to answer an instant raw command.
pub const INSTANT_TIMEOUT_SECS: u32 = 10;

/// A single request envelope.
#[derive(Serialize)]
pub struct CloudRequest {
    call: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<&'static str>,
    params: Value,
}

impl CloudRequest {
    /// `login_with_id_and_password`.
    pub fn login(user_id: &str, password: &SecretString, oem_id: &str) -> Self {
        Self {
            call: "login_with_id_and_password",
            version: None,
            params: json!({
                "user_id": user_id,
                "user_password": password.expose_secret(),
                "oem_id": oem_id,
            }),
        }
    }

    /// `legacy_id_mapping` for a batch of controller serials.
    pub fn legacy_id_mapping(serials: &[&str]) -> Self {
        Self {
            call: "legacy_id_mapping",
            version: Some("1"),
            params: json!({
                "map": {
                    "controller": {
                        "ids_to_uuids": serials,
                    }
                }
            }),
        }
    }

    /// `controller_raw_command`: instant, non-queued, with a bounded
    /// server-side wait.
    pub fn raw_command(controller_uuid: &str, command: &RawCommand) -> Self {
        Self {
            call: "controller_raw_command",
            version: None,
            params: json!({
                "controller_uuid": controller_uuid,
                "instant": 1,
                "queued": 0,
                "instant_timeout": INSTANT_TIMEOUT_SECS,
                "command": command,
            }),
        }
    }

    /// The API call name.
    pub fn call(&self) -> &'static str {
        self.call
    }
}

impl fmt::Debug for CloudRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudRequest")
            .field("call", &self.call)
            .finish_non_exhaustive()
    }
}

/// JSON-RPC style command forwarded verbatim to the hub.
#[derive(Debug, Clone, Serialize)]
pub struct RawCommand {
    pub method: String,
    pub id: String,
    pub params: Value,
}

impl RawCommand {
    /// `hub.features.list` with no parameters.
    pub fn features_list() -> Self {
        Self {
            method: "hub.features.list".into(),
            id: Uuid::new_v4().to_string(),
            params: json!({}),
        }
    }
}
