// Cloud request-endpoint HTTP client
//
// Wraps `reqwest::Client` with the single-endpoint POST convention, bearer
// header injection, and envelope decoding. Callers get an `Envelope` back
// and apply their own meaning to `data`; only transport failures and
// non-2xx statuses become `Error`.

use secrecy::SecretString;
use tracing::debug;
use url::Url;

use crate::auth::AuthToken;
use crate::envelope::Envelope;
use crate::error::Error;
use crate::request::{CloudRequest, RawCommand};
use crate::transport::TransportConfig;

/// Default production endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api-cloud-bh247.ezlo.com/v1/request";

/// HTTP client for the device-management request endpoint.
///
/// Cheap to clone; holds no per-session state. The bearer token travels
/// with each call instead of living in the client, so one client can
/// serve any number of concurrent, independent pipeline runs.
#[derive(Debug, Clone)]
pub struct CloudClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl CloudClient {
    /// Create a client from a `TransportConfig`.
    pub fn new(endpoint: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, endpoint })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    // ── Calls ────────────────────────────────────────────────────────

    /// `login_with_id_and_password`. Unauthenticated.
    pub async fn login(
        &self,
        user_id: &str,
        password: &SecretString,
        oem_id: &str,
    ) -> Result<Envelope, Error> {
        self.send(&CloudRequest::login(user_id, password, oem_id), None)
            .await
    }

    /// `legacy_id_mapping` for exactly one controller serial.
    pub async fn legacy_id_mapping(
        &self,
        serial: &str,
        session: &AuthToken,
    ) -> Result<Envelope, Error> {
        self.send(&CloudRequest::legacy_id_mapping(&[serial]), Some(session))
            .await
    }

    /// `controller_raw_command` addressed to `controller_uuid`.
    pub async fn controller_raw_command(
        &self,
        controller_uuid: &str,
        command: &RawCommand,
        session: &AuthToken,
    ) -> Result<Envelope, Error> {
        self.send(
            &CloudRequest::raw_command(controller_uuid, command),
            Some(session),
        )
        .await
    }

    // ── Request helper ───────────────────────────────────────────────

    /// POST a request body and decode the envelope.
    pub async fn send(
        &self,
        request: &CloudRequest,
        session: Option<&AuthToken>,
    ) -> Result<Envelope, Error> {
        debug!(call = request.call(), "POST {}", self.endpoint);

        let mut builder = self.http.post(self.endpoint.clone()).json(request);
        if let Some(session) = session {
            builder = builder.bearer_auth(session.bearer());
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| Error::Transport(e.without_url()))?;

        let status = resp.status();
        if !status.is_success() {
            debug!(call = request.call(), %status, "request rejected at HTTP level");
            return Err(Error::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = resp
            .text()
            .await
            .map_err(|e| Error::Transport(e.without_url()))?;

        Ok(Envelope::from_body(&body))
    }
}
