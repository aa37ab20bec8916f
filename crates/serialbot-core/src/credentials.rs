// ── Cloud login ──
//
// Exchanges the organization account for a bearer token. One fresh token
// per pipeline run; nothing is cached between requests.

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serialbot_api::payload::LoginData;
use serialbot_api::{AuthToken, CloudClient};
use tracing::{debug, warn};

use crate::config::CloudCredentials;
use crate::error::AuthError;
use crate::remote::remote;

/// Log in and return the session for this run.
///
/// Success needs the envelope success signal and a non-empty `token`.
/// A success envelope without a token is a malformed response, same as
/// any other unexpected shape.
pub async fn login(
    client: &CloudClient,
    credentials: &CloudCredentials,
) -> Result<AuthToken, AuthError> {
    let envelope = remote(
        client.login(
            &credentials.user_id,
            &credentials.password,
            &credentials.oem_id,
        ),
        AuthError::Transport,
    )
    .await?;

    let data = envelope.into_data().map_err(|rejection| {
        warn!(%rejection, "login rejected");
        AuthError::from(rejection)
    })?;

    let LoginData {
        token,
        legacy_token,
        expires,
    } = LoginData::from_data(&data);

    let Some(token) = token else {
        warn!("login succeeded without a token");
        return Err(AuthError::MalformedResponse);
    };

    let expires_at = expires.and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0));
    debug!(?expires_at, "login successful");

    Ok(AuthToken::new(
        SecretString::from(token),
        legacy_token.map(SecretString::from),
        expires_at,
    ))
}
