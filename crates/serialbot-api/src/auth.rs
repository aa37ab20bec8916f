use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};

/// Bearer session returned by `login_with_id_and_password`.
///
/// Lives for exactly one pipeline run: it is never cached, refreshed,
/// or shared between requests, so `expires_at` is informational only.
#[derive(Debug, Clone)]
pub struct AuthToken {
    token: SecretString,
    legacy_token: Option<SecretString>,
    expires_at: Option<DateTime<Utc>>,
}

impl AuthToken {
    pub fn new(
        token: SecretString,
        legacy_token: Option<SecretString>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            token,
            legacy_token,
            expires_at,
        }
    }

    /// Value for the `Authorization: Bearer` header.
    pub(crate) fn bearer(&self) -> &str {
        self.token.expose_secret()
    }

    /// Token for endpoints that predate bearer auth. Not used by any
    /// call this crate makes, but returned by login alongside the bearer.
    pub fn legacy_token(&self) -> Option<&SecretString> {
        self.legacy_token.as_ref()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }
}
