use thiserror::Error;

/// Top-level error type for the `serialbot-api` crate.
///
/// Only covers failures below the response envelope: the request never
/// produced a JSON body we could inspect. Envelope-level outcomes
/// (`status`/`complete` flags) are reported through [`crate::Rejection`].
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// The endpoint answered with a non-2xx status.
    #[error("Request failed with status code {status}")]
    HttpStatus { status: u16 },
}

impl Error {
    /// Returns `true` if the request timed out before a response arrived.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }

    /// One-line cause suitable for embedding in a user-facing message.
    ///
    /// reqwest hides the interesting part ("connection refused", "operation
    /// timed out") in the source chain, so the innermost source is appended.
    pub fn summary(&self) -> String {
        match self {
            Self::Transport(e) => {
                let mut root: &dyn std::error::Error = e;
                let mut nested = false;
                while let Some(next) = root.source() {
                    root = next;
                    nested = true;
                }
                if nested {
                    format!("{e} ({root})")
                } else {
                    e.to_string()
                }
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_summary_names_code() {
        let err = Error::HttpStatus { status: 502 };
        assert_eq!(err.summary(), "Request failed with status code 502");
        assert!(!err.is_timeout());
    }

    #[test]
    fn tls_summary_is_display() {
        let err = Error::Tls("bad pem".into());
        assert_eq!(err.summary(), "TLS error: bad pem");
    }
}
