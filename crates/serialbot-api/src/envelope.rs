// Response envelope shared by every call on the request endpoint.
//
// Each response looks like `{ "status": 1, "complete": 1, "data": {...} }`.
// Success is the pair of flags, never the HTTP status alone, so every
// call site decodes through `Envelope::into_data` to keep the check in
// one place.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Raw `{status, complete, data}` envelope.
///
/// Fields stay as `Value` because the API is loose about types: a bad
/// shape must surface as a rejected envelope, not a decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub status: Value,
    #[serde(default)]
    pub complete: Value,
    #[serde(default)]
    pub data: Value,
}

/// Why an envelope did not carry the success signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// `status == 0`: the server explicitly refused the call.
    Refused { complete: String },
    /// Any other non-success shape. Flags are rendered for diagnostics.
    Unexpected { status: String, complete: String },
}

impl Envelope {
    /// Decode a response body. Anything that is not a JSON object
    /// becomes an empty envelope, which then fails the success check.
    pub fn from_body(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_else(|e| {
            debug!(error = %e, "response body is not an envelope");
            Self::default()
        })
    }

    /// `status == 1 && complete == 1`.
    pub fn is_success(&self) -> bool {
        flag_is(&self.status, 1.0) && flag_is(&self.complete, 1.0)
    }

    /// `status == 0`, the server's explicit rejection signal.
    pub fn is_refused(&self) -> bool {
        flag_is(&self.status, 0.0)
    }

    /// Unwrap `data` on success, or classify the failure.
    pub fn into_data(self) -> Result<Value, Rejection> {
        if self.is_success() {
            Ok(self.data)
        } else if self.is_refused() {
            Err(Rejection::Refused {
                complete: render_flag(&self.complete),
            })
        } else {
            Err(Rejection::Unexpected {
                status: render_flag(&self.status),
                complete: render_flag(&self.complete),
            })
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Refused { complete } => write!(f, "status=0, complete={complete}"),
            Self::Unexpected { status, complete } => {
                write!(f, "status={status}, complete={complete}")
            }
        }
    }
}

fn flag_is(value: &Value, expected: f64) -> bool {
    value
        .as_f64()
        .is_some_and(|n| (n - expected).abs() < f64::EPSILON)
}

fn render_flag(value: &Value) -> String {
    match value {
        Value::Null => "undefined".into(),
        other => other.to_string(),
    }
}
