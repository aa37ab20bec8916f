//! Reply bodies returned to the chat platform.

use serde::{Deserialize, Serialize};

/// Generic apology for faults outside the pipeline's own error handling.
pub const GENERIC_ERROR: &str = "❌ An error occurred while processing your request.";

/// Who sees the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    /// Only the invoking user.
    Ephemeral,
    /// Everyone in the channel (or thread).
    InChannel,
}

/// `{response_type, text, thread_ts?}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackReply {
    pub response_type: ResponseType,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_ts: Option<String>,
}

impl SlackReply {
    pub fn ephemeral(text: impl Into<String>) -> Self {
        Self {
            response_type: ResponseType::Ephemeral,
            text: text.into(),
            thread_ts: None,
        }
    }

    pub fn in_channel(text: impl Into<String>) -> Self {
        Self {
            response_type: ResponseType::InChannel,
            text: text.into(),
            thread_ts: None,
        }
    }

    /// Post into the thread `thread_ts`, if any.
    pub fn in_thread(mut self, thread_ts: Option<String>) -> Self {
        self.thread_ts = thread_ts;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn thread_ts_omitted_when_absent() {
        let body = serde_json::to_value(SlackReply::ephemeral("hi")).unwrap();
        assert_eq!(body, json!({"response_type": "ephemeral", "text": "hi"}));
    }

    #[test]
    fn thread_reply_shape() {
        let reply = SlackReply::in_channel("ok").in_thread(Some("1700000000.000100".into()));
        let body = serde_json::to_value(reply).unwrap();
        assert_eq!(
            body,
            json!({"response_type": "in_channel", "text": "ok", "thread_ts": "1700000000.000100"})
        );
    }
}
