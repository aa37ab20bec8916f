//! Slash-command request extractor.
//!
//! Chat platforms post `application/x-www-form-urlencoded`; test tools and
//! relays often send JSON. Both decode into the same `SlashCommand`.

use axum::extract::{Form, FromRequest, Request};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, async_trait};
use serde::Deserialize;
use tracing::warn;

use crate::reply::{GENERIC_ERROR, SlackReply};

/// Fields the handlers read from a slash-command post.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SlashCommand {
    #[serde(default)]
    pub channel_id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub thread_ts: Option<String>,
}

impl SlashCommand {
    /// Thread timestamp, with empty values treated as absent.
    pub fn thread(&self) -> Option<String> {
        self.thread_ts.clone().filter(|ts| !ts.is_empty())
    }
}

/// Body could not be decoded.
#[derive(Debug)]
pub struct BadCommand(String);

impl IntoResponse for BadCommand {
    fn into_response(self) -> Response {
        warn!(reason = %self.0, "rejected undecodable command body");
        (
            StatusCode::BAD_REQUEST,
            Json(SlackReply::ephemeral(GENERIC_ERROR)),
        )
            .into_response()
    }
}

#[async_trait]
impl<S> FromRequest<S> for SlashCommand
where
    S: Send + Sync,
{
    type Rejection = BadCommand;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));

        if is_json {
            Json::<Self>::from_request(req, state)
                .await
                .map(|Json(cmd)| cmd)
                .map_err(|e| BadCommand(e.body_text()))
        } else {
            Form::<Self>::from_request(req, state)
                .await
                .map(|Form(cmd)| cmd)
                .map_err(|e| BadCommand(e.body_text()))
        }
    }
}
