//! HTTP routes.
//!
//! `POST /` answers with a dashboard link, `POST /snapshot` with the
//! firmware verdict. Pipeline failures are still `200` replies: the chat
//! platform shows the text to the user either way.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::info;

use crate::extract::SlashCommand;
use crate::reply::SlackReply;
use crate::server::AppState;

type AppStateArc = Arc<AppState>;

pub const HEALTH_TEXT: &str = "Slack bot is running ✅";

pub fn command_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/", get(health).post(device_lookup))
        .route("/snapshot", post(snapshot))
}

#[allow(clippy::unused_async)]
async fn health() -> &'static str {
    HEALTH_TEXT
}

#[allow(clippy::unused_async)]
async fn device_lookup(
    State(state): State<AppStateArc>,
    cmd: SlashCommand,
) -> Json<SlackReply> {
    info!(channel_id = %cmd.channel_id, "device lookup request");

    let reply = match state.pipeline.dashboard_link(&cmd.channel_id, &cmd.text) {
        Ok(message) => SlackReply::in_channel(message),
        Err(err) => SlackReply::ephemeral(err.user_message()),
    };
    Json(reply)
}

async fn snapshot(State(state): State<AppStateArc>, cmd: SlashCommand) -> Json<SlackReply> {
    info!(channel_id = %cmd.channel_id, "device status request");

    let thread = cmd.thread();
    let reply = match state.pipeline.check_device(&cmd.channel_id, &cmd.text).await {
        Ok(message) if thread.is_some() => SlackReply::in_channel(message),
        Ok(message) => SlackReply::ephemeral(message),
        Err(err) => SlackReply::ephemeral(err.user_message()),
    };
    Json(reply.in_thread(thread))
}
