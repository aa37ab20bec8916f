//! Slash-command webhook surface for serialbot.
//!
//! The router decodes chat-platform slash commands, runs them through
//! `serialbot_core::Pipeline`, and answers with a reply the platform
//! renders in place.

pub mod extract;
pub mod reply;
pub mod routes;
pub mod server;

pub use reply::{ResponseType, SlackReply};
pub use server::AppState;
