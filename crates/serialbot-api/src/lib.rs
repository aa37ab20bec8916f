// serialbot-api: Async Rust client for the cloud device-management request API

pub mod auth;
pub mod client;
pub mod envelope;
pub mod error;
pub mod payload;
pub mod request;
pub mod transport;

pub use auth::AuthToken;
pub use client::CloudClient;
pub use envelope::{Envelope, Rejection};
pub use error::Error;
pub use request::{CloudRequest, RawCommand};
pub use transport::{TlsMode, TransportConfig};
