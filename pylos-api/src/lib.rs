//! Play Pylos over HTTP.
//!
//! [`server`] keeps the authoritative game and enforces turns; [`client`]
//! joins a server and plays with the advisor from `pylos-advisor`.

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod server;
pub mod session;

pub use client::{Client, Turn};
pub use config::{AppConfig, ClientConfig, ServerConfig};
pub use error::{ClientError, ConfigError, SessionError};
pub use session::GameSession;
