//! Chat client library for an AI backend exposing `/ask` and `/history`
//! (config, HTTP client, session state, text rendering).
//! Used by the `ai-chat` CLI.

pub mod client;
pub mod config;
pub mod error;
pub mod messages;
pub mod render;
pub mod session;
pub mod state;

pub use client::{Backend, Client};
pub use config::{default_config_path, BackendSection, Config, Endpoints};
pub use error::{ClientError, ConfigError};
pub use messages::{Exchange, ExchangeId};
pub use session::ChatSession;
pub use state::{Effect, Event, SessionState};
