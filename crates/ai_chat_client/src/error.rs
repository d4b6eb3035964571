//! Error kinds produced by the HTTP layer and the config loader.

use thiserror::Error;

/// Failure of a backend request, classified independently of the HTTP library.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The backend answered and reported what went wrong.
    #[error("server error: {0}")]
    Server(String),

    /// The backend could not be reached (refused, unresolvable, timed out).
    #[error("network error: {0}")]
    Network(String),

    #[error("unknown error: {0}")]
    Unknown(String),
}

impl ClientError {
    pub fn server(msg: impl Into<String>) -> Self {
        Self::Server(msg.into())
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::Unknown(msg.into())
    }

    /// Message shown to the user in place of the answer.
    pub fn user_message(&self) -> String {
        match self {
            Self::Server(msg) => format!("❌ Error: {msg}"),
            Self::Network(_) => "❌ Cannot connect to the AI backend. Is it running?".to_string(),
            Self::Unknown(_) => "❌ Something went wrong. Please try again.".to_string(),
        }
    }
}

/// Config load/save error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
