//! HTTP message types exchanged with the backend (JSON bodies of /ask and /history).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Client → server: body of `POST /ask`.
#[derive(Debug, Clone, Serialize)]
pub struct AskRequest<'a> {
    pub text: &'a str,
}

impl<'a> AskRequest<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }
}

/// Server → client: body of a `POST /ask` response.
///
/// The backend answers either `{"answer": ...}` or `{"error": ...}`, the
/// latter even with a 200 status.
#[derive(Debug, Clone, Deserialize)]
pub struct AskReply {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl AskReply {
    pub fn into_answer(self) -> Result<String, ClientError> {
        match (self.error, self.answer) {
            (Some(error), _) => Err(ClientError::Server(error)),
            (None, Some(answer)) => Ok(answer),
            (None, None) => Err(ClientError::unknown(
                "reply carried neither an answer nor an error",
            )),
        }
    }
}

/// Error payloads the backend may attach to any response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    /// FastAPI-style `{"detail": "..."}`. Non-string details are ignored.
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Parse `body` leniently; anything that is not a JSON object yields an empty body.
    pub fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    pub fn message(&self) -> Option<&str> {
        self.error
            .as_deref()
            .or_else(|| self.detail.as_ref().and_then(|d| d.as_str()))
    }
}

/// Server-assigned exchange identifier. Integer or string on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExchangeId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ExchangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExchangeId::Number(n) => write!(f, "{}", n),
            ExchangeId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl FromStr for ExchangeId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(s.parse::<i64>()
            .map(ExchangeId::Number)
            .unwrap_or_else(|_| ExchangeId::Text(s.to_string())))
    }
}

impl From<i64> for ExchangeId {
    fn from(n: i64) -> Self {
        ExchangeId::Number(n)
    }
}

impl From<&str> for ExchangeId {
    fn from(s: &str) -> Self {
        ExchangeId::Text(s.to_string())
    }
}

/// One stored question/answer pair from `GET /history`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub id: ExchangeId,
    pub prompt: String,
    pub response: String,
}
