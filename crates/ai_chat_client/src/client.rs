//! HTTP client: POST a question to /ask, GET /history and /health.
//! All failures are mapped onto [`ClientError`] before leaving this module.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::config::Endpoints;
use crate::error::ClientError;
use crate::messages::{AskReply, AskRequest, ErrorBody, Exchange};

/// The two operations a chat session needs from its backend.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Submit a question and return the answer text.
    async fn ask(&self, text: &str) -> Result<String, ClientError>;

    /// Fetch every stored exchange in server order.
    async fn history(&self) -> Result<Vec<Exchange>, ClientError>;
}

/// reqwest-backed [`Backend`] bound to one set of endpoints.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    endpoints: Endpoints,
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            ClientError::Network(e.to_string())
        } else {
            ClientError::Unknown(e.to_string())
        }
    }
}

/// Reject responses that report an error, either through an `error` field
/// (any status) or through a non-2xx status.
fn check_reply(status: StatusCode, body: &str) -> Result<(), ClientError> {
    let err = ErrorBody::parse(body);
    if let Some(msg) = err.error {
        return Err(ClientError::Server(msg));
    }
    if !status.is_success() {
        let msg = err
            .message()
            .map(str::to_string)
            .unwrap_or_else(|| format!("backend responded with HTTP {}", status.as_u16()));
        return Err(ClientError::Server(msg));
    }
    Ok(())
}

fn decode<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, ClientError> {
    serde_json::from_str(body)
        .map_err(|e| ClientError::unknown(format!("malformed response body: {}", e)))
}

impl Client {
    /// Build a client. `timeout` bounds each request; `None` waits indefinitely.
    pub fn new(endpoints: Endpoints, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self { http, endpoints })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// GET the health endpoint; any 2xx counts as healthy.
    pub async fn health(&self) -> Result<(), ClientError> {
        let url = &self.endpoints.health_url;
        tracing::debug!(%url, "checking backend health");
        let response = self.http.get(url).send().await.map_err(|e| {
            tracing::debug!(error = %e, %url, "health check failed");
            ClientError::from(e)
        })?;
        let status = response.status();
        let body = response.text().await?;
        check_reply(status, &body)
    }
}

#[async_trait]
impl Backend for Client {
    async fn ask(&self, text: &str) -> Result<String, ClientError> {
        let url = &self.endpoints.ask_url;
        tracing::debug!(%url, chars = text.chars().count(), "submitting question");
        let response = self
            .http
            .post(url)
            .json(&AskRequest::new(text))
            .send()
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, %url, "ask request failed");
                ClientError::from(e)
            })?;
        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(status = status.as_u16(), "ask response received");

        check_reply(status, &body)?;
        decode::<AskReply>(&body)?.into_answer()
    }

    async fn history(&self) -> Result<Vec<Exchange>, ClientError> {
        let url = &self.endpoints.history_url;
        tracing::debug!(%url, "fetching history");
        let response = self.http.get(url).send().await.map_err(|e| {
            tracing::debug!(error = %e, %url, "history request failed");
            ClientError::from(e)
        })?;
        let status = response.status();
        let body = response.text().await?;

        check_reply(status, &body)?;
        let history: Vec<Exchange> = decode(&body)?;
        tracing::debug!(count = history.len(), "history received");
        Ok(history)
    }
}
