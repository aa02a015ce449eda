//! Bot responders: turn one user utterance into one reply.
//!
//! DESIGN
//! ======
//! The chatbot route only needs "text in, text out". `EchoResponder` keeps
//! local development self-contained; `RelayResponder` forwards the text to an
//! upstream bot runtime that speaks `{ userId, inputText } -> { message }`.
//! The dining dialog lives in [`super::dining`].

#[cfg(test)]
#[path = "responder_test.rs"]
mod responder_test;

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::dining::DiningResponder;
use super::yelp::YelpSearch;
use crate::config::{ServerConfig, UpstreamConfig};

/// Errors produced while computing a reply.
#[derive(Debug, thiserror::Error)]
pub enum ResponderError {
    /// The HTTP request to the upstream runtime failed.
    #[error("upstream request failed: {0}")]
    Request(String),

    /// The upstream runtime returned a non-success HTTP status.
    #[error("upstream response error: status {status}")]
    Status { status: u16 },

    /// The upstream response body could not be deserialized.
    #[error("upstream response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

/// Produces the bot reply for one exchange.
#[async_trait::async_trait]
pub trait Responder: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &'static str;

    /// Reply to `text` sent within conversation `user_id`.
    async fn respond(&self, user_id: &str, text: &str) -> Result<String, ResponderError>;
}

// =============================================================================
// ECHO
// =============================================================================

/// Replies with the text it received.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoResponder;

#[async_trait::async_trait]
impl Responder for EchoResponder {
    fn name(&self) -> &'static str {
        "echo"
    }

    async fn respond(&self, _user_id: &str, text: &str) -> Result<String, ResponderError> {
        Ok(text.to_owned())
    }
}

// =============================================================================
// RELAY
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RelayRequest<'a> {
    pub user_id: &'a str,
    pub input_text: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RelayReply {
    pub message: String,
}

/// Forwards each utterance to an upstream bot runtime over HTTP.
pub struct RelayResponder {
    http: reqwest::Client,
    url: String,
}

impl RelayResponder {
    /// Build a relay with request/connect timeouts from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ResponderError::HttpClientBuild`] if the HTTP client fails to build.
    pub fn new(config: &UpstreamConfig) -> Result<Self, ResponderError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| ResponderError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, url: config.url.clone() })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

pub(crate) fn parse_relay_reply(body: &str) -> Result<String, ResponderError> {
    serde_json::from_str::<RelayReply>(body)
        .map(|reply| reply.message)
        .map_err(|e| ResponderError::Parse(e.to_string()))
}

#[async_trait::async_trait]
impl Responder for RelayResponder {
    fn name(&self) -> &'static str {
        "relay"
    }

    async fn respond(&self, user_id: &str, text: &str) -> Result<String, ResponderError> {
        let resp = self
            .http
            .post(&self.url)
            .json(&RelayRequest { user_id, input_text: text })
            .send()
            .await
            .map_err(|e| ResponderError::Request(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ResponderError::Status { status: status.as_u16() });
        }

        let body = resp
            .text()
            .await
            .map_err(|e| ResponderError::Request(e.to_string()))?;
        parse_relay_reply(&body)
    }
}

// =============================================================================
// SELECTION
// =============================================================================

/// Pick the responder: relay when an upstream is set, else dining when a
/// search key is set, else echo.
///
/// A responder that cannot be built falls through to the next choice with a
/// warning.
pub fn from_config(config: &ServerConfig) -> Arc<dyn Responder> {
    if let Some(upstream) = config.upstream.as_ref() {
        match RelayResponder::new(upstream) {
            Ok(relay) => {
                tracing::info!(url = relay.url(), "relay responder configured");
                return Arc::new(relay);
            }
            Err(e) => tracing::warn!(error = %e, "relay responder unavailable"),
        }
    }

    if let Some(dining) = config.dining.as_ref() {
        match YelpSearch::new(dining) {
            Ok(search) => {
                tracing::info!(url = search.search_url(), "dining responder configured");
                return Arc::new(DiningResponder::new(search));
            }
            Err(e) => tracing::warn!(error = %e, "dining responder unavailable"),
        }
    }

    Arc::new(EchoResponder)
}
