//! Exchange client: one request/response cycle per submitted message.
//!
//! DESIGN
//! ======
//! A submit is split in two. `begin` runs synchronously inside the event
//! handler: it validates the text, appends the User message and opens a
//! `Pending` exchange record. `complete` is the async half: it posts the
//! envelope through a [`Transport`], then appends the Bot reply or marks the
//! exchange `Failed`.
//!
//! ERROR HANDLING
//! ==============
//! Remote failures never escape `complete`. They are logged and recorded on
//! the exchange record; nothing is retried and no message is shown.

#[cfg(test)]
#[path = "exchange_test.rs"]
mod exchange_test;

use envelope::Envelope;

use crate::config::ClientConfig;
use crate::state::chat::{ExchangeId, ExchangeStatus, Sender, StoreHandle};
use crate::util::time::now_millis;

/// Local rejection of a submit; no side effects have happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("message is empty")]
    EmptyInput,
    #[error("message store is no longer available")]
    StoreUnavailable,
}

/// Remote failure of one exchange.
#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    /// The request never produced a response (DNS, CORS, offline, ...).
    #[error("request failed: {0}")]
    Network(String),
    /// The endpoint answered with a non-2xx status.
    #[error("endpoint responded with status {0}")]
    Status(u16),
    /// The body did not expose `data.unstructured.text`.
    #[error(transparent)]
    MalformedBody(#[from] envelope::EnvelopeError),
}

/// Everything a transport needs to send one envelope.
#[derive(Clone, Copy, Debug)]
pub struct OutboundRequest<'a> {
    pub endpoint: &'a str,
    pub authorization: Option<&'a str>,
    pub envelope: &'a Envelope,
}

/// Status and raw body of an endpoint response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawReply {
    pub status: u16,
    pub body: String,
}

/// Sends a single POST and returns the raw response.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn post(&self, request: OutboundRequest<'_>) -> Result<RawReply, ExchangeError>;
}

/// Turn a raw response into the bot reply text.
///
/// # Errors
///
/// Returns [`ExchangeError::Status`] for non-2xx responses and
/// [`ExchangeError::MalformedBody`] when the text path is missing.
pub fn parse_reply(reply: &RawReply) -> Result<String, ExchangeError> {
    if !(200..300).contains(&reply.status) {
        return Err(ExchangeError::Status(reply.status));
    }
    Ok(envelope::reply_text(&reply.body)?)
}

/// A submission whose User message is already in the store.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingExchange {
    pub id: ExchangeId,
    pub envelope: Envelope,
}

impl PendingExchange {
    pub fn correlation_id(&self) -> &str {
        self.envelope
            .messages
            .first()
            .map_or("", |m| m.unstructured.id.as_str())
    }
}

/// Validate `text`, append it as a User message and open a pending exchange.
///
/// The raw text is stored and sent as typed; only the emptiness check trims.
///
/// # Errors
///
/// Returns [`SubmitError::EmptyInput`] for empty or whitespace-only text, and
/// [`SubmitError::StoreUnavailable`] if the store has been disposed.
pub fn begin_exchange<S: StoreHandle>(store: &S, text: &str) -> Result<PendingExchange, SubmitError> {
    if text.trim().is_empty() {
        return Err(SubmitError::EmptyInput);
    }

    let correlation_id = uuid::Uuid::new_v4().to_string();
    let envelope = Envelope::single(correlation_id.clone(), text, now_millis());

    let id = store
        .update_store(|s| {
            let id = s.open_exchange(correlation_id);
            s.append_for(id, Sender::User, text);
            id
        })
        .ok_or(SubmitError::StoreUnavailable)?;

    Ok(PendingExchange { id, envelope })
}

/// Sends submissions to one configured endpoint.
pub struct ExchangeClient<T> {
    config: ClientConfig,
    transport: T,
}

impl<T: Transport> ExchangeClient<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Send a pending exchange and record its outcome in the store.
    pub async fn complete<S: StoreHandle>(&self, store: &S, pending: PendingExchange) -> ExchangeStatus {
        let request = OutboundRequest {
            endpoint: &self.config.endpoint,
            authorization: self.config.authorization(),
            envelope: &pending.envelope,
        };

        let outcome = match self.transport.post(request).await {
            Ok(reply) => parse_reply(&reply),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(text) => {
                store.update_store(|s| {
                    s.append_for(pending.id, Sender::Bot, text);
                    s.resolve_exchange(pending.id, Ok(()));
                });
                ExchangeStatus::Succeeded
            }
            Err(e) => {
                leptos::logging::warn!(
                    "chatbot exchange failed: correlation_id={} error={e}",
                    pending.correlation_id()
                );
                store.update_store(|s| s.resolve_exchange(pending.id, Err(e.to_string())));
                ExchangeStatus::Failed
            }
        }
    }

    /// Submit `text` and wait for the exchange to resolve.
    ///
    /// # Errors
    ///
    /// Only local rejections are errors; remote failures resolve to
    /// `Ok(ExchangeStatus::Failed)`.
    pub async fn submit<S: StoreHandle>(&self, store: &S, text: &str) -> Result<ExchangeStatus, SubmitError> {
        let pending = begin_exchange(store, text)?;
        Ok(self.complete(store, pending).await)
    }
}
