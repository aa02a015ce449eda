//! Shared wire schema for the chatbot exchange.
//!
//! This crate owns the JSON shapes used by both `chat-widget` and
//! `chat-server`: the request envelope the widget posts, the reply body the
//! endpoint answers with, and the error body returned on failure.

use serde::{Deserialize, Serialize};

/// Message type tag carried by every outbound envelope entry.
pub const MESSAGE_TYPE: &str = "type_a";

/// Code and message returned by the endpoint when an exchange fails.
pub const ERROR_CODE: &str = "500";
pub const ERROR_MESSAGE: &str = "Oops, an error";

/// Error returned when a body does not match the expected wire shape.
#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    /// The body is not valid JSON or is missing a required field.
    #[error("malformed body: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The envelope parsed but carried no messages.
    #[error("envelope has no messages")]
    Empty,
}

/// Request body posted by the widget on every submit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub messages: Vec<EnvelopeMessage>,
}

/// One typed entry of an [`Envelope`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeMessage {
    /// Message type tag, serialized as `type`.
    #[serde(rename = "type")]
    pub kind: String,
    pub unstructured: Unstructured,
}

/// Free-text payload of an envelope entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Unstructured {
    /// Correlation identifier for the exchange.
    pub id: String,
    pub text: String,
    /// Milliseconds since the Unix epoch when the entry was created.
    pub timestamp: i64,
}

impl Envelope {
    /// Build the single-entry envelope the widget sends.
    #[must_use]
    pub fn single(id: impl Into<String>, text: impl Into<String>, timestamp: i64) -> Self {
        Self {
            messages: vec![EnvelopeMessage {
                kind: MESSAGE_TYPE.to_owned(),
                unstructured: Unstructured { id: id.into(), text: text.into(), timestamp },
            }],
        }
    }

    /// Parse an envelope body and return its first entry.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::Malformed`] when the body does not match the
    /// envelope shape and [`EnvelopeError::Empty`] when `messages` is empty.
    pub fn parse_first(body: &str) -> Result<EnvelopeMessage, EnvelopeError> {
        let envelope: Envelope = serde_json::from_str(body)?;
        envelope.messages.into_iter().next().ok_or(EnvelopeError::Empty)
    }
}

/// Successful reply body: the answering entry nested under `data`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReplyBody {
    pub data: EnvelopeMessage,
}

impl ReplyBody {
    #[must_use]
    pub fn new(kind: impl Into<String>, id: impl Into<String>, text: impl Into<String>, timestamp: i64) -> Self {
        Self {
            data: EnvelopeMessage {
                kind: kind.into(),
                unstructured: Unstructured { id: id.into(), text: text.into(), timestamp },
            },
        }
    }
}

/// Failure body returned by the endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl Default for ErrorBody {
    fn default() -> Self {
        Self { code: ERROR_CODE.to_owned(), message: ERROR_MESSAGE.to_owned() }
    }
}

#[derive(Deserialize)]
struct ReplyTextBody {
    data: ReplyTextData,
}

#[derive(Deserialize)]
struct ReplyTextData {
    unstructured: ReplyText,
}

#[derive(Deserialize)]
struct ReplyText {
    text: String,
}

/// Extract `data.unstructured.text` from a reply body.
///
/// Only that path is required; every other field is ignored.
///
/// # Errors
///
/// Returns [`EnvelopeError::Malformed`] if the body is not JSON or the text
/// path is missing or not a string.
pub fn reply_text(body: &str) -> Result<String, EnvelopeError> {
    let reply: ReplyTextBody = serde_json::from_str(body)?;
    Ok(reply.data.unstructured.text)
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
