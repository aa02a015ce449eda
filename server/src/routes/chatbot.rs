//! Chatbot endpoint: answers one envelope with one reply.

#[cfg(test)]
#[path = "chatbot_test.rs"]
mod chatbot_test;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use axum::response::{IntoResponse, Json, Response};
use envelope::{Envelope, ErrorBody, ReplyBody};
use sha2::{Digest, Sha256};

use crate::state::AppState;

/// Path the widget posts envelopes to by default.
pub const CHATBOT_PATH: &str = "/dev/chatbot";

#[allow(clippy::cast_possible_truncation)]
fn now_millis() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as i64)
}

/// Conversation key for requests without an identity token.
pub const ANONYMOUS_SESSION: &str = "anonymous";

/// Stable conversation key for the responder.
///
/// Correlation ids change with every message, so multi-turn dialogs key on
/// the caller's identity token instead. The token itself is never passed on.
pub fn session_key(headers: &HeaderMap) -> String {
    let Some(token) = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    else {
        return ANONYMOUS_SESSION.to_owned();
    };
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    let bytes = hasher.finalize();
    let hex = bytes.iter().take(16).map(|b| format!("{b:02x}")).collect::<String>();
    format!("user-{hex}")
}

fn error_response() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody::default())).into_response()
}

/// `POST /dev/chatbot`: reply to the first message of the envelope.
///
/// The body is read as text so malformed JSON gets the same error body as
/// every other failure.
pub async fn chatbot(State(state): State<AppState>, headers: HeaderMap, body: String) -> Response {
    let authenticated = headers.contains_key(AUTHORIZATION);
    let session = session_key(&headers);

    let message = match Envelope::parse_first(&body) {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!(error = %e, authenticated, "chatbot envelope rejected");
            return error_response();
        }
    };

    let correlation_id = message.unstructured.id;
    let text = message.unstructured.text;
    tracing::info!(
        %correlation_id,
        kind = %message.kind,
        authenticated,
        responder = state.responder.name(),
        "chatbot exchange"
    );

    match state.responder.respond(&session, &text).await {
        Ok(reply) => {
            let body = ReplyBody::new(message.kind, correlation_id, reply, now_millis());
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            tracing::warn!(%correlation_id, error = %e, "chatbot responder failed");
            error_response()
        }
    }
}
