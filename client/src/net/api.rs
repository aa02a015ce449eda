//! Browser transport for the exchange client.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): no transport is compiled; exchanges only start from
//! browser event handlers.
//!
//! ERROR HANDLING
//! ==============
//! Every `gloo-net` failure is mapped to `ExchangeError::Network` so callers
//! see one error type regardless of where the request broke.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

#[cfg(feature = "hydrate")]
use super::exchange::{ExchangeError, OutboundRequest, RawReply, Transport};

/// Header carrying the identity token.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

#[cfg(any(test, feature = "hydrate"))]
fn network_failed_message(stage: &str, detail: &str) -> String {
    format!("{stage} failed: {detail}")
}

/// `fetch`-backed transport used in the browser.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTransport;

#[cfg(feature = "hydrate")]
impl Transport for GlooTransport {
    async fn post(&self, request: OutboundRequest<'_>) -> Result<RawReply, ExchangeError> {
        let mut builder = gloo_net::http::Request::post(request.endpoint);
        if let Some(token) = request.authorization {
            builder = builder.header(AUTHORIZATION_HEADER, token);
        }
        let resp = builder
            .json(request.envelope)
            .map_err(|e| ExchangeError::Network(network_failed_message("encode", &e.to_string())))?
            .send()
            .await
            .map_err(|e| ExchangeError::Network(network_failed_message("send", &e.to_string())))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ExchangeError::Network(network_failed_message("read body", &e.to_string())))?;
        Ok(RawReply { status, body })
    }
}

/// Exchange client wired to the browser transport.
#[cfg(feature = "hydrate")]
pub type BrowserExchangeClient = super::exchange::ExchangeClient<GlooTransport>;
