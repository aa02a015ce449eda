//! Exchange client configuration.
//!
//! DESIGN
//! ======
//! The endpoint is fixed at build time; credentials are attached after mount
//! once the URL fragment has been read. The whole value is constructed by the
//! root component and handed down through context.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::util::credentials::Credentials;

/// Endpoint used when `CHATBOT_ENDPOINT` is not set at compile time.
pub const DEFAULT_ENDPOINT: &str = "/dev/chatbot";

/// Where and how the widget sends exchanges.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoint: String,
    pub credentials: Option<Credentials>,
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into(), credentials: None }
    }

    /// Config from the compile-time `CHATBOT_ENDPOINT` variable.
    pub fn from_build_env() -> Self {
        Self::new(resolve_endpoint(option_env!("CHATBOT_ENDPOINT")))
    }

    #[must_use]
    pub fn with_credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.credentials = credentials;
        self
    }

    /// `Authorization` header value, if credentials are present.
    pub fn authorization(&self) -> Option<&str> {
        self.credentials.as_ref().map(Credentials::authorization)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_build_env()
    }
}

fn resolve_endpoint(raw: Option<&str>) -> String {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_ENDPOINT)
        .to_owned()
}
