//! Server configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_UPSTREAM_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_YELP_SEARCH_URL: &str = "https://api.yelp.com/v3/businesses/search";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `PORT` is set but is not a valid port number.
    #[error("invalid PORT: {0}")]
    InvalidPort(String),
}

/// Upstream bot runtime the relay responder forwards to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    pub url: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

/// Restaurant search used by the dining responder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiningConfig {
    pub api_key: String,
    pub search_url: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Takes precedence over `dining` when both are set.
    pub upstream: Option<UpstreamConfig>,
    /// `None` (and no upstream) selects the echo responder.
    pub dining: Option<DiningConfig>,
}

impl ServerConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `CHATBOT_UPSTREAM_URL`: relay target; echo responder when absent
    /// - `CHATBOT_UPSTREAM_TIMEOUT_SECS`: default 30
    /// - `CHATBOT_UPSTREAM_CONNECT_TIMEOUT_SECS`: default 10
    /// - `YELP_API_KEY`: enables the dining responder
    /// - `YELP_SEARCH_URL`: default Yelp business search endpoint
    /// - `YELP_TIMEOUT_SECS` / `YELP_CONNECT_TIMEOUT_SECS`: default 30 / 10
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPort`] if `PORT` does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPort`] if `PORT` does not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => DEFAULT_PORT,
        };

        let upstream = non_blank(&lookup, "CHATBOT_UPSTREAM_URL").map(|url| UpstreamConfig {
            url,
            request_timeout_secs: parse_u64(&lookup, "CHATBOT_UPSTREAM_TIMEOUT_SECS", DEFAULT_UPSTREAM_TIMEOUT_SECS),
            connect_timeout_secs: parse_u64(
                &lookup,
                "CHATBOT_UPSTREAM_CONNECT_TIMEOUT_SECS",
                DEFAULT_UPSTREAM_CONNECT_TIMEOUT_SECS,
            ),
        });

        let dining = non_blank(&lookup, "YELP_API_KEY").map(|api_key| DiningConfig {
            api_key,
            search_url: non_blank(&lookup, "YELP_SEARCH_URL").unwrap_or_else(|| DEFAULT_YELP_SEARCH_URL.to_owned()),
            request_timeout_secs: parse_u64(&lookup, "YELP_TIMEOUT_SECS", DEFAULT_UPSTREAM_TIMEOUT_SECS),
            connect_timeout_secs: parse_u64(&lookup, "YELP_CONNECT_TIMEOUT_SECS", DEFAULT_UPSTREAM_CONNECT_TIMEOUT_SECS),
        });

        Ok(Self { port, upstream, dining })
    }
}

fn parse_u64<F>(lookup: &F, key: &str, default: u64) -> u64
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

fn non_blank<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}
