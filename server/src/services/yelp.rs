//! Restaurant search against the Yelp Fusion business search API.
//!
//! ERROR HANDLING
//! ==============
//! Transport, status and decode failures map onto [`ResponderError`] so the
//! chatbot route reports them like any other responder failure.

#[cfg(test)]
#[path = "yelp_test.rs"]
mod yelp_test;

use std::time::Duration;

use serde::Deserialize;

use super::responder::ResponderError;
use crate::config::DiningConfig;

pub const NO_RESULTS: &str = "Sorry, we do not find any restaurant meeting your requirements.";

/// Parameters of one business search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchQuery {
    pub location: String,
    /// Cuisine or free-text search term.
    pub term: String,
    /// Unix seconds the restaurant must be open at.
    pub open_at: i64,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct SearchResults {
    #[serde(default)]
    pub businesses: Vec<Business>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Business {
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub location: BusinessLocation,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct BusinessLocation {
    pub address1: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

/// Finds restaurants for a completed dining request.
#[async_trait::async_trait]
pub trait RestaurantSearch: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResults, ResponderError>;
}

/// Reply text for a search: the first business, or an apology.
pub fn describe_results(results: &SearchResults) -> String {
    let Some(first) = results.businesses.first() else {
        return NO_RESULTS.to_owned();
    };
    let addr = &first.location;
    let address = format!(
        "{}, {}, {}",
        addr.address1.as_deref().unwrap_or_default(),
        addr.city.as_deref().unwrap_or_default(),
        addr.state.as_deref().unwrap_or_default(),
    );
    format!(
        "We recommend {}. The address is {address}. You can view details at {}",
        first.name, first.url
    )
}

pub(crate) fn parse_search_results(body: &str) -> Result<SearchResults, ResponderError> {
    serde_json::from_str(body).map_err(|e| ResponderError::Parse(e.to_string()))
}

/// HTTP client for the business search endpoint.
pub struct YelpSearch {
    http: reqwest::Client,
    api_key: String,
    search_url: String,
}

impl YelpSearch {
    /// # Errors
    ///
    /// Returns [`ResponderError::HttpClientBuild`] if the HTTP client fails to build.
    pub fn new(config: &DiningConfig) -> Result<Self, ResponderError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| ResponderError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            search_url: config.search_url.clone(),
        })
    }

    pub fn search_url(&self) -> &str {
        &self.search_url
    }
}

#[async_trait::async_trait]
impl RestaurantSearch for YelpSearch {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResults, ResponderError> {
        let open_at = query.open_at.to_string();
        let resp = self
            .http
            .get(&self.search_url)
            .bearer_auth(&self.api_key)
            .query(&[
                ("location", query.location.as_str()),
                ("term", query.term.as_str()),
                ("open_at", open_at.as_str()),
            ])
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
        parse_search_results(&body)
    }
}
