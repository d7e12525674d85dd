use std::time::Duration;

use reqwest::{StatusCode, Url};
use tracing::debug;

use crate::DEFAULT_API_URL;
use crate::digest::DigestPrefix;
use crate::error::Error;
use crate::range::{CandidateSet, parse_range_body};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// The service rejects requests without a user agent.
pub const USER_AGENT: &str = concat!("hibp-range/", env!("CARGO_PKG_VERSION"));

/// Anything that can answer a range query for a digest prefix.
///
/// [`RangeClient`] talks to the real service; tests substitute in-memory fakes.
pub trait RangeQuery {
    fn query(
        &self,
        prefix: &DigestPrefix,
    ) -> impl Future<Output = Result<CandidateSet, Error>> + Send;
}

/// Settings for [`RangeClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL; `/range/{prefix}` is appended to it.
    pub api_url: String,
    pub timeout: Duration,
    /// Ask the service to pad responses with zero-count decoys so the response
    /// size does not reveal how many suffixes share the prefix.
    pub padding: bool,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            padding: false,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

/// HTTP client for the `GET /range/{prefix}` endpoint.
///
/// Issues exactly one request per query: no retries and no caching. Cloning is
/// cheap and shares the connection pool.
#[derive(Debug, Clone)]
pub struct RangeClient {
    client: reqwest::Client,
    base_url: String,
    padding: bool,
}

impl RangeClient {
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        let url = Url::parse(&config.api_url)
            .map_err(|e| Error::Configuration(format!("invalid API URL '{}': {e}", config.api_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Configuration(format!(
                "API URL '{}' must use http or https",
                config.api_url
            )));
        }

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Configuration(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            padding: config.padding,
        })
    }
}

impl RangeQuery for RangeClient {
    async fn query(&self, prefix: &DigestPrefix) -> Result<CandidateSet, Error> {
        let url = format!("{}/range/{}", self.base_url, prefix);
        debug!(%prefix, padding = self.padding, "querying range");

        let mut request = self.client.get(&url);
        if self.padding {
            request = request.header("Add-Padding", "true");
        }

        let response = request
            .send()
            .await
            .map_err(|source| Error::HttpRequest { prefix: prefix.to_string(), source })?;

        if response.status() != StatusCode::OK {
            return Err(Error::HttpStatus {
                prefix: prefix.to_string(),
                status: response.status().as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| Error::HttpRequest { prefix: prefix.to_string(), source })?;
        let body = std::str::from_utf8(&body).map_err(|e| Error::Protocol {
            prefix: prefix.to_string(),
            reason: format!("response body is not UTF-8: {e}"),
        })?;

        let candidates = parse_range_body(prefix, body)?;
        debug!(%prefix, candidates = candidates.len(), "range received");
        Ok(candidates)
    }
}
