//! MVG disruption feed HTTP client.
//!
//! Issues a single GET against the public message feed and decodes the
//! response into raw messages. Filtering and enrichment happen in
//! [`super::enrich`]; cache coordination is the caller's job.

use std::time::Duration;

use super::enrich::enrich_messages;
use super::error::MvgError;
use super::types::{Incident, RawMessage};
use super::IncidentSource;

/// Default URL of the MVG message feed.
const DEFAULT_FEED_URL: &str = "https://www.mvg.de/api/bgw-pt/v3/messages";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the feed client.
#[derive(Debug, Clone)]
pub struct MvgConfig {
    /// Feed URL (defaults to the production MVG endpoint).
    pub feed_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl MvgConfig {
    /// Create a config with production defaults.
    pub fn new() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom feed URL (for testing).
    pub fn with_feed_url(mut self, url: impl Into<String>) -> Self {
        self.feed_url = url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for MvgConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP client for the MVG message feed.
///
/// The feed is public; no authentication or rate limiting applies.
#[derive(Debug, Clone)]
pub struct MvgClient {
    http: reqwest::Client,
    feed_url: String,
}

impl MvgClient {
    /// Create a new feed client with the given configuration.
    pub fn new(config: MvgConfig) -> Result<Self, MvgError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            feed_url: config.feed_url,
        })
    }

    /// Fetch the raw message list from the feed.
    ///
    /// Fails with `UpstreamStatus` on a non-2xx response and with
    /// `UpstreamFormat` if the body is not a JSON list of messages.
    pub async fn fetch_messages(&self) -> Result<Vec<RawMessage>, MvgError> {
        let response = self.http.get(&self.feed_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MvgError::UpstreamStatus {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| MvgError::UpstreamFormat {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

impl IncidentSource for MvgClient {
    async fn fetch_incidents(&self) -> Result<Vec<Incident>, MvgError> {
        let messages = self.fetch_messages().await?;
        let incidents = enrich_messages(messages);
        tracing::debug!(count = incidents.len(), "fetched incidents from MVG feed");
        Ok(incidents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = MvgConfig::new();
        assert_eq!(config.feed_url, DEFAULT_FEED_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_builder() {
        let config = MvgConfig::new()
            .with_feed_url("http://localhost:8080/messages")
            .with_timeout(5);

        assert_eq!(config.feed_url, "http://localhost:8080/messages");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn client_creation() {
        let client = MvgClient::new(MvgConfig::new());
        assert!(client.is_ok());
    }

    // Tests against the live feed would make real HTTP requests; cache and
    // enrichment behavior is covered with `MockFeed` instead.
}
