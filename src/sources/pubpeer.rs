//! PubPeer search source implementation.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::config::CheckerConfig;
use crate::models::SearchResponse;
use crate::sources::{Source, SourceError};
use crate::utils::{HttpClient, DEFAULT_USER_AGENT};

/// Public PubPeer search endpoint
pub const PUBPEER_SEARCH_ENDPOINT: &str = "https://pubpeer.com/api/search/";

/// PubPeer research source
///
/// Issues one `GET <endpoint>?q=<identifier>` per lookup. No retries: a failed
/// request is reported to the caller, which records it and moves on.
#[derive(Debug, Clone)]
pub struct PubPeerSource {
    client: Arc<HttpClient>,
    endpoint: String,
}

impl PubPeerSource {
    pub fn new() -> Result<Self, SourceError> {
        Self::with_endpoint(PUBPEER_SEARCH_ENDPOINT)
    }

    /// Point the source at a different search endpoint (mirrors, test servers)
    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self, SourceError> {
        Ok(Self {
            client: Arc::new(HttpClient::new()?),
            endpoint: endpoint.into(),
        })
    }

    /// Build the source from checker settings
    pub fn from_config(config: &CheckerConfig) -> Result<Self, SourceError> {
        let user_agent = config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        let client = HttpClient::with_options(user_agent, Duration::from_secs(config.timeout_secs))?;
        Ok(Self {
            client: Arc::new(client),
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Source for PubPeerSource {
    fn id(&self) -> &str {
        "pubpeer"
    }

    fn name(&self) -> &str {
        "PubPeer"
    }

    async fn search(&self, identifier: &str) -> Result<SearchResponse, SourceError> {
        tracing::debug!(identifier, endpoint = %self.endpoint, "querying PubPeer");

        let response = self
            .client
            .client()
            .get(&self.endpoint)
            .query(&[("q", identifier)])
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to query PubPeer: {}", e)))?;

        if !response.status().is_success() {
            return Err(SourceError::Api(format!(
                "PubPeer API returned status: {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to read response body: {}", e)))?;

        let data: SearchResponse = serde_json::from_str(&body)?;

        tracing::debug!(
            identifier,
            publications = data.publications.len(),
            total = data.meta.total,
            "PubPeer answered"
        );

        Ok(data)
    }
}
