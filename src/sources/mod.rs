//! Research-integrity sources queried per identifier.
//!
//! The [`Source`] trait is the seam between the batch checker and the
//! external API. [`PubPeerSource`] talks to the real PubPeer search endpoint;
//! [`MockSource`] replays scripted responses for tests.

mod pubpeer;

pub mod mock;

pub use mock::MockSource;
pub use pubpeer::{PubPeerSource, PUBPEER_SEARCH_ENDPOINT};

use crate::models::SearchResponse;
use async_trait::async_trait;

/// A service that can be searched by DOI for public commentary.
#[async_trait]
pub trait Source: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this source (e.g. "pubpeer")
    fn id(&self) -> &str;

    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Look up one identifier. The identifier is sent as-is.
    ///
    /// An empty publication list is a successful answer; only transport,
    /// status and decode failures are errors.
    async fn search(&self, identifier: &str) -> Result<SearchResponse, SourceError>;
}

/// Errors that can occur when interacting with a source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(String),

    /// Parsing error (malformed or unexpected JSON)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Non-success status from the source
    #[error("API error: {0}")]
    Api(String),

    /// Other error
    #[error("Error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(format!("JSON: {}", err))
    }
}
