//! Mock source for testing purposes.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::models::{Publication, SearchResponse};
use crate::sources::{Source, SourceError};

/// A mock source that replays scripted responses in call order.
///
/// Once the script runs out every lookup answers with an empty response.
/// Every identifier passed to [`Source::search`] is recorded.
#[derive(Debug, Default)]
pub struct MockSource {
    responses: Mutex<VecDeque<Result<SearchResponse, SourceError>>>,
    queries: Mutex<Vec<String>>,
}

impl MockSource {
    /// Create a new mock source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response.
    pub fn push_response(&self, response: SearchResponse) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    /// Queue a response with a single publication.
    pub fn push_found(&self, title: &str, comments_total: u64) {
        self.push_response(SearchResponse::new(vec![Publication::new(title, comments_total)]));
    }

    /// Queue a failure.
    pub fn push_error(&self, error: SourceError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Identifiers looked up so far, in call order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl Source for MockSource {
    fn id(&self) -> &str {
        "mock"
    }

    fn name(&self) -> &str {
        "Mock Source"
    }

    async fn search(&self, identifier: &str) -> Result<SearchResponse, SourceError> {
        self.queries.lock().unwrap().push(identifier.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(SearchResponse::empty()))
    }
}
