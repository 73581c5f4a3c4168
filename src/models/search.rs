//! Search response models for the PubPeer search API.
//!
//! Only the fields the report consumes are modeled. The API returns a lot
//! more per publication (authors, journals, updates, timestamps); serde
//! ignores unknown fields, so those are simply skipped during decoding.

use serde::{Deserialize, Deserializer, Serialize};

/// Decoded body of `GET /api/search/?q=<identifier>`
///
/// `publications` is required: a body without it fails to decode and the
/// identifier is reported as an error. An empty array is a valid answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Matched publication records, best match first
    pub publications: Vec<Publication>,

    /// Result metadata
    #[serde(default)]
    pub meta: SearchMeta,
}

impl SearchResponse {
    /// Create a response from a list of publications
    pub fn new(publications: Vec<Publication>) -> Self {
        let total = publications.len();
        Self {
            publications,
            meta: SearchMeta { total },
        }
    }

    /// An empty response (no matching publications)
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// The best-matching publication, if any
    pub fn first(&self) -> Option<&Publication> {
        self.publications.first()
    }

    /// Whether the search matched anything
    pub fn is_empty(&self) -> bool {
        self.publications.is_empty()
    }
}

/// One publication record with its public-commentary metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    /// Publication title as recorded by PubPeer
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    /// Number of public comments recorded against the publication
    #[serde(default, deserialize_with = "null_as_default")]
    pub comments_total: u64,
}

impl Publication {
    pub fn new(title: impl Into<String>, comments_total: u64) -> Self {
        Self {
            title: title.into(),
            comments_total,
        }
    }
}

/// Treat an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Result metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchMeta {
    /// Total number of matches reported by the API
    #[serde(default)]
    pub total: usize,
}
