//! Core data models for PubPeer lookups and result reports.

mod result;
mod search;

pub use result::{
    display_identifier, ResultLine, FIELD_SEPARATOR, FOUND_MARKER, NOT_FOUND_MARKER,
};
pub use search::{Publication, SearchMeta, SearchResponse};
