//! Utility modules shared across the crate.
//!
//! - [`HttpClient`]: reqwest client with the crate's user agent and timeouts

mod http;

pub use http::{HttpClient, DEFAULT_USER_AGENT};
