//! # PubPeer Check
//!
//! Batch-checks lists of DOIs against the PubPeer search API and writes a
//! result report next to every input file.
//!
//! ## Architecture
//!
//! - [`checker`]: file discovery, the per-file driver and the report writer
//! - [`sources`]: the [`Source`] trait and the PubPeer client
//! - [`models`]: API response shapes and report lines
//! - [`app`]: the interactive menu
//! - [`config`]: configuration management
//! - [`ui`]: terminal output helpers
//! - [`utils`]: HTTP client

pub mod app;
pub mod checker;
pub mod config;
pub mod models;
pub mod sources;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use checker::{CheckError, Checker, RunSummary};
pub use models::ResultLine;
pub use sources::{PubPeerSource, Source, SourceError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
