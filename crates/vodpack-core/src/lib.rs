//! Vodpack Core Library
//!
//! This crate provides configuration, output naming, and source-file
//! resolution shared across the vodpack crates.

pub mod config;
pub mod naming;
pub mod source;

// Re-export commonly used types
pub use config::{Config, StorageBackend};
pub use naming::format_output_name;
pub use source::{resolve_single_source, SourceError};
