//! Vodpack Storage Library
//!
//! This crate provides the storage abstraction used to publish HLS output.
//! It includes the Storage trait and implementations for S3 and local
//! filesystem.
//!
//! # Storage key format
//!
//! Keys are `/`-separated paths under the bucket root, one per published
//! file: `<output-dir-name>/<relative-path>`, e.g.
//! `My-Movie-596ba59a77299059f343e6a2816c55df/master.m3u8`. Keys must not
//! contain `..` or a leading `/`.

pub mod factory;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
