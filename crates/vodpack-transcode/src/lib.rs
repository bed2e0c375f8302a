//! Vodpack Transcode Library
//!
//! The HLS packaging pipeline: the fixed variant ladder and its rendering
//! into an ffmpeg invocation, the publisher that uploads the produced
//! package, the Drive-link fetcher, and the orchestration tying them
//! together.

pub mod fetch;
pub mod ffmpeg;
pub mod pipeline;
pub mod publisher;
pub mod variants;

// Re-export commonly used types
pub use fetch::{extract_file_id, read_share_link, FetchError, Fetcher};
pub use ffmpeg::{HlsTranscoder, TranscodeError};
pub use pipeline::run_conversion;
pub use publisher::{content_type_for_path, PublishReport, Publisher};
pub use variants::{render_args, Variant, LADDER};
