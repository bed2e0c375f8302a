//! Conversion pipeline: resolve the source, derive the output name,
//! transcode, publish.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use vodpack_core::{format_output_name, resolve_single_source, Config};
use vodpack_storage::Storage;

use crate::ffmpeg::HlsTranscoder;
use crate::publisher::Publisher;

/// Run the full conversion for the single source file in `source_dir`:
/// resolve → derive output name → transcode → publish, strictly
/// sequential. Any step failing aborts the run.
pub async fn run_conversion(
    config: &Config,
    storage: Arc<dyn Storage>,
    source_dir: &Path,
) -> Result<()> {
    let source = resolve_single_source(source_dir, &config.source_extension)?;
    tracing::info!(source = %source.display(), "Resolved source file");

    let original_name = source
        .file_name()
        .and_then(|n| n.to_str())
        .context("Source filename is not valid UTF-8")?;
    let output_name = format_output_name(original_name);
    tracing::info!(output = %output_name, "Derived output name");

    let output_dir = source_dir.join(&output_name);
    tokio::fs::create_dir_all(&output_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to create output directory {}",
                output_dir.display()
            )
        })?;

    let transcoder = HlsTranscoder::new(config.ffmpeg_path.clone(), config.hls_segment_duration)?;
    transcoder
        .run(&source, &output_dir)
        .await
        .context("HLS transcode failed")?;

    // Publishing follows a successful transcode immediately, same output
    // directory.
    let publisher = Publisher::new(storage);
    let report = publisher
        .publish_dir(&output_dir)
        .await
        .context("Publishing HLS output failed")?;

    tracing::info!(uploaded = report.uploaded, "Conversion pipeline complete");
    Ok(())
}
