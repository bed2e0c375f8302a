//! Publisher: upload every file of an HLS output directory to storage.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use walkdir::WalkDir;

use vodpack_storage::Storage;

/// Determine content type from file extension.
pub fn content_type_for_path(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("m3u8") => "application/vnd.apple.mpegurl",
        Some("ts") => "video/mp2t",
        _ => "application/octet-stream",
    }
}

/// Summary of a publish run.
#[derive(Debug, Default)]
pub struct PublishReport {
    pub uploaded: usize,
}

/// Uploads a produced HLS package, one object per local file.
///
/// Fail-fast by contract: the first upload error aborts the run. Files
/// already uploaded are not rolled back, and no partial-success
/// continuation is attempted.
pub struct Publisher {
    storage: Arc<dyn Storage>,
}

impl Publisher {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Upload every file under `output_dir`, depth-unbounded, one at a
    /// time in sorted walk order.
    ///
    /// The remote key is the output directory's name followed by the
    /// file's path relative to it, joined with `/` — the directory name
    /// appears exactly once in the key.
    pub async fn publish_dir(&self, output_dir: &Path) -> Result<PublishReport> {
        let dir_name = output_dir
            .file_name()
            .and_then(|n| n.to_str())
            .context("Output directory has no valid UTF-8 name")?;

        tracing::info!(dir = %output_dir.display(), "Uploading HLS files to storage");

        let mut report = PublishReport::default();
        for entry in WalkDir::new(output_dir).sort_by_file_name() {
            let entry =
                entry.with_context(|| format!("Failed to walk {}", output_dir.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();

            let relative = path
                .strip_prefix(output_dir)
                .context("Walked file outside the output directory")?;
            let relative_key = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            let key = format!("{}/{}", dir_name, relative_key);

            let content_type = content_type_for_path(path);
            let data = tokio::fs::read(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;

            self.storage
                .upload(&key, data, content_type)
                .await
                .with_context(|| format!("Failed to upload {}", key))?;

            tracing::info!(key = %key, content_type = %content_type, "Uploaded");
            report.uploaded += 1;
        }

        tracing::info!(uploaded = report.uploaded, "HLS upload complete");
        Ok(report)
    }
}
