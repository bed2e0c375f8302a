//! HLS transcoder: drives the external ffmpeg process.

use std::path::Path;
use std::process::Stdio;

use thiserror::Error;
use tokio::process::Command;

use crate::variants::{render_args, Variant, LADDER};

#[derive(Debug, Error)]
pub enum TranscodeError {
    #[error("Invalid ffmpeg path: contains shell metacharacters")]
    InvalidFfmpegPath,

    #[error("Failed to execute ffmpeg: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("FFmpeg failed with status {status}: {stderr}")]
    FfmpegFailed { status: i32, stderr: String },
}

/// Invokes ffmpeg once per conversion, producing every ladder variant plus
/// the master playlist in a single run.
pub struct HlsTranscoder {
    ffmpeg_path: String,
    segment_duration: u64,
    ladder: &'static [Variant],
}

impl HlsTranscoder {
    pub fn new(ffmpeg_path: String, segment_duration: u64) -> Result<Self, TranscodeError> {
        // Validate ffmpeg_path
        let dangerous_chars = [';', '|', '&', '$', '`', '(', ')', '<', '>', '\n', '\r'];
        if ffmpeg_path.chars().any(|c| dangerous_chars.contains(&c)) {
            return Err(TranscodeError::InvalidFfmpegPath);
        }

        Ok(Self {
            ffmpeg_path,
            segment_duration,
            ladder: LADDER,
        })
    }

    /// Transcode `input` into a full HLS package under `output_dir`.
    ///
    /// Blocks until ffmpeg exits; a non-zero exit propagates as
    /// `FfmpegFailed` with the captured stderr. No retry.
    pub async fn run(&self, input: &Path, output_dir: &Path) -> Result<(), TranscodeError> {
        let args = render_args(self.ladder, input, output_dir, self.segment_duration);

        tracing::info!(
            input = %input.display(),
            output_dir = %output_dir.display(),
            variants = self.ladder.len(),
            "Generating HLS variants"
        );

        let output = Command::new(&self.ffmpeg_path)
            .args(&args)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            return Err(TranscodeError::FfmpegFailed {
                status: output.status.code().unwrap_or(-1),
                stderr,
            });
        }

        tracing::info!(output_dir = %output_dir.display(), "Conversion completed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_dangerous_ffmpeg_path() {
        assert!(matches!(
            HlsTranscoder::new("ffmpeg; rm -rf /".to_string(), 6),
            Err(TranscodeError::InvalidFfmpegPath)
        ));
        assert!(HlsTranscoder::new("/usr/local/bin/ffmpeg".to_string(), 6).is_ok());
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_an_error() {
        // `false` exits 1 without reading its arguments, standing in for a
        // failed ffmpeg run.
        let transcoder = HlsTranscoder::new("false".to_string(), 6).unwrap();
        let err = transcoder
            .run(Path::new("in.mp4"), Path::new("out"))
            .await
            .unwrap_err();
        assert!(matches!(err, TranscodeError::FfmpegFailed { .. }));
    }

    #[tokio::test]
    async fn test_missing_binary_is_an_error() {
        let transcoder = HlsTranscoder::new("ffmpeg-does-not-exist".to_string(), 6).unwrap();
        let err = transcoder
            .run(Path::new("in.mp4"), Path::new("out"))
            .await
            .unwrap_err();
        assert!(matches!(err, TranscodeError::Spawn(_)));
    }
}
