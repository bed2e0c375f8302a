//! Configuration module
//!
//! Env-driven configuration for the packaging pipeline: storage backend,
//! ffmpeg invocation, and fetcher settings.

use std::env;

const HLS_SEGMENT_DURATION: u64 = 6;
const SOURCE_EXTENSION: &str = "mp4";
const LINK_FILE: &str = "link.txt";

/// Storage backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    S3,
    Local,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub storage_backend: StorageBackend,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    pub ffmpeg_path: String,
    pub hls_segment_duration: u64,
    pub source_extension: String,
    pub link_file: String,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let storage_backend = match env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "s3".to_string())
            .to_lowercase()
            .as_str()
        {
            "local" => StorageBackend::Local,
            _ => StorageBackend::S3,
        };

        Ok(Config {
            storage_backend,
            s3_bucket: env::var("S3_BUCKET").ok(),
            s3_region: env::var("S3_REGION")
                .ok()
                .or_else(|| env::var("AWS_REGION").ok()),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok(),
            local_storage_base_url: env::var("LOCAL_STORAGE_BASE_URL").ok(),
            ffmpeg_path: env::var("FFMPEG_PATH").unwrap_or_else(|_| "ffmpeg".to_string()),
            hls_segment_duration: env::var("HLS_SEGMENT_DURATION")
                .unwrap_or_else(|_| HLS_SEGMENT_DURATION.to_string())
                .parse()
                .unwrap_or(HLS_SEGMENT_DURATION),
            source_extension: env::var("SOURCE_EXTENSION")
                .unwrap_or_else(|_| SOURCE_EXTENSION.to_string())
                .to_lowercase(),
            link_file: env::var("LINK_FILE").unwrap_or_else(|_| LINK_FILE.to_string()),
        })
    }

    /// Validate the storage backend configuration. Called before building a
    /// storage client; the fetch entry point does not need storage settings.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        match self.storage_backend {
            StorageBackend::S3 => {
                if self.s3_bucket.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_BUCKET must be set when using S3 storage backend"
                    ));
                }
                if self.s3_region.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION must be set when using S3 storage backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when using local storage backend"
                    ));
                }
                if self.local_storage_base_url.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_BASE_URL must be set when using local storage backend"
                    ));
                }
            }
        }

        if self.hls_segment_duration == 0 {
            return Err(anyhow::anyhow!("HLS_SEGMENT_DURATION must be non-zero"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config(backend: StorageBackend) -> Config {
        Config {
            storage_backend: backend,
            s3_bucket: None,
            s3_region: None,
            s3_endpoint: None,
            local_storage_path: None,
            local_storage_base_url: None,
            ffmpeg_path: "ffmpeg".to_string(),
            hls_segment_duration: 6,
            source_extension: "mp4".to_string(),
            link_file: "link.txt".to_string(),
        }
    }

    #[test]
    fn test_s3_backend_requires_bucket_and_region() {
        let mut config = base_config(StorageBackend::S3);
        assert!(config.validate().is_err());

        config.s3_bucket = Some("processed-media".to_string());
        assert!(config.validate().is_err());

        config.s3_region = Some("us-east-1".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_local_backend_requires_path_and_base_url() {
        let mut config = base_config(StorageBackend::Local);
        assert!(config.validate().is_err());

        config.local_storage_path = Some("/var/lib/vodpack/media".to_string());
        config.local_storage_base_url = Some("http://localhost:3000/media".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_segment_duration_rejected() {
        let mut config = base_config(StorageBackend::Local);
        config.local_storage_path = Some("/tmp/media".to_string());
        config.local_storage_base_url = Some("http://localhost:3000/media".to_string());
        config.hls_segment_duration = 0;
        assert!(config.validate().is_err());
    }
}
