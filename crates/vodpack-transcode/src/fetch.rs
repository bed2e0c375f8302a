//! Fetcher: read a share link from a local file and download the
//! referenced file from Google Drive.

use std::path::{Path, PathBuf};

use thiserror::Error;

const DRIVE_DOWNLOAD_URL: &str = "https://drive.google.com/uc?export=download";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Link file not found: {}", .0.display())]
    LinkFileMissing(PathBuf),

    #[error("Failed to read link file {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed share link: {0}")]
    MalformedLink(String),

    #[error("Download failed: {0}")]
    Download(String),
}

/// Read the share link from `link_file`, trimming surrounding whitespace.
pub fn read_share_link(link_file: &Path) -> Result<String, FetchError> {
    if !link_file.is_file() {
        return Err(FetchError::LinkFileMissing(link_file.to_path_buf()));
    }
    let raw = std::fs::read_to_string(link_file).map_err(|e| FetchError::Io {
        path: link_file.to_path_buf(),
        source: e,
    })?;
    Ok(raw.trim().to_string())
}

/// Extract the file identifier from a Drive share link.
///
/// Share links carry the id as the second-to-last `/`-delimited segment
/// (`https://drive.google.com/file/d/<id>/view`). Links without at least
/// two segments, or with an empty id in that position, are rejected
/// rather than passed on as an undefined identifier.
pub fn extract_file_id(link: &str) -> Result<String, FetchError> {
    let segments: Vec<&str> = link.split('/').collect();
    if segments.len() < 2 {
        return Err(FetchError::MalformedLink(link.to_string()));
    }
    let id = segments[segments.len() - 2];
    if id.is_empty() {
        return Err(FetchError::MalformedLink(link.to_string()));
    }
    Ok(id.to_string())
}

/// Downloads Drive files into a local directory.
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Download the file with the given Drive id into `dest_dir`.
    ///
    /// The local filename comes from the `Content-Disposition` header when
    /// the server supplies a safe one, falling back to the id itself.
    /// Returns the path of the downloaded file.
    pub async fn download(&self, file_id: &str, dest_dir: &Path) -> Result<PathBuf, FetchError> {
        let url = format!("{}&id={}", DRIVE_DOWNLOAD_URL, file_id);
        tracing::info!(id = %file_id, "Downloading file from Drive");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Download(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::Download(format!(
                "HTTP status {}",
                response.status()
            )));
        }

        let filename =
            filename_from_headers(response.headers()).unwrap_or_else(|| file_id.to_string());
        let dest = dest_dir.join(&filename);

        let data = response
            .bytes()
            .await
            .map_err(|e| FetchError::Download(e.to_string()))?;
        tokio::fs::write(&dest, &data).await.map_err(|e| {
            FetchError::Download(format!("Failed to write {}: {}", dest.display(), e))
        })?;

        tracing::info!(
            path = %dest.display(),
            size_bytes = data.len(),
            "Download complete"
        );
        Ok(dest)
    }
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Pull a usable filename out of a `Content-Disposition` header. Names
/// that could escape the destination directory are ignored.
fn filename_from_headers(headers: &reqwest::header::HeaderMap) -> Option<String> {
    let value = headers
        .get(reqwest::header::CONTENT_DISPOSITION)?
        .to_str()
        .ok()?;
    value
        .split(';')
        .find_map(|part| part.trim().strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| {
            !name.is_empty() && !name.contains('/') && !name.contains('\\') && !name.contains("..")
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderMap, HeaderValue, CONTENT_DISPOSITION};
    use tempfile::tempdir;

    #[test]
    fn test_extract_id_from_share_link() {
        let id = extract_file_id("https://drive.google.com/file/d/1AbC_dEf/view?usp=sharing")
            .unwrap();
        assert_eq!(id, "1AbC_dEf");
    }

    #[test]
    fn test_extract_id_with_trailing_slash() {
        let id = extract_file_id("https://drive.google.com/file/d/1AbC_dEf/").unwrap();
        assert_eq!(id, "1AbC_dEf");
    }

    #[test]
    fn test_link_without_slashes_rejected() {
        let err = extract_file_id("not-a-link").unwrap_err();
        assert!(matches!(err, FetchError::MalformedLink(_)));
    }

    #[test]
    fn test_empty_id_segment_rejected() {
        let err = extract_file_id("https://drive.google.com//view").unwrap_err();
        assert!(matches!(err, FetchError::MalformedLink(_)));
    }

    #[test]
    fn test_read_share_link_trims() {
        let dir = tempdir().unwrap();
        let link_file = dir.path().join("link.txt");
        std::fs::write(&link_file, "  https://drive.google.com/file/d/x/view \n").unwrap();

        let link = read_share_link(&link_file).unwrap();
        assert_eq!(link, "https://drive.google.com/file/d/x/view");
    }

    #[test]
    fn test_missing_link_file() {
        let dir = tempdir().unwrap();
        let err = read_share_link(&dir.path().join("link.txt")).unwrap_err();
        assert!(matches!(err, FetchError::LinkFileMissing(_)));
    }

    #[test]
    fn test_filename_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_DISPOSITION,
            HeaderValue::from_static("attachment; filename=\"My Movie.mp4\""),
        );
        assert_eq!(
            filename_from_headers(&headers),
            Some("My Movie.mp4".to_string())
        );
    }

    #[test]
    fn test_unsafe_filename_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_DISPOSITION,
            HeaderValue::from_static("attachment; filename=\"../../evil.sh\""),
        );
        assert_eq!(filename_from_headers(&headers), None);
    }

    #[test]
    fn test_no_content_disposition() {
        let headers = HeaderMap::new();
        assert_eq!(filename_from_headers(&headers), None);
    }
}
