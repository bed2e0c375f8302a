//! Output naming: derive the HLS output directory name from the source
//! filename.

use std::path::Path;

use md5::{Digest, Md5};

/// Derive the output directory name for a source file.
///
/// The stem keeps its original characters except spaces, which become
/// hyphens. The suffix is the hex MD5 digest of the full original filename
/// (extension included), so two sources that differ only in extension get
/// distinct output directories.
pub fn format_output_name(original: &str) -> String {
    let stem = Path::new(original)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(original);
    let hyphenated = stem.replace(' ', "-");

    let digest = Md5::digest(original.as_bytes());

    format!("{}-{}", hyphenated, hex::encode(digest))
}
