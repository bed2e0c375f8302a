//! Source-file resolution: find the single convertible file in a directory.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while resolving the source file.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("No .{} files found in {}", .extension, .dir.display())]
    NoMatch { dir: PathBuf, extension: String },

    #[error("Multiple .{} files found in {}: {:?}", .extension, .dir.display(), .names)]
    MultipleMatches {
        dir: PathBuf,
        extension: String,
        names: Vec<String>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Return the single file in `dir` whose extension matches `extension`
/// (case-insensitive).
///
/// Zero matches, more than one match, and a missing or non-directory path
/// are distinct errors; cardinality other than one is never silently
/// resolved. Read-only: the directory is only listed.
pub fn resolve_single_source(dir: &Path, extension: &str) -> Result<PathBuf, SourceError> {
    if !dir.is_dir() {
        return Err(SourceError::NotADirectory(dir.to_path_buf()));
    }

    let mut matches = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matched = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case(extension))
            .unwrap_or(false);
        if matched {
            matches.push(path);
        }
    }

    match matches.len() {
        0 => Err(SourceError::NoMatch {
            dir: dir.to_path_buf(),
            extension: extension.to_string(),
        }),
        1 => Ok(matches.remove(0)),
        _ => {
            let mut names: Vec<String> = matches
                .iter()
                .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(String::from))
                .collect();
            names.sort();
            Err(SourceError::MultipleMatches {
                dir: dir.to_path_buf(),
                extension: extension.to_string(),
                names,
            })
        }
    }
}
