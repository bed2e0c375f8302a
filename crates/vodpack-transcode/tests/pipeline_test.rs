//! Conversion pipeline integration tests.
//!
//! Run with: `cargo test -p vodpack-transcode --test pipeline_test`
//! Uses a stub ffmpeg script in place of the real encoder.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::tempdir;

use vodpack_core::{Config, StorageBackend};
use vodpack_storage::create_storage;
use vodpack_transcode::run_conversion;

/// Write an executable stub that stands in for ffmpeg. It writes a tiny
/// HLS package into the directory of its final argument (the variant
/// playlist pattern), matching where the real encoder would put output.
fn write_stub_ffmpeg(dir: &Path, body: &str) -> PathBuf {
    let script = dir.join("ffmpeg-stub");
    fs::write(&script, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    script
}

const STUB_PACKAGE: &str = r#"for arg in "$@"; do last="$arg"; done
dir=$(dirname "$last")
printf '#EXTM3U\n' > "$dir/master.m3u8"
printf '#EXTM3U\n' > "$dir/1080p.m3u8"
printf 'segment' > "$dir/1080p_000.ts"
exit 0"#;

fn test_config(ffmpeg_path: &Path, storage_path: &Path) -> Config {
    Config {
        storage_backend: StorageBackend::Local,
        s3_bucket: None,
        s3_region: None,
        s3_endpoint: None,
        local_storage_path: Some(storage_path.to_string_lossy().into_owned()),
        local_storage_base_url: Some("http://localhost:3000/media".to_string()),
        ffmpeg_path: ffmpeg_path.to_string_lossy().into_owned(),
        hls_segment_duration: 6,
        source_extension: "mp4".to_string(),
        link_file: "link.txt".to_string(),
    }
}

#[tokio::test]
async fn test_conversion_publishes_package_under_derived_name() {
    let tmp = tempdir().unwrap();
    let source_dir = tmp.path().join("incoming");
    let storage_dir = tmp.path().join("media");
    fs::create_dir_all(&source_dir).unwrap();
    fs::write(source_dir.join("My Movie.mp4"), b"not really video").unwrap();

    let ffmpeg = write_stub_ffmpeg(tmp.path(), STUB_PACKAGE);
    let config = test_config(&ffmpeg, &storage_dir);
    let storage = create_storage(&config).await.unwrap();

    run_conversion(&config, storage, &source_dir).await.unwrap();

    // Output directory name is derived from the source filename.
    let published = storage_dir.join("My-Movie-596ba59a77299059f343e6a2816c55df");
    assert!(published.join("master.m3u8").is_file());
    assert!(published.join("1080p.m3u8").is_file());
    assert!(published.join("1080p_000.ts").is_file());

    // The directory name appears exactly once in the published path.
    assert!(!published
        .join("My-Movie-596ba59a77299059f343e6a2816c55df")
        .exists());
}

#[tokio::test]
async fn test_failed_transcode_publishes_nothing() {
    let tmp = tempdir().unwrap();
    let source_dir = tmp.path().join("incoming");
    let storage_dir = tmp.path().join("media");
    fs::create_dir_all(&source_dir).unwrap();
    fs::write(source_dir.join("clip.mp4"), b"not really video").unwrap();

    let ffmpeg = write_stub_ffmpeg(tmp.path(), "echo 'stub failure' >&2\nexit 1");
    let config = test_config(&ffmpeg, &storage_dir);
    let storage = create_storage(&config).await.unwrap();

    let err = run_conversion(&config, storage, &source_dir)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("transcode"));

    let published: Vec<_> = fs::read_dir(&storage_dir).unwrap().collect();
    assert!(published.is_empty());
}

#[tokio::test]
async fn test_two_sources_abort_before_transcode() {
    let tmp = tempdir().unwrap();
    let source_dir = tmp.path().join("incoming");
    let storage_dir = tmp.path().join("media");
    fs::create_dir_all(&source_dir).unwrap();
    fs::write(source_dir.join("a.mp4"), b"x").unwrap();
    fs::write(source_dir.join("b.mp4"), b"x").unwrap();

    // The stub would create output if invoked; it must not be.
    let ffmpeg = write_stub_ffmpeg(tmp.path(), STUB_PACKAGE);
    let config = test_config(&ffmpeg, &storage_dir);
    let storage = create_storage(&config).await.unwrap();

    let err = run_conversion(&config, storage, &source_dir)
        .await
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("a.mp4") && message.contains("b.mp4"));

    let entries: Vec<_> = fs::read_dir(&source_dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_dir())
        .collect();
    assert!(entries.is_empty());
}
