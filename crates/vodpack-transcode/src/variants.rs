//! The adaptive-bitrate variant ladder and its rendering into ffmpeg
//! arguments.
//!
//! The ladder is a declarative data table; `render_args` turns it into the
//! full ffmpeg argument list. That rendered list is an external wire
//! contract with ffmpeg and with downstream players: the produced package
//! layout (`%v_%03d.ts` segments, `%v.m3u8` variant playlists,
//! `master.m3u8`) must stay stable.

use std::path::Path;

use serde::Serialize;

/// One resolution/bitrate rung of the adaptive ladder.
#[derive(Debug, Clone, Serialize)]
pub struct Variant {
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
    pub video_bitrate_kbps: u32,
    pub audio_bitrate_kbps: u32,
}

/// The fixed five-rung ladder, highest first.
pub const LADDER: &[Variant] = &[
    Variant {
        name: "1080p",
        width: 1920,
        height: 1080,
        video_bitrate_kbps: 5000,
        audio_bitrate_kbps: 192,
    },
    Variant {
        name: "720p",
        width: 1280,
        height: 720,
        video_bitrate_kbps: 3000,
        audio_bitrate_kbps: 128,
    },
    Variant {
        name: "480p",
        width: 854,
        height: 480,
        video_bitrate_kbps: 1500,
        audio_bitrate_kbps: 128,
    },
    Variant {
        name: "360p",
        width: 640,
        height: 360,
        video_bitrate_kbps: 800,
        audio_bitrate_kbps: 96,
    },
    Variant {
        name: "240p",
        width: 426,
        height: 240,
        video_bitrate_kbps: 400,
        audio_bitrate_kbps: 64,
    },
];

/// Build the filter graph that splits the source video into one scaled
/// copy per ladder rung: `[0:v]split=N[v1]..[vN];[v1]scale=W:H[v1out];…`.
fn filter_graph(ladder: &[Variant]) -> String {
    let mut graph = format!("[0:v]split={}", ladder.len());
    for i in 1..=ladder.len() {
        graph.push_str(&format!("[v{}]", i));
    }
    for (i, variant) in ladder.iter().enumerate() {
        graph.push_str(&format!(
            ";[v{}]scale={}:{}[v{}out]",
            i + 1,
            variant.width,
            variant.height,
            i + 1
        ));
    }
    graph
}

/// Build the `-var_stream_map` value pairing each video/audio stream with
/// its variant name.
fn var_stream_map(ladder: &[Variant]) -> String {
    ladder
        .iter()
        .enumerate()
        .map(|(i, variant)| format!("v:{},a:{},name:{}", i, i, variant.name))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render the full ffmpeg argument list for transcoding `input` into an
/// HLS package under `output_dir`.
///
/// The audio map uses `0:a?` so a source without an audio stream does not
/// fail the variant. All segments are retained (`-hls_list_size 0`).
pub fn render_args(
    ladder: &[Variant],
    input: &Path,
    output_dir: &Path,
    segment_duration: u64,
) -> Vec<String> {
    let segment_path = output_dir.join("%v_%03d.ts");
    let playlist_path = output_dir.join("%v.m3u8");

    let mut args = vec![
        "-i".to_string(),
        input.to_string_lossy().to_string(),
        "-filter_complex".to_string(),
        filter_graph(ladder),
    ];

    for (i, variant) in ladder.iter().enumerate() {
        args.extend_from_slice(&[
            "-map".to_string(),
            format!("[v{}out]", i + 1),
            "-map".to_string(),
            "0:a?".to_string(),
            "-c:v".to_string(),
            "h264".to_string(),
            "-c:a".to_string(),
            "aac".to_string(),
            format!("-b:v:{}", i),
            format!("{}k", variant.video_bitrate_kbps),
            format!("-b:a:{}", i),
            format!("{}k", variant.audio_bitrate_kbps),
        ]);
    }

    args.extend_from_slice(&[
        "-f".to_string(),
        "hls".to_string(),
        "-hls_time".to_string(),
        segment_duration.to_string(),
        "-hls_list_size".to_string(),
        "0".to_string(),
        "-var_stream_map".to_string(),
        var_stream_map(ladder),
        "-master_pl_name".to_string(),
        "master.m3u8".to_string(),
        "-hls_segment_filename".to_string(),
        segment_path.to_string_lossy().to_string(),
        playlist_path.to_string_lossy().to_string(),
    ]);

    args
}
