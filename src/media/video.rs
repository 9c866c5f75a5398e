use std::path::{Path, PathBuf};

use crate::foundation::error::{BorealisError, BorealisResult};

/// Basic metadata about a source video file.
#[derive(Clone, Debug)]
pub struct VideoSourceInfo {
    /// Absolute or relative source path used for probing/decoding.
    #[cfg_attr(not(feature = "media-ffmpeg"), allow(dead_code))]
    pub source_path: PathBuf,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Container duration in seconds; the loop period.
    pub duration_secs: f64,
}

/// Map a monotonically increasing clock onto the looping source timeline.
pub fn looped_source_time(clock_secs: f64, duration_secs: f64) -> f64 {
    if !duration_secs.is_finite() || duration_secs <= 0.0 {
        return 0.0;
    }
    let t = clock_secs % duration_secs;
    if t < 0.0 { t + duration_secs } else { t }
}

/// Probe source video metadata through `ffprobe`.
#[cfg(feature = "media-ffmpeg")]
pub fn probe_video(source_path: &Path) -> BorealisResult<VideoSourceInfo> {
    #[derive(serde::Deserialize)]
    struct ProbeStream {
        codec_type: Option<String>,
        width: Option<u32>,
        height: Option<u32>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeFormat {
        duration: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeOut {
        streams: Vec<ProbeStream>,
        format: Option<ProbeFormat>,
    }

    let out = std::process::Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_streams",
            "-show_format",
        ])
        .arg(source_path)
        .output()
        .map_err(|e| BorealisError::media(format!("failed to run ffprobe: {e}")))?;
    if !out.status.success() {
        return Err(BorealisError::media(format!(
            "ffprobe failed for '{}': {}",
            source_path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let parsed: ProbeOut = serde_json::from_slice(&out.stdout)
        .map_err(|e| BorealisError::media(format!("ffprobe json parse failed: {e}")))?;
    let video_stream = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| BorealisError::media("no video stream found"))?;
    let width = video_stream
        .width
        .ok_or_else(|| BorealisError::media("missing video width from ffprobe"))?;
    let height = video_stream
        .height
        .ok_or_else(|| BorealisError::media("missing video height from ffprobe"))?;
    let duration_secs = parsed
        .format
        .and_then(|f| f.duration)
        .and_then(|d| d.parse::<f64>().ok())
        .ok_or_else(|| BorealisError::media("missing container duration from ffprobe"))?;

    Ok(VideoSourceInfo {
        source_path: source_path.to_path_buf(),
        width,
        height,
        duration_secs,
    })
}

/// Probe source video metadata through `ffprobe`.
///
/// Returns an error when the `media-ffmpeg` feature is disabled.
#[cfg(not(feature = "media-ffmpeg"))]
pub fn probe_video(_source_path: &Path) -> BorealisResult<VideoSourceInfo> {
    Err(BorealisError::media(
        "video assets require the 'media-ffmpeg' feature",
    ))
}

/// Decode a single RGBA frame from source video at `source_time_sec`.
#[cfg(feature = "media-ffmpeg")]
pub fn decode_video_frame_rgba8(
    source: &VideoSourceInfo,
    source_time_sec: f64,
) -> BorealisResult<Vec<u8>> {
    let out = std::process::Command::new("ffmpeg")
        .args(["-v", "error", "-ss", &format!("{source_time_sec:.9}")])
        .arg("-i")
        .arg(&source.source_path)
        .args([
            "-frames:v",
            "1",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "pipe:1",
        ])
        .output()
        .map_err(|e| BorealisError::media(format!("failed to run ffmpeg for video decode: {e}")))?;

    if !out.status.success() {
        return Err(BorealisError::media(format!(
            "ffmpeg video decode failed for '{}': {}",
            source.source_path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let expected = (source.width as usize) * (source.height as usize) * 4;
    if out.stdout.len() < expected {
        return Err(BorealisError::media(format!(
            "ffmpeg returned a short frame for '{}' ({} of {expected} bytes)",
            source.source_path.display(),
            out.stdout.len()
        )));
    }
    let mut frame = out.stdout;
    frame.truncate(expected);
    Ok(frame)
}

/// Decode a single RGBA frame from source video at `source_time_sec`.
///
/// Returns an error when the `media-ffmpeg` feature is disabled.
#[cfg(not(feature = "media-ffmpeg"))]
pub fn decode_video_frame_rgba8(
    _source: &VideoSourceInfo,
    _source_time_sec: f64,
) -> BorealisResult<Vec<u8>> {
    Err(BorealisError::media(
        "video assets require the 'media-ffmpeg' feature",
    ))
}
