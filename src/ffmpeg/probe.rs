use std::path::Path;
use std::process::Stdio;

use serde::Deserialize;
use tokio::process::Command;

use crate::error::{FfmpegError, Result};

/// Properties of a video file, as reported by ffprobe
#[derive(Debug, Clone, PartialEq)]
pub struct VideoInfo {
    /// Duration in seconds
    pub duration: f64,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Frame rate (fps)
    pub fps: f64,
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    format: ProbeFormat,
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    codec_type: String,
    width: Option<u32>,
    height: Option<u32>,
    r_frame_rate: Option<String>,
    avg_frame_rate: Option<String>,
}

/// Probe a video file with ffprobe
pub async fn probe_video(path: impl AsRef<Path>) -> Result<VideoInfo> {
    let path = path.as_ref();

    super::check_ffprobe()?;

    let output = Command::new("ffprobe")
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        return Err(FfmpegError::ProbeFailed {
            path: path.to_path_buf(),
            message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
        .into());
    }

    let probe: ProbeOutput =
        serde_json::from_slice(&output.stdout).map_err(FfmpegError::ProbeParse)?;

    video_info_from_probe(probe, path)
}

/// Extract [`VideoInfo`] from parsed ffprobe output.
///
/// A stream without usable dimensions is rejected rather than defaulted: a
/// zero-sized render target would make ffmpeg's `scale` keep the input size
/// and silently skip normalization.
fn video_info_from_probe(probe: ProbeOutput, path: &Path) -> Result<VideoInfo> {
    let video_stream = probe
        .streams
        .iter()
        .find(|s| s.codec_type == "video")
        .ok_or_else(|| FfmpegError::NoVideoStream {
            path: path.to_path_buf(),
        })?;

    let (width, height) = match (video_stream.width, video_stream.height) {
        (Some(w), Some(h)) if w > 0 && h > 0 => (w, h),
        _ => {
            return Err(FfmpegError::ProbeFailed {
                path: path.to_path_buf(),
                message: "video stream reports no dimensions".to_string(),
            }
            .into())
        }
    };

    let duration = probe
        .format
        .duration
        .as_deref()
        .and_then(|d| d.parse::<f64>().ok())
        .unwrap_or(0.0);

    let fps = video_stream
        .avg_frame_rate
        .as_deref()
        .or(video_stream.r_frame_rate.as_deref())
        .and_then(parse_frame_rate)
        .unwrap_or(30.0);

    Ok(VideoInfo {
        duration,
        width,
        height,
        fps,
    })
}

/// Parse a frame-rate string such as "30/1", "30000/1001" or "29.97"
fn parse_frame_rate(s: &str) -> Option<f64> {
    if let Some((num, den)) = s.split_once('/') {
        let num: f64 = num.parse().ok()?;
        let den: f64 = den.parse().ok()?;
        if den > 0.0 {
            return Some(num / den);
        }
    }
    s.parse().ok()
}
