//! # FFmpeg Subprocess Layer
//!
//! All decoding, transforming and encoding is delegated to the `ffmpeg` and
//! `ffprobe` binaries; this module builds and runs those invocations.

pub mod command;
pub mod probe;

pub use command::{check_ffmpeg, check_ffprobe, FfmpegCommand};
pub use probe::{probe_video, VideoInfo};
