use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the vidstitch library
#[derive(Error, Debug)]
pub enum StitchError {
    #[error("Clip error: {0}")]
    Clip(#[from] ClipError),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("FFmpeg error: {0}")]
    Ffmpeg(#[from] FfmpegError),

    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Invalid clip descriptor errors
#[derive(Error, Debug)]
pub enum ClipError {
    #[error("Invalid trim range for {path}: start={start}, end={end}")]
    InvalidTrimRange { path: String, start: f64, end: f64 },

    #[error("Invalid crop rectangle for {path}: ({x1},{y1})-({x2},{y2})")]
    InvalidCropRect {
        path: String,
        x1: u32,
        y1: u32,
        x2: u32,
        y2: u32,
    },

    #[error("Invalid slow motion factor for {path}: {factor}")]
    InvalidSpeedFactor { path: String, factor: f64 },
}

/// Pipeline orchestration errors
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("No clip descriptors provided")]
    NoClips,

    #[error("Segment rendering failed for {path}: {reason}")]
    SegmentFailed { path: String, reason: String },

    #[error("Output generation failed: {reason}")]
    OutputFailed { reason: String },
}

/// Errors from the ffmpeg/ffprobe subprocess layer
#[derive(Error, Debug)]
pub enum FfmpegError {
    #[error("{name} not found in PATH")]
    BinaryNotFound { name: String },

    #[error("ffmpeg failed: {message}")]
    Failed {
        message: String,
        stderr: Option<String>,
        exit_code: Option<i32>,
    },

    #[error("ffprobe failed for {path}: {message}")]
    ProbeFailed { path: PathBuf, message: String },

    #[error("No video stream found in {path}")]
    NoVideoStream { path: PathBuf },

    #[error("Failed to parse ffprobe output: {0}")]
    ProbeParse(#[from] serde_json::Error),
}

/// Manifest loading errors
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Manifest file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse manifest file {path}: {reason}")]
    ParseFailed { path: String, reason: String },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },
}

/// Convenience type alias for Results using StitchError
pub type Result<T> = std::result::Result<T, StitchError>;

impl FfmpegError {
    pub fn failed(
        message: impl Into<String>,
        stderr: Option<String>,
        exit_code: Option<i32>,
    ) -> Self {
        Self::Failed {
            message: message.into(),
            stderr,
            exit_code,
        }
    }
}
