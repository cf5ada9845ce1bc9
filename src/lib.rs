//! # Vidstitch
//!
//! Assemble an ordered list of video clips into a single output file, with
//! optional per-clip trimming, cropping and slow motion, rescaling to a
//! common frame size, and an optional replacement audio track.
//!
//! All decoding and encoding is delegated to the `ffmpeg`/`ffprobe`
//! binaries; this crate is the orchestration layer that builds and runs
//! those invocations.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vidstitch::{
//!     clip::ClipSpec,
//!     config::Config,
//!     pipeline::{generate_output_path, AssemblyEngine},
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let clips = vec![
//!     ClipSpec::new("intro.mp4"),
//!     ClipSpec::new("main.mp4"),
//! ];
//!
//! let output = generate_output_path("output", "final_video");
//! let engine = AssemblyEngine::new(Config::default());
//! engine.assemble(&clips, &output, None).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`clip`] - Clip descriptors and validation
//! - [`manifest`] - TOML input manifests
//! - [`pipeline`] - Assembly engine, filter construction, output naming
//! - [`ffmpeg`] - Subprocess layer around ffmpeg/ffprobe
//! - [`scan`] - Directory scanning for video files
//! - [`config`] - Configuration management

pub mod clip;
pub mod config;
pub mod error;
pub mod ffmpeg;
pub mod manifest;
pub mod pipeline;
pub mod scan;

// Re-export commonly used types for convenience
pub use crate::{
    clip::{ClipSpec, CropRect},
    config::Config,
    error::{Result, StitchError},
    manifest::Manifest,
    pipeline::AssemblyEngine,
};
