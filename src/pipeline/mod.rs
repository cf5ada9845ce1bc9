//! # Assembly Pipeline
//!
//! Orchestrates clip rendering, concatenation, audio muxing and output
//! naming.

pub mod engine;
pub mod filters;
pub mod output;

pub use engine::AssemblyEngine;
pub use output::{generate_output_path, output_path_at};
