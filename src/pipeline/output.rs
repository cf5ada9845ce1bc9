use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

/// Timestamp layout used in generated filenames, second resolution
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Generate `<dir>/<prefix>_<YYYYMMDD_HHMMSS>.mp4` from the current time.
///
/// Two calls within the same wall-clock second produce the same path; there
/// is no collision avoidance. The directory is not created here.
pub fn generate_output_path(dir: impl AsRef<Path>, prefix: &str) -> PathBuf {
    output_path_at(dir, prefix, Local::now())
}

/// Generate the output path for a specific timestamp
pub fn output_path_at(dir: impl AsRef<Path>, prefix: &str, time: DateTime<Local>) -> PathBuf {
    let filename = format!("{}_{}.mp4", prefix, time.format(TIMESTAMP_FORMAT));
    dir.as_ref().join(filename)
}
