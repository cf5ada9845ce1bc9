use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ClipError, Result};

/// Crop rectangle given as two corners, (x1, y1) inclusive and (x2, y2)
/// exclusive.
///
/// Serialized as a 4-element array `[x1, y1, x2, y2]` so manifests can write
/// `crop = [0, 0, 320, 240]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u32; 4]", into = "[u32; 4]")]
pub struct CropRect {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl CropRect {
    pub fn new(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Width of the cropped region in pixels
    pub fn width(&self) -> u32 {
        self.x2.saturating_sub(self.x1)
    }

    /// Height of the cropped region in pixels
    pub fn height(&self) -> u32 {
        self.y2.saturating_sub(self.y1)
    }
}

impl From<[u32; 4]> for CropRect {
    fn from([x1, y1, x2, y2]: [u32; 4]) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

impl From<CropRect> for [u32; 4] {
    fn from(rect: CropRect) -> Self {
        [rect.x1, rect.y1, rect.x2, rect.y2]
    }
}

/// Descriptor for a single source clip and its optional transformations
///
/// Descriptors are supplied as an ordered sequence; the sequence order is the
/// concatenation order of the final video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipSpec {
    /// Path to the source video file
    pub path: PathBuf,

    /// Trim start in seconds (only applied together with `end_time`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<f64>,

    /// Trim end in seconds (only applied together with `start_time`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<f64>,

    /// Crop rectangle, `[x1, y1, x2, y2]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop: Option<CropRect>,

    /// Playback speed multiplier; < 1 slows the clip down, > 1 speeds it up.
    /// A clip of duration d plays for d / factor after processing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slow_motion_factor: Option<f64>,
}

impl ClipSpec {
    /// Create a descriptor with no transformations
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            start_time: None,
            end_time: None,
            crop: None,
            slow_motion_factor: None,
        }
    }

    /// The trim interval [start, end), if both bounds were given.
    ///
    /// A descriptor with only one bound set is treated as untrimmed.
    pub fn trim_interval(&self) -> Option<(f64, f64)> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    /// Check the descriptor for values the pipeline can reject up front.
    ///
    /// Range checks against the actual source (trim beyond duration, crop
    /// beyond frame bounds) are left to ffmpeg and propagate as
    /// [`FfmpegError`](crate::error::FfmpegError).
    pub fn validate(&self) -> Result<()> {
        let path = self.path.display().to_string();

        if let Some((start, end)) = self.trim_interval() {
            if start < 0.0 || end <= start || !start.is_finite() || !end.is_finite() {
                return Err(ClipError::InvalidTrimRange { path, start, end }.into());
            }
        }

        if let Some(rect) = self.crop {
            if rect.x2 <= rect.x1 || rect.y2 <= rect.y1 {
                return Err(ClipError::InvalidCropRect {
                    path,
                    x1: rect.x1,
                    y1: rect.y1,
                    x2: rect.x2,
                    y2: rect.y2,
                }
                .into());
            }
        }

        if let Some(factor) = self.slow_motion_factor {
            if factor <= 0.0 || !factor.is_finite() {
                return Err(ClipError::InvalidSpeedFactor { path, factor }.into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crop_rect_dimensions() {
        let rect = CropRect::new(10, 20, 330, 260);
        assert_eq!(rect.width(), 320);
        assert_eq!(rect.height(), 240);
    }

    #[test]
    fn test_crop_rect_from_array() {
        let rect: CropRect = [0, 0, 320, 240].into();
        assert_eq!(rect, CropRect::new(0, 0, 320, 240));
        assert_eq!(<[u32; 4]>::from(rect), [0, 0, 320, 240]);
    }

    #[test]
    fn test_trim_requires_both_bounds() {
        let mut spec = ClipSpec::new("a.mp4");
        assert!(spec.trim_interval().is_none());

        spec.start_time = Some(1.0);
        assert!(spec.trim_interval().is_none());

        spec.end_time = Some(5.0);
        assert_eq!(spec.trim_interval(), Some((1.0, 5.0)));
    }

    #[test]
    fn test_validate_rejects_inverted_trim() {
        let mut spec = ClipSpec::new("a.mp4");
        spec.start_time = Some(5.0);
        spec.end_time = Some(2.0);
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_degenerate_crop() {
        let mut spec = ClipSpec::new("a.mp4");
        spec.crop = Some(CropRect::new(100, 0, 100, 240));
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_speed_factor() {
        let mut spec = ClipSpec::new("a.mp4");
        spec.slow_motion_factor = Some(0.0);
        assert!(spec.validate().is_err());

        spec.slow_motion_factor = Some(-2.0);
        assert!(spec.validate().is_err());

        spec.slow_motion_factor = Some(0.5);
        assert!(spec.validate().is_ok());
    }
}
