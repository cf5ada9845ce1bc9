use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    clip::ClipSpec,
    error::{ManifestError, Result},
};

/// Input manifest describing one assembly run
///
/// The `[[clips]]` array is ordered; it determines concatenation order.
///
/// ```toml
/// audio = "soundtrack.mp3"
///
/// [[clips]]
/// path = "intro.mp4"
/// start_time = 0.0
/// end_time = 10.0
/// crop = [0, 0, 320, 240]
/// slow_motion_factor = 0.5
///
/// [[clips]]
/// path = "main.mp4"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    /// Optional audio track that replaces the concatenated clips' audio
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<PathBuf>,

    /// Ordered clip descriptors
    #[serde(default)]
    pub clips: Vec<ClipSpec>,
}

impl Manifest {
    /// Load a manifest from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ManifestError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let manifest: Manifest =
            toml::from_str(&content).map_err(|e| ManifestError::ParseFailed {
                path: path.display().to_string(),
                reason: e.message().to_string(),
            })?;
        Ok(manifest)
    }

    /// Validate every clip descriptor in order
    pub fn validate(&self) -> Result<()> {
        for clip in &self.clips {
            clip.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::CropRect;
    use tempfile::tempdir;

    const SAMPLE: &str = r#"
audio = "soundtrack.mp3"

[[clips]]
path = "intro.mp4"
start_time = 0.0
end_time = 10.0
crop = [0, 0, 320, 240]
slow_motion_factor = 0.5

[[clips]]
path = "main.mp4"
start_time = 5.0
end_time = 15.0
"#;

    #[test]
    fn test_parse_sample_manifest() {
        let manifest: Manifest = toml::from_str(SAMPLE).unwrap();

        assert_eq!(manifest.audio, Some(PathBuf::from("soundtrack.mp3")));
        assert_eq!(manifest.clips.len(), 2);

        let first = &manifest.clips[0];
        assert_eq!(first.trim_interval(), Some((0.0, 10.0)));
        assert_eq!(first.crop, Some(CropRect::new(0, 0, 320, 240)));
        assert_eq!(first.slow_motion_factor, Some(0.5));

        let second = &manifest.clips[1];
        assert!(second.crop.is_none());
        assert!(second.slow_motion_factor.is_none());
    }

    #[test]
    fn test_clip_order_preserved() {
        let manifest: Manifest = toml::from_str(SAMPLE).unwrap();
        let paths: Vec<_> = manifest.clips.iter().map(|c| c.path.clone()).collect();
        assert_eq!(
            paths,
            vec![PathBuf::from("intro.mp4"), PathBuf::from("main.mp4")]
        );
    }

    #[test]
    fn test_manifest_roundtrip() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("manifest.toml");

        let original: Manifest = toml::from_str(SAMPLE).unwrap();
        std::fs::write(&file_path, toml::to_string_pretty(&original).unwrap()).unwrap();

        let loaded = Manifest::from_file(&file_path).unwrap();
        assert_eq!(loaded.clips.len(), original.clips.len());
        assert_eq!(loaded.audio, original.audio);
        assert_eq!(loaded.clips[0].crop, original.clips[0].crop);
    }

    #[test]
    fn test_missing_manifest_file() {
        let result = Manifest::from_file("does/not/exist.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_propagates_clip_errors() {
        let mut manifest: Manifest = toml::from_str(SAMPLE).unwrap();
        manifest.clips[1].slow_motion_factor = Some(-1.0);
        assert!(manifest.validate().is_err());
    }
}
