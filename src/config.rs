use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Main configuration for vidstitch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Encoder settings
    pub encode: EncodeConfig,

    /// Output naming settings
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            encode: EncodeConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|_| ConfigError::ParseFailed {
            path: path.display().to_string(),
        })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue {
            key: "config".to_string(),
            value: e.to_string(),
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.encode.validate()?;
        self.output.validate()?;
        Ok(())
    }
}

/// Encoder settings passed to ffmpeg for every segment render
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodeConfig {
    /// Video codec (fixed to libx264 by default, matching the output format)
    pub video_codec: String,

    /// Audio codec for segment renders and audio muxing
    pub audio_codec: String,

    /// Constant rate factor (0-51, lower is better quality)
    pub crf: u8,

    /// Encoder preset (ultrafast .. veryslow)
    pub preset: String,

    /// Pixel format for broad player compatibility
    pub pixel_format: String,

    /// Audio bitrate, e.g. "192k"
    pub audio_bitrate: String,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
            crf: 18,
            preset: "medium".to_string(),
            pixel_format: "yuv420p".to_string(),
            audio_bitrate: "192k".to_string(),
        }
    }
}

impl EncodeConfig {
    fn validate(&self) -> Result<()> {
        if self.crf > 51 {
            return Err(ConfigError::InvalidValue {
                key: "encode.crf".to_string(),
                value: self.crf.to_string(),
            }
            .into());
        }

        if self.video_codec.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "encode.video_codec".to_string(),
                value: self.video_codec.clone(),
            }
            .into());
        }

        if self.audio_codec.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "encode.audio_codec".to_string(),
                value: self.audio_codec.clone(),
            }
            .into());
        }

        Ok(())
    }
}

/// Output file naming settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Filename prefix; the final name is `<prefix>_<YYYYMMDD_HHMMSS>.mp4`
    pub prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            prefix: "final_video".to_string(),
        }
    }
}

impl OutputConfig {
    fn validate(&self) -> Result<()> {
        if self.prefix.is_empty() || self.prefix.contains(std::path::MAIN_SEPARATOR) {
            return Err(ConfigError::InvalidValue {
                key: "output.prefix".to_string(),
                value: self.prefix.clone(),
            }
            .into());
        }
        Ok(())
    }
}
