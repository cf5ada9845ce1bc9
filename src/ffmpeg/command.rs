use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::error::{FfmpegError, Result};

/// One `-i` input with its preceding input options (e.g. `-ss`, `-t`, `-f`)
#[derive(Debug, Clone)]
struct Input {
    args: Vec<String>,
    path: PathBuf,
}

/// Builder for a single ffmpeg invocation
///
/// Arguments are assembled as
/// `ffmpeg -y -v <level> [<input args> -i <input>]... <output args> <output>`.
#[derive(Debug, Clone)]
pub struct FfmpegCommand {
    inputs: Vec<Input>,
    output: PathBuf,
    output_args: Vec<String>,
    overwrite: bool,
    log_level: String,
}

impl FfmpegCommand {
    /// Create a new command writing to `output`
    pub fn new(output: impl AsRef<Path>) -> Self {
        Self {
            inputs: Vec::new(),
            output: output.as_ref().to_path_buf(),
            output_args: Vec::new(),
            overwrite: true,
            log_level: "error".to_string(),
        }
    }

    /// Add an input file
    pub fn input(self, path: impl AsRef<Path>) -> Self {
        self.input_with_args(std::iter::empty::<String>(), path)
    }

    /// Add an input file preceded by input options
    pub fn input_with_args<I, S>(mut self, args: I, path: impl AsRef<Path>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inputs.push(Input {
            args: args.into_iter().map(Into::into).collect(),
            path: path.as_ref().to_path_buf(),
        });
        self
    }

    /// Add an input restricted to `[start, start + duration)` seconds
    pub fn trimmed_input(self, path: impl AsRef<Path>, start: f64, duration: f64) -> Self {
        self.input_with_args(
            [
                "-ss".to_string(),
                format!("{start:.3}"),
                "-t".to_string(),
                format!("{duration:.3}"),
            ],
            path,
        )
    }

    /// Add a raw output argument
    pub fn output_arg(mut self, arg: impl Into<String>) -> Self {
        self.output_args.push(arg.into());
        self
    }

    /// Add multiple output arguments
    pub fn output_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.output_args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the video filter chain (`-vf`)
    pub fn video_filter(self, filter: impl Into<String>) -> Self {
        self.output_arg("-vf").output_arg(filter)
    }

    /// Set the audio filter chain (`-af`)
    pub fn audio_filter(self, filter: impl Into<String>) -> Self {
        self.output_arg("-af").output_arg(filter)
    }

    /// Set the video codec (`-c:v`)
    pub fn video_codec(self, codec: impl Into<String>) -> Self {
        self.output_arg("-c:v").output_arg(codec)
    }

    /// Set the audio codec (`-c:a`)
    pub fn audio_codec(self, codec: impl Into<String>) -> Self {
        self.output_arg("-c:a").output_arg(codec)
    }

    /// Set the constant rate factor
    pub fn crf(self, crf: u8) -> Self {
        self.output_arg("-crf").output_arg(crf.to_string())
    }

    /// Set the encoder preset
    pub fn preset(self, preset: impl Into<String>) -> Self {
        self.output_arg("-preset").output_arg(preset)
    }

    /// Set the pixel format
    pub fn pixel_format(self, format: impl Into<String>) -> Self {
        self.output_arg("-pix_fmt").output_arg(format)
    }

    /// Set the audio bitrate
    pub fn audio_bitrate(self, bitrate: impl Into<String>) -> Self {
        self.output_arg("-b:a").output_arg(bitrate)
    }

    /// Set the output frame rate
    pub fn frame_rate(self, fps: f64) -> Self {
        self.output_arg("-r").output_arg(format!("{fps:.6}"))
    }

    /// Select a stream from an input (`-map`)
    pub fn map(self, stream: impl Into<String>) -> Self {
        self.output_arg("-map").output_arg(stream)
    }

    /// Build the full argument vector
    pub fn build_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        if self.overwrite {
            args.push("-y".to_string());
        }

        args.push("-v".to_string());
        args.push(self.log_level.clone());

        for input in &self.inputs {
            args.extend(input.args.iter().cloned());
            args.push("-i".to_string());
            args.push(input.path.to_string_lossy().to_string());
        }

        args.extend(self.output_args.iter().cloned());
        args.push(self.output.to_string_lossy().to_string());

        args
    }

    /// Run the command, waiting for completion.
    ///
    /// A non-zero exit status becomes an [`FfmpegError::Failed`] carrying the
    /// captured stderr and exit code.
    pub async fn run(&self) -> Result<()> {
        check_ffmpeg()?;

        let args = self.build_args();
        debug!("Running ffmpeg {}", args.join(" "));

        let output = Command::new("ffmpeg")
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            Err(FfmpegError::failed(
                "ffmpeg exited with non-zero status",
                Some(stderr),
                output.status.code(),
            )
            .into())
        }
    }
}

/// Check that ffmpeg is available on PATH
pub fn check_ffmpeg() -> Result<PathBuf> {
    which::which("ffmpeg").map_err(|_| {
        FfmpegError::BinaryNotFound {
            name: "ffmpeg".to_string(),
        }
        .into()
    })
}

/// Check that ffprobe is available on PATH
pub fn check_ffprobe() -> Result<PathBuf> {
    which::which("ffprobe").map_err(|_| {
        FfmpegError::BinaryNotFound {
            name: "ffprobe".to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_input_args() {
        let cmd = FfmpegCommand::new("out.mp4")
            .input("in.mp4")
            .video_codec("libx264")
            .crf(18)
            .preset("medium");

        let args = cmd.build_args();
        assert_eq!(args[0], "-y");
        assert!(args.contains(&"-i".to_string()));
        assert!(args.contains(&"in.mp4".to_string()));
        assert!(args.contains(&"libx264".to_string()));
        assert_eq!(args.last().unwrap(), "out.mp4");
    }

    #[test]
    fn test_trimmed_input_places_options_before_input() {
        let cmd = FfmpegCommand::new("out.mp4").trimmed_input("in.mp4", 5.0, 10.0);
        let args = cmd.build_args();

        let ss = args.iter().position(|a| a == "-ss").unwrap();
        let i = args.iter().position(|a| a == "-i").unwrap();
        assert!(ss < i);
        assert_eq!(args[ss + 1], "5.000");
        assert!(args.contains(&"-t".to_string()));
        assert!(args.contains(&"10.000".to_string()));
    }

    #[test]
    fn test_multiple_inputs_in_order() {
        let cmd = FfmpegCommand::new("out.mp4")
            .input("video.mp4")
            .input("audio.mp3")
            .map("0:v:0")
            .map("1:a:0");

        let args = cmd.build_args();
        let video = args.iter().position(|a| a == "video.mp4").unwrap();
        let audio = args.iter().position(|a| a == "audio.mp3").unwrap();
        assert!(video < audio);
        assert_eq!(args.iter().filter(|a| *a == "-i").count(), 2);
    }

    #[test]
    fn test_input_with_format_args() {
        let cmd =
            FfmpegCommand::new("out.mp4").input_with_args(["-f", "concat", "-safe", "0"], "list.txt");
        let args = cmd.build_args();

        let f = args.iter().position(|a| a == "-f").unwrap();
        let i = args.iter().position(|a| a == "-i").unwrap();
        assert!(f < i);
        assert_eq!(args[f + 1], "concat");
    }
}
