use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tokio::fs;
use tracing::{debug, info};

use crate::{
    clip::ClipSpec,
    config::Config,
    error::{PipelineError, Result},
    ffmpeg::{check_ffmpeg, check_ffprobe, probe_video, FfmpegCommand},
    pipeline::filters,
};

/// Common render target derived from the first clip.
///
/// Every clip after the first is scaled to this frame size, and all segments
/// are rendered at this frame rate so the concat step can stream-copy.
#[derive(Debug, Clone, Copy)]
struct RenderTarget {
    width: u32,
    height: u32,
    fps: f64,
}

/// Orchestrates the assembly of an ordered clip list into one output file
///
/// The pipeline is strictly sequential:
/// 1. Probe the first clip to establish the common frame size and rate
/// 2. Render each clip to a normalized intermediate segment (trim, crop,
///    speed change, rescale)
/// 3. Concatenate the segments in input order
/// 4. Optionally replace the audio track with an external file
/// 5. Write the final file to the output path
pub struct AssemblyEngine {
    config: Config,
}

impl AssemblyEngine {
    /// Create a new engine with the given configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Assemble `clips` into a single video at `output_path`.
    ///
    /// Fails with [`PipelineError::NoClips`] on an empty list before touching
    /// the filesystem. Out-of-range trim and crop parameters surface as
    /// ffmpeg errors from the segment render. There is no atomic rename; a
    /// failure mid-encode may leave a truncated output file.
    pub async fn assemble(
        &self,
        clips: &[ClipSpec],
        output_path: &Path,
        audio_path: Option<&Path>,
    ) -> Result<()> {
        if clips.is_empty() {
            return Err(PipelineError::NoClips.into());
        }

        for clip in clips {
            clip.validate()?;
        }

        check_ffmpeg()?;
        check_ffprobe()?;

        info!("🎬 Assembling {} clips -> {:?}", clips.len(), output_path);
        if let Some(audio) = audio_path {
            info!("   Audio track: {:?}", audio);
        }

        let target = self.resolve_target(&clips[0]).await?;

        // Intermediate segments live in a scoped temp dir, released on every
        // exit path including errors.
        let work_dir = TempDir::new()?;
        let segments = self
            .render_segments(clips, target, work_dir.path())
            .await?;

        match audio_path {
            Some(audio) => {
                let premux = work_dir.path().join("concat.mp4");
                self.concat_segments(work_dir.path(), &segments, &premux)
                    .await?;
                // The output keeps the concatenated video's duration even
                // when the replacement track is shorter or longer.
                let video_duration = probe_video(&premux).await?.duration;
                self.attach_audio(&premux, audio, output_path, video_duration)
                    .await?;
            }
            None => {
                self.concat_segments(work_dir.path(), &segments, output_path)
                    .await?;
            }
        }

        info!("🎉 Assembly complete: {:?}", output_path);
        Ok(())
    }

    /// Probe the first clip and derive the common render target.
    ///
    /// The target size is the first clip's post-crop frame size; slow motion
    /// does not change it.
    async fn resolve_target(&self, first: &ClipSpec) -> Result<RenderTarget> {
        let video = probe_video(&first.path).await?;

        let (width, height) = match first.crop {
            Some(rect) => (rect.width(), rect.height()),
            None => (video.width, video.height),
        };

        debug!(
            "Render target: {}x{} @ {:.3} fps (from {:?})",
            width, height, video.fps, first.path
        );

        Ok(RenderTarget {
            width,
            height,
            fps: video.fps,
        })
    }

    /// Render each clip into a normalized intermediate segment
    async fn render_segments(
        &self,
        clips: &[ClipSpec],
        target: RenderTarget,
        work_dir: &Path,
    ) -> Result<Vec<PathBuf>> {
        info!("🎞️  Rendering {} segments...", clips.len());

        let mut segments = Vec::with_capacity(clips.len());
        for (index, spec) in clips.iter().enumerate() {
            let segment_path = work_dir.join(format!("segment_{index:04}.mp4"));
            debug!("Segment {index}: {:?} -> {:?}", spec.path, segment_path);

            self.segment_command(spec, index, target, &segment_path)
                .run()
                .await
                .map_err(|e| PipelineError::SegmentFailed {
                    path: spec.path.display().to_string(),
                    reason: e.to_string(),
                })?;

            segments.push(segment_path);
        }

        Ok(segments)
    }

    /// Build the ffmpeg invocation for one segment.
    ///
    /// Transformation order matches the descriptor semantics: trim (input
    /// seek), crop, speed change, then rescale for every clip after the
    /// first.
    fn segment_command(
        &self,
        spec: &ClipSpec,
        index: usize,
        target: RenderTarget,
        segment_path: &Path,
    ) -> FfmpegCommand {
        let encode = &self.config.encode;

        let cmd = match spec.trim_interval() {
            Some((start, end)) => {
                FfmpegCommand::new(segment_path).trimmed_input(&spec.path, start, end - start)
            }
            None => FfmpegCommand::new(segment_path).input(&spec.path),
        };

        let scale_to = (index > 0).then_some((target.width, target.height));

        cmd.video_filter(filters::segment_video_filter(
            spec.crop,
            spec.slow_motion_factor,
            scale_to,
        ))
        .audio_filter(filters::segment_audio_filter(spec.slow_motion_factor))
        .video_codec(&encode.video_codec)
        .preset(&encode.preset)
        .crf(encode.crf)
        .pixel_format(&encode.pixel_format)
        .frame_rate(target.fps)
        .audio_codec(&encode.audio_codec)
        .audio_bitrate(&encode.audio_bitrate)
    }

    /// Concatenate normalized segments with the concat demuxer + stream copy
    async fn concat_segments(
        &self,
        work_dir: &Path,
        segments: &[PathBuf],
        output: &Path,
    ) -> Result<()> {
        info!("🔗 Concatenating {} segments...", segments.len());

        let list_path = work_dir.join("concat.txt");
        let list: String = segments
            .iter()
            .map(|p| format!("file '{}'\n", p.display()))
            .collect();
        fs::write(&list_path, list).await?;

        FfmpegCommand::new(output)
            .input_with_args(["-f", "concat", "-safe", "0"], &list_path)
            .output_args(["-c", "copy", "-movflags", "+faststart"])
            .run()
            .await
            .map_err(|e| {
                PipelineError::OutputFailed {
                    reason: format!("concatenation failed: {e}"),
                }
                .into()
            })
    }

    /// Replace the audio track of `video` with `audio`, writing to `output`.
    ///
    /// The video stream is copied and the output is bounded to
    /// `video_duration`: a shorter audio track simply ends early, a longer
    /// one is cut off at the video's end.
    async fn attach_audio(
        &self,
        video: &Path,
        audio: &Path,
        output: &Path,
        video_duration: f64,
    ) -> Result<()> {
        info!("🎵 Attaching audio track {:?}...", audio);

        self.audio_mux_command(video, audio, output, video_duration)
            .run()
            .await
            .map_err(|e| {
                PipelineError::OutputFailed {
                    reason: format!("audio muxing failed: {e}"),
                }
                .into()
            })
    }

    /// Build the ffmpeg invocation for the audio remux
    fn audio_mux_command(
        &self,
        video: &Path,
        audio: &Path,
        output: &Path,
        video_duration: f64,
    ) -> FfmpegCommand {
        let encode = &self.config.encode;

        FfmpegCommand::new(output)
            .input(video)
            .input(audio)
            .map("0:v:0")
            .map("1:a:0")
            .output_args(["-c:v", "copy"])
            .audio_codec(&encode.audio_codec)
            .audio_bitrate(&encode.audio_bitrate)
            .output_args(["-t".to_string(), format!("{video_duration:.3}")])
            .output_args(["-movflags", "+faststart"])
    }
}
