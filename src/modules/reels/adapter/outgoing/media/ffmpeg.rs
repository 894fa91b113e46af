//! ffmpeg-based video composition.
//!
//! The encoding profile is fixed: each image is looped for an equal share of
//! the target duration (never under 3 seconds), the stills are concatenated,
//! the narration is padded then trimmed to the target duration, and the
//! result is an H.264 MP4 tuned for short-form playback.

use async_trait::async_trait;
use tokio::process::Command;

use crate::reels::application::ports::outgoing::{EncodeError, EncodeJob, VideoEncoder};

#[derive(Clone)]
pub struct FfmpegEncoder {
    binary: String,
}

impl FfmpegEncoder {
    pub fn new() -> Self {
        Self::with_binary("ffmpeg")
    }

    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for FfmpegEncoder {
    fn default() -> Self {
        Self::new()
    }
}

fn image_display_secs(duration_secs: u32, image_count: usize) -> u32 {
    let count = image_count.max(1) as u32;
    duration_secs.div_ceil(count).max(3)
}

fn filter_complex(image_count: usize, duration_secs: u32) -> String {
    let video_inputs: String = (0..image_count).map(|i| format!("[{i}:v]")).collect();
    format!(
        "{video_inputs}concat=n={image_count}:v=1:a=0[v];\
         [{image_count}:a]apad[a];\
         [a]atrim=duration={duration_secs}[atrimmed];\
         [atrimmed]amix=inputs=1[amixed]"
    )
}

fn build_args(job: &EncodeJob) -> Vec<String> {
    let display_secs = image_display_secs(job.duration_secs, job.images.len());

    let mut args: Vec<String> = vec!["-y".into()];
    for image in &job.images {
        args.push("-loop".into());
        args.push("1".into());
        args.push("-t".into());
        args.push(display_secs.to_string());
        args.push("-i".into());
        args.push(image.to_string_lossy().into_owned());
    }
    args.push("-i".into());
    args.push(job.audio.to_string_lossy().into_owned());

    args.push("-filter_complex".into());
    args.push(filter_complex(job.images.len(), job.duration_secs));
    args.push("-map".into());
    args.push("[v]".into());
    args.push("-map".into());
    args.push("[amixed]".into());

    for opt in [
        "-c:v",
        "libx264",
        "-preset",
        "medium",
        "-tune",
        "film",
        "-crf",
        "23",
        "-b:v",
        "2M",
        "-r",
        "24",
        "-pix_fmt",
        "yuv420p",
        "-movflags",
        "+faststart",
    ] {
        args.push(opt.into());
    }
    args.push(job.output.to_string_lossy().into_owned());

    args
}

#[async_trait]
impl VideoEncoder for FfmpegEncoder {
    async fn compose(&self, job: &EncodeJob) -> Result<(), EncodeError> {
        let args = build_args(job);
        tracing::debug!(binary = %self.binary, ?args, "Invoking encoder");

        let output = Command::new(&self.binary)
            .args(&args)
            .output()
            .await
            .map_err(|e| EncodeError::Spawn(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(EncodeError::Encoder {
                status: output.status.to_string(),
                stderr,
            });
        }

        tracing::info!(output = %job.output.display(), "Video composed");
        Ok(())
    }
}
