//! Frame-rate probing
//!
//! Runs `ffmpeg -i <file>` and scrapes the frame rate from the stream
//! description it prints, e.g.
//!
//! ```text
//!   Stream #0:0(und): Video: h264 (High), yuv420p, 1280x720, 23.98 fps, 23.98 tbr, 24k tbn
//! ```

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use crate::error::ProbeError;

/// Upper bound on a single probe run.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Something that can tell the frame rate of a video file.
#[async_trait]
pub trait FrameRateProbe: Send + Sync {
    async fn get_fps(&self, video: &Path) -> Result<f64, ProbeError>;
}

/// Probes with an external ffmpeg binary.
#[derive(Debug, Clone)]
pub struct FfmpegProbe {
    binary: PathBuf,
    timeout: Duration,
}

impl FfmpegProbe {
    pub fn new(binary: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }
}

impl Default for FfmpegProbe {
    fn default() -> Self {
        Self::new("ffmpeg", DEFAULT_PROBE_TIMEOUT)
    }
}

#[async_trait]
impl FrameRateProbe for FfmpegProbe {
    async fn get_fps(&self, video: &Path) -> Result<f64, ProbeError> {
        if tokio::fs::metadata(video).await.is_err() {
            return Err(ProbeError::FileNotFound(video.display().to_string()));
        }

        let child = Command::new(&self.binary)
            .arg("-hide_banner")
            .arg("-nostdin")
            .arg("-i")
            .arg(video)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => {
                    ProbeError::BinaryNotFound(self.binary.display().to_string())
                }
                _ => ProbeError::Io(e),
            })?;

        // Dropping the future on timeout drops the child, which kills it.
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(output) => output?,
            Err(_) => return Err(ProbeError::Timeout(self.timeout)),
        };

        // ffmpeg exits non-zero without an output file; only the text matters.
        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        let fps = parse_fps(&text)
            .ok_or_else(|| ProbeError::NoVideoStream(video.display().to_string()))?;
        tracing::debug!("probed {}: {} fps", video.display(), fps);
        Ok(fps)
    }
}

/// Frame rate from the first video stream line of ffmpeg's output.
pub fn parse_fps(output: &str) -> Option<f64> {
    let re = regex!(r"Stream #.*: Video: .*\s(\d+(?:\.\d+)?) fps,");
    output.lines().find_map(|line| {
        let caps = re.captures(line)?;
        caps[1]
            .parse::<f64>()
            .ok()
            .filter(|fps| fps.is_finite() && *fps > 0.0)
    })
}
