//! Subtitle conversion to WebVTT
//!
//! Two legacy formats are understood:
//! - SubRip (`.srt`), timed with `HH:MM:SS,mmm` timecodes
//! - MicroDVD (`.sub`), timed with frame numbers; the frame rate comes from
//!   probing the video file next to the subtitle
//!
//! Both are parsed into [`Cue`]s and written out as WebVTT.

pub mod cue;
pub mod microdvd;
pub mod srt;
pub mod webvtt;

pub use cue::{format_timestamp, frame_to_ms, Cue};
pub use webvtt::{write_webvtt, WEBVTT_HEADER};

use std::path::PathBuf;

use crate::catalog::MediaCatalog;
use crate::decode::decode_text;
use crate::error::{MediaError, Result};
use crate::path::{self, ParsedPath};
use crate::probe::{FfmpegProbe, FrameRateProbe};
use crate::storage::{EntryType, Storage};

/// Frame rate assumed when the video cannot be probed.
pub const DEFAULT_FPS: f64 = 25.0;

/// Extension of the video a `.sub` file belongs to, unless told otherwise.
pub const DEFAULT_VIDEO_EXTENSION: &str = "mp4";

/// Subtitle formats, by file extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubtitleKind {
    Srt,
    MicroDvd,
    Unsupported(String),
}

impl SubtitleKind {
    pub fn from_extension(extension: &str) -> Self {
        match extension.to_ascii_lowercase().as_str() {
            "srt" => SubtitleKind::Srt,
            "sub" => SubtitleKind::MicroDvd,
            other => SubtitleKind::Unsupported(other.to_string()),
        }
    }
}

/// Converts subtitle files from the catalog to WebVTT.
#[derive(Debug, Clone)]
pub struct SubtitleTranscoder<P = FfmpegProbe> {
    probe: P,
    default_fps: f64,
    default_video_extension: String,
}

impl<P: FrameRateProbe> SubtitleTranscoder<P> {
    pub fn new(probe: P) -> Self {
        Self {
            probe,
            default_fps: DEFAULT_FPS,
            default_video_extension: DEFAULT_VIDEO_EXTENSION.to_string(),
        }
    }

    /// Frame rate used when probing fails. Non-positive values are ignored.
    pub fn with_default_fps(mut self, fps: f64) -> Self {
        if fps.is_finite() && fps > 0.0 {
            self.default_fps = fps;
        }
        self
    }

    pub fn with_default_video_extension(mut self, extension: impl Into<String>) -> Self {
        self.default_video_extension = extension.into();
        self
    }

    pub fn default_fps(&self) -> f64 {
        self.default_fps
    }

    /// Convert the subtitle file at `subtitle_path` to a WebVTT document.
    ///
    /// `video_extension` names the extension of the sibling video used to
    /// find the frame rate of a `.sub` file.
    pub async fn convert<S: Storage>(
        &self,
        catalog: &MediaCatalog<S>,
        subtitle_path: &str,
        video_extension: Option<&str>,
    ) -> Result<String> {
        let parsed = catalog.parse_path(subtitle_path);
        let kind = SubtitleKind::from_extension(&parsed.extension);
        if let SubtitleKind::Unsupported(ext) = &kind {
            tracing::debug!("refusing to convert {:?} (extension {:?})", subtitle_path, ext);
            return Err(MediaError::UnknownSubtitleType {
                path: subtitle_path.to_string(),
            });
        }

        let bytes = catalog.get_file(subtitle_path).await?;
        let text = decode_text(&bytes);

        let cues = match kind {
            SubtitleKind::MicroDvd => {
                let fps = self.resolve_fps(catalog, &parsed, video_extension).await;
                microdvd::parse_microdvd(&text, fps)
            }
            _ => srt::parse_srt(&text),
        };

        if cues.is_empty() {
            return Err(MediaError::NoContent {
                path: subtitle_path.to_string(),
            });
        }

        tracing::info!("converted {} to WebVTT ({} cues)", subtitle_path, cues.len());
        Ok(write_webvtt(&cues))
    }

    /// Frame rate of the video next to a `.sub` file, or the default.
    async fn resolve_fps<S: Storage>(
        &self,
        catalog: &MediaCatalog<S>,
        subtitle: &ParsedPath,
        video_extension: Option<&str>,
    ) -> f64 {
        let extension = video_extension
            .map(|e| e.trim_start_matches('.'))
            .filter(|e| !e.is_empty())
            .unwrap_or(self.default_video_extension.as_str());
        let sibling = sibling_path(subtitle, extension);

        let video: PathBuf = match catalog.expect_type(&sibling, EntryType::File).await {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!(
                    "no video for {}, assuming {} fps: {}",
                    subtitle.name,
                    self.default_fps,
                    e
                );
                return self.default_fps;
            }
        };

        match self.probe.get_fps(&video).await {
            Ok(fps) => fps,
            Err(e) => {
                tracing::warn!(
                    "probing {} failed, assuming {} fps: {}",
                    video.display(),
                    self.default_fps,
                    e
                );
                self.default_fps
            }
        }
    }
}

/// Request path of the file next to `subtitle` with its extension replaced.
///
/// `ParsedPath` holds decoded segments, so the result is re-encoded: the
/// catalog decodes request paths once more.
fn sibling_path(subtitle: &ParsedPath, extension: &str) -> String {
    let stem = subtitle
        .name
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(&subtitle.name);
    let mut segments: Vec<String> = subtitle
        .parent
        .split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    segments.push(format!("{}.{}", stem, extension));
    path::encode_segments(&segments)
}
