//! Core of the media-share server.
//!
//! Untrusted request paths are resolved below a media root ([`MediaRoot`]),
//! classified and listed through a [`MediaCatalog`], and subtitle files are
//! converted to WebVTT by a [`SubtitleTranscoder`].

// helper. Compiled once per call site.
macro_rules! regex {
    ($re:literal $(,)?) => {{
        static RE: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
        RE.get_or_init(|| regex::Regex::new($re).unwrap())
    }};
}

pub mod catalog;
pub mod decode;
pub mod error;
pub mod path;
pub mod probe;
pub mod size;
pub mod storage;
pub mod subtitle;

#[cfg(test)]
pub(crate) mod tests;

pub use catalog::{
    content_type, sort_entries, supported_subtitle_extension, supported_video_extension,
    ListOptions, MediaCatalog, MediaStat, SUBTITLE_EXTENSIONS, VIDEO_EXTENSIONS,
};
pub use decode::decode_text;
pub use error::{MediaError, ProbeError, Result};
pub use path::{path_links, secure_url, MediaRoot, ParsedPath, PathLink};
pub use probe::{parse_fps, FfmpegProbe, FrameRateProbe, DEFAULT_PROBE_TIMEOUT};
pub use size::format_size;
pub use storage::{EntryMeta, EntryType, FsStorage, Storage};
pub use subtitle::{
    Cue, SubtitleKind, SubtitleTranscoder, DEFAULT_FPS, DEFAULT_VIDEO_EXTENSION,
};
