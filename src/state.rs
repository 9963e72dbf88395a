//! Application state shared across all handlers

use media_share_lib::{FfmpegProbe, MediaCatalog, SubtitleTranscoder};

use crate::config::ServerConfig;

pub struct AppState {
    /// Server configuration
    pub config: ServerConfig,

    /// Everything below the media root
    pub catalog: MediaCatalog,

    /// Subtitle to WebVTT conversion
    pub transcoder: SubtitleTranscoder<FfmpegProbe>,

    /// Link prefix derived from `config.base_path`
    pub base_url: String,
}

impl AppState {
    /// Create a new AppState with the given configuration
    pub fn new(config: ServerConfig) -> Self {
        let subs = &config.subtitles;
        let probe = FfmpegProbe::new(subs.ffmpeg_path.clone(), subs.probe_timeout());
        let transcoder = SubtitleTranscoder::new(probe)
            .with_default_fps(subs.default_fps)
            .with_default_video_extension(subs.default_video_extension.clone());

        Self {
            catalog: MediaCatalog::local(config.media_dir.clone()),
            transcoder,
            base_url: config.base_url(),
            config,
        }
    }
}
