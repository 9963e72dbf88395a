//! Server configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Directory listing configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Report recursive sizes for subdirectories by default
    pub dir_sizes: bool,
}

/// Subtitle conversion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtitleConfig {
    /// ffmpeg binary used to probe frame rates
    pub ffmpeg_path: PathBuf,

    /// Upper bound for one probe run, in seconds
    pub probe_timeout_secs: u64,

    /// Frame rate assumed when probing fails
    pub default_fps: f64,

    /// Extension of the video a `.sub` file belongs to
    pub default_video_extension: String,
}

impl Default for SubtitleConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: PathBuf::from("ffmpeg"),
            probe_timeout_secs: 10,
            default_fps: media_share_lib::DEFAULT_FPS,
            default_video_extension: media_share_lib::DEFAULT_VIDEO_EXTENSION.to_string(),
        }
    }
}

impl SubtitleConfig {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Root of the shared media tree
    pub media_dir: PathBuf,

    /// URL prefix the server is mounted under, used in generated links
    pub base_path: Option<String>,

    /// Enable CORS
    pub cors_enabled: bool,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Log output format (pretty, json)
    pub log_format: String,

    pub listing: ListingConfig,

    pub subtitles: SubtitleConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            media_dir: PathBuf::from("media"),
            base_path: None,
            cors_enabled: true,
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            listing: ListingConfig::default(),
            subtitles: SubtitleConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Base URL for links, `""` when mounted at the root.
    pub fn base_url(&self) -> String {
        match self.base_path.as_deref() {
            Some(prefix) => media_share_lib::secure_url("", Some(prefix))
                .trim_end_matches('/')
                .to_string(),
            None => String::new(),
        }
    }

    /// Apply environment overrides (`MEDIA_DIR`).
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(dir) = std::env::var_os("MEDIA_DIR").filter(|d| !d.is_empty()) {
            self.media_dir = PathBuf::from(dir);
        }
        self
    }
}
