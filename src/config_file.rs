//! Configuration file support
//!
//! Loads server configuration from TOML files. Every section is optional.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::ServerConfig;

/// Configuration file format
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Server settings
    pub server: Option<ServerSettings>,
    /// Media tree settings
    pub media: Option<MediaSettings>,
    /// Logging settings
    pub logging: Option<LoggingSettings>,
    /// Subtitle conversion settings
    pub subtitles: Option<SubtitleSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to
    pub host: Option<String>,
    /// Port to listen on
    pub port: Option<u16>,
    /// Enable CORS
    pub cors_enabled: Option<bool>,
    /// URL prefix for generated links
    pub base_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaSettings {
    /// Root of the shared media tree
    pub dir: PathBuf,
    /// Recursive directory sizes in listings
    pub dir_sizes: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty)
    pub format: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtitleSettings {
    pub ffmpeg_path: Option<PathBuf>,
    pub probe_timeout_secs: Option<u64>,
    pub default_fps: Option<f64>,
    pub default_video_extension: Option<String>,
}

impl ConfigFile {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: ConfigFile = toml::from_str(&content)?;
        Ok(config)
    }

    /// Convert to ServerConfig, filling in defaults
    pub fn into_server_config(self) -> ServerConfig {
        let mut config = ServerConfig::default();

        if let Some(server) = self.server {
            config.host = server.host.unwrap_or(config.host);
            config.port = server.port.unwrap_or(config.port);
            config.cors_enabled = server.cors_enabled.unwrap_or(config.cors_enabled);
            config.base_path = server.base_path;
        }
        if let Some(media) = self.media {
            config.media_dir = media.dir;
            config.listing.dir_sizes = media.dir_sizes.unwrap_or(false);
        }
        if let Some(logging) = self.logging {
            config.log_level = logging.level;
            config.log_format = logging.format.unwrap_or(config.log_format);
        }
        if let Some(subs) = self.subtitles {
            let s = &mut config.subtitles;
            if let Some(path) = subs.ffmpeg_path {
                s.ffmpeg_path = path;
            }
            if let Some(ext) = subs.default_video_extension {
                s.default_video_extension = ext;
            }
            s.probe_timeout_secs = subs.probe_timeout_secs.unwrap_or(s.probe_timeout_secs);
            s.default_fps = subs.default_fps.unwrap_or(s.default_fps);
        }
        config
    }
}
