use thiserror::Error;

use crate::storage::EntryType;

/// Main error type for the media core
#[derive(Error, Debug)]
pub enum MediaError {
    /// The request path was empty or otherwise unusable
    #[error("Invalid path: {0:?}")]
    InvalidPath(String),

    /// Nothing exists at the resolved location
    #[error("Not found: {0}")]
    NotFound(String),

    /// The resolved location exists but is of the wrong kind
    #[error("{path} is not a {expected} (found {found})")]
    WrongType {
        path: String,
        expected: EntryType,
        found: EntryType,
    },

    /// A standard I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The subtitle extension is not one we can convert
    #[error("Unknown subtitle type: {path}")]
    UnknownSubtitleType { path: String },

    /// Conversion ran but produced no cues
    #[error("No content created from subtitle file {path}")]
    NoContent { path: String },
}

/// Frame-rate probe errors
#[derive(Error, Debug)]
pub enum ProbeError {
    /// The probe binary could not be executed
    #[error("probe binary not found: {0}")]
    BinaryNotFound(String),

    /// The video file to probe does not exist
    #[error("video file not found: {0}")]
    FileNotFound(String),

    /// The probe did not finish in time and was killed
    #[error("probe timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// The probe output contained no usable video stream line
    #[error("no video stream with a frame rate in probe output for {0}")]
    NoVideoStream(String),

    /// Spawning or reading from the probe failed
    #[error("probe IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, MediaError>;
