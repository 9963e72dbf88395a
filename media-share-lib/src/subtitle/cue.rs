//! Cue model and timestamp helpers

/// A single subtitle cue with timing and text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    /// Start time in milliseconds
    pub start_ms: u64,
    /// End time in milliseconds
    pub end_ms: u64,
    /// Text content, lines separated by `\n`
    pub text: String,
}

impl Cue {
    /// Create a new cue
    pub fn new(start_ms: u64, end_ms: u64, text: impl Into<String>) -> Self {
        Self {
            start_ms,
            end_ms,
            text: text.into(),
        }
    }
}

/// Format milliseconds as `HH:MM:SS.mmm`. Hours do not wrap.
pub fn format_timestamp(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms / 60_000) % 60;
    let seconds = (ms / 1000) % 60;
    let millis = ms % 1000;
    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
}

/// Convert a frame index to milliseconds, truncating partial milliseconds.
pub fn frame_to_ms(frame: u64, fps: f64) -> u64 {
    (frame as f64 * 1000.0 / fps).floor() as u64
}
