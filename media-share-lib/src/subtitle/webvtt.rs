//! WebVTT output

use std::fmt::Write;

use super::cue::{format_timestamp, Cue};

/// First line of every document.
pub const WEBVTT_HEADER: &str = "WEBVTT";

/// Render cues as a WebVTT document.
pub fn write_webvtt(cues: &[Cue]) -> String {
    let mut out = format!("{}\n\n", WEBVTT_HEADER);
    for cue in cues {
        // Writing to a String cannot fail.
        let _ = writeln!(
            out,
            "{} --> {}",
            format_timestamp(cue.start_ms),
            format_timestamp(cue.end_ms)
        );
        out.push_str(&cue.text);
        out.push_str("\n\n");
    }
    out
}
