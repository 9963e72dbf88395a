//! MicroDVD (`.sub`) parser
//!
//! One cue per line: `{start_frame}{end_frame}text`, with `|` separating
//! caption lines. Anything else is ignored.

use super::cue::{frame_to_ms, Cue};

/// Parse MicroDVD text at the given frame rate.
pub fn parse_microdvd(text: &str, fps: f64) -> Vec<Cue> {
    let line_re = regex!(r"^\{(\d+)\}\{(\d+)\}(.*)$");
    let pipe_re = regex!(r"\s*\|\s*");

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let caps = line_re.captures(line)?;
            let start: u64 = caps[1].parse().ok()?;
            let end: u64 = caps[2].parse().ok()?;
            let text = pipe_re.replace_all(&caps[3], "\n");
            Some(Cue::new(
                frame_to_ms(start, fps),
                frame_to_ms(end, fps),
                text.into_owned(),
            ))
        })
        .collect()
}
