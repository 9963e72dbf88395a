//! SubRip (`.srt`) parser
//!
//! Lenient by necessity: block indices are optional, blank lines are
//! ignored, the fraction may have two or three digits and the two timecodes
//! may be separated by a bare comma instead of `-->`.

use super::cue::Cue;

/// Parse SubRip text into cues, in source order.
pub fn parse_srt(text: &str) -> Vec<Cue> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let mut cues = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let Some((start_ms, end_ms)) = parse_timecodes(lines[i]) else {
            i += 1;
            continue;
        };
        i += 1;

        let mut caption = Vec::new();
        while i < lines.len() && !is_block_boundary(lines[i]) {
            caption.push(lines[i]);
            i += 1;
        }
        let text = caption.join("\n").replace("[br]", "\n");
        cues.push(Cue::new(start_ms, end_ms, text));
    }
    cues
}

/// Start and end of a timecode line, in milliseconds.
fn parse_timecodes(line: &str) -> Option<(u64, u64)> {
    let re = regex!(
        r"^(\d{2}):(\d{2}):(\d{2})[.,](\d{2,3})(?:,|\s*-->\s*)(\d{2}):(\d{2}):(\d{2})[.,](\d{2,3})"
    );
    let caps = re.captures(line)?;
    let start = timecode_ms(&caps[1], &caps[2], &caps[3], &caps[4])?;
    let end = timecode_ms(&caps[5], &caps[6], &caps[7], &caps[8])?;
    Some((start, end))
}

fn timecode_ms(hours: &str, minutes: &str, seconds: &str, fraction: &str) -> Option<u64> {
    let hours: u64 = hours.parse().ok()?;
    let minutes: u64 = minutes.parse().ok()?;
    let seconds: u64 = seconds.parse().ok()?;
    // "5,12" means 120 ms, not 12.
    let millis: u64 = format!("{:0<3}", fraction).parse().ok()?;
    Some(((hours * 60 + minutes) * 60 + seconds) * 1000 + millis)
}

/// A timecode line or a bare block index ends the caption text.
fn is_block_boundary(line: &str) -> bool {
    line.bytes().all(|b| b.is_ascii_digit()) || parse_timecodes(line).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal() {
        let cues = parse_srt("00:00:01,000 --> 00:00:02,000\nhello");
        assert_eq!(cues, vec![Cue::new(1000, 2000, "hello")]);
    }

    #[test]
    fn test_blocks_with_indices() {
        let text = "1\r\n00:00:01,000 --> 00:00:02,500\r\nHello\r\nWorld\r\n\r\n2\r\n00:01:00,000 --> 00:01:01,000\r\nBye\r\n";
        let cues = parse_srt(text);
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0], Cue::new(1000, 2500, "Hello\nWorld"));
        assert_eq!(cues[1], Cue::new(60_000, 61_000, "Bye"));
    }

    #[test]
    fn test_two_digit_fraction_and_dot() {
        let cues = parse_srt("00:00:05.12 --> 00:00:06.5\nx\n00:00:07.12 --> 00:00:08.34\ny");
        // "06.5" has a one-digit fraction and is not a timecode line.
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].start_ms, 7120);
        assert_eq!(cues[0].end_ms, 8340);
    }

    #[test]
    fn test_comma_separator() {
        let cues = parse_srt("00:00:01,000,00:00:02,000\nhello");
        assert_eq!(cues, vec![Cue::new(1000, 2000, "hello")]);
    }

    #[test]
    fn test_br_tokens() {
        let cues = parse_srt("00:00:01,000 --> 00:00:02,000\none[br]two");
        assert_eq!(cues[0].text, "one\ntwo");
    }

    #[test]
    fn test_missing_blank_lines_between_blocks() {
        let text = "00:00:01,000 --> 00:00:02,000\na\n00:00:03,000 --> 00:00:04,000\nb";
        let cues = parse_srt(text);
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].text, "a");
        assert_eq!(cues[1].text, "b");
    }

    #[test]
    fn test_timecode_without_text() {
        let cues = parse_srt("1\n00:00:01,000 --> 00:00:02,000\n2\n00:00:03,000 --> 00:00:04,000\nb");
        assert_eq!(cues[0], Cue::new(1000, 2000, ""));
        assert_eq!(cues[1], Cue::new(3000, 4000, "b"));
    }

    #[test]
    fn test_no_timecodes() {
        assert!(parse_srt("just some text\n\n42\n").is_empty());
    }
}
