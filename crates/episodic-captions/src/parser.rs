//! Tolerant WebVTT cue parser.
//!
//! The parser walks the document line by line. Anything it cannot make sense
//! of is skipped, so a damaged track still yields every well-formed cue it
//! contains.

use std::sync::LazyLock;

use regex::Regex;

use crate::Cue;

const ARROW: &str = "-->";

static TIMING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{2}):(\d{2}):(\d{2})\.(\d{3})\s+-->\s+(\d{2}):(\d{2}):(\d{2})\.(\d{3})")
        .expect("timing pattern is valid")
});

static TIMESTAMP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{2}):(\d{2}):(\d{2})\.(\d{3})$").expect("timestamp pattern is valid")
});

/// Parse a WebVTT document into cues, in source order.
///
/// Blocks are an optional identifier line, a timing line
/// (`HH:MM:SS.mmm --> HH:MM:SS.mmm`), then text lines up to the next blank
/// line. Blocks without a usable timing line are dropped. Cues are not
/// sorted; callers must not assume they are.
pub fn parse(text: &str) -> Vec<Cue> {
    let lines: Vec<&str> = text.lines().collect();
    let mut cues = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i].trim();

        if line.is_empty() || is_header(line) {
            i += 1;
            continue;
        }
        if is_metadata_block(line) {
            i = next_blank(&lines, i);
            continue;
        }

        // Either this line is the timing line or it is a cue identifier and
        // the timing line follows.
        let timing_idx = if line.contains(ARROW) { i } else { i + 1 };
        let Some((start, end)) = lines.get(timing_idx).and_then(|l| parse_timing(l)) else {
            i += 1;
            continue;
        };

        let text_end = next_blank(&lines, timing_idx + 1);
        let body = lines[timing_idx + 1..text_end].join("\n");

        if end >= start {
            cues.push(Cue::new(start, end, body));
        }
        i = text_end + 1;
    }

    cues
}

/// Convert a single `HH:MM:SS.mmm` timestamp to seconds.
pub fn parse_timestamp(ts: &str) -> Option<f64> {
    let caps = TIMESTAMP_RE.captures(ts.trim())?;
    to_seconds(&caps[1], &caps[2], &caps[3], &caps[4])
}

fn parse_timing(line: &str) -> Option<(f64, f64)> {
    let caps = TIMING_RE.captures(line.trim())?;
    let start = to_seconds(&caps[1], &caps[2], &caps[3], &caps[4])?;
    let end = to_seconds(&caps[5], &caps[6], &caps[7], &caps[8])?;
    Some((start, end))
}

fn to_seconds(h: &str, m: &str, s: &str, ms: &str) -> Option<f64> {
    let h: u32 = h.parse().ok()?;
    let m: u32 = m.parse().ok()?;
    let s: u32 = s.parse().ok()?;
    let ms: u32 = ms.parse().ok()?;
    Some(f64::from(h * 3600 + m * 60 + s) + f64::from(ms) / 1000.0)
}

fn is_header(line: &str) -> bool {
    line.get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("WEBVTT"))
}

/// NOTE, STYLE and REGION blocks carry no cues.
fn is_metadata_block(line: &str) -> bool {
    ["NOTE", "STYLE", "REGION"].iter().any(|kw| {
        line.strip_prefix(kw)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
    })
}

/// Index of the first blank line at or after `from`, or `lines.len()`.
fn next_blank(lines: &[&str], from: usize) -> usize {
    (from..lines.len())
        .find(|&j| lines[j].trim().is_empty())
        .unwrap_or(lines.len())
}
