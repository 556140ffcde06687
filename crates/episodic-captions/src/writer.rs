//! Render transcription segments as a WebVTT track.

use serde::{Deserialize, Serialize};

/// One timed span of transcribed speech.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// Transcript document stored alongside a caption track: the full text plus
/// its timed segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    #[serde(default)]
    pub text: String,
    pub segments: Vec<Segment>,
}

/// Format seconds as `HH:MM:SS.mmm`. Negative and non-finite input clamp to zero.
pub fn format_timestamp(seconds: f64) -> String {
    let total_ms = if seconds.is_finite() && seconds > 0.0 {
        (seconds * 1000.0).round() as u64
    } else {
        0
    };
    let h = total_ms / 3_600_000;
    let m = (total_ms / 60_000) % 60;
    let s = (total_ms / 1000) % 60;
    let ms = total_ms % 1000;
    format!("{h:02}:{m:02}:{s:02}.{ms:03}")
}

/// Build a WebVTT document from transcription segments.
///
/// Segment text is trimmed and blank lines inside it are dropped, since a
/// blank line would end the cue early.
pub fn render_vtt(segments: &[Segment]) -> String {
    let mut out = String::from("WEBVTT\n\n");
    for seg in segments {
        let text = seg
            .text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        out.push_str(&format!(
            "{} --> {}\n{}\n\n",
            format_timestamp(seg.start),
            format_timestamp(seg.end),
            text
        ));
    }
    // Match the conventional single trailing newline.
    if out.ends_with("\n\n") {
        out.pop();
    }
    out
}
