use serde::{Deserialize, Serialize};

/// A caption shown over the closed interval `[start, end]`, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    pub start: f64,
    pub end: f64,
    /// Display text; multi-line cues keep their `\n` separators.
    pub text: String,
}

impl Cue {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    /// Whether `position` falls inside this cue (both ends inclusive).
    #[inline]
    pub fn contains(&self, position: f64) -> bool {
        position >= self.start && position <= self.end
    }
}

/// Find the cue active at `position`.
///
/// Cues may overlap; the first one in source order wins. The slice is not
/// assumed to be sorted, so this is a linear scan.
pub fn active_cue(cues: &[Cue], position: f64) -> Option<&Cue> {
    cues.iter().find(|c| c.contains(position))
}

/// Text of the active cue, or `""` when nothing is showing.
pub fn active_text(cues: &[Cue], position: f64) -> &str {
    active_cue(cues, position).map_or("", |c| c.text.as_str())
}
