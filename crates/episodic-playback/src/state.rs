//! Observable playback state handed to the host.

use serde::Serialize;

use crate::PlaybackRate;

/// Shown in place of the active caption when nothing is active.
pub const CAPTION_PLACEHOLDER: &str = "…";

/// Resource lifecycle of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    /// No resource attached yet.
    Idle,
    /// Resource attached, duration not yet known.
    Loading,
    /// Metadata loaded; transport controls are live.
    Ready,
}

/// Progress of the caption track for the current attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptionStatus {
    /// The resource has no caption track.
    None,
    Loading,
    Ready,
    /// The fetch failed; playback continues without captions.
    Unavailable,
}

/// Everything a host needs to render the player.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackSnapshot {
    pub state: LoadState,
    pub position: f64,
    pub duration: f64,
    pub playing: bool,
    pub rate: PlaybackRate,
    pub volume: f64,
    pub muted: bool,
    pub buffered: f64,
    /// Text of the active cue, empty when none is active.
    pub active_caption: String,
    pub captions: CaptionStatus,
}

impl PlaybackSnapshot {
    /// Caption text for display, substituting [`CAPTION_PLACEHOLDER`] for silence.
    pub fn caption_display(&self) -> &str {
        if self.active_caption.is_empty() {
            CAPTION_PLACEHOLDER
        } else {
            &self.active_caption
        }
    }
}
