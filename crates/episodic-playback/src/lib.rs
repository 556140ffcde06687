//! # episodic-playback
//!
//! Caption-synchronized playback for a single episode. A
//! [`PlaybackController`] owns transport state (position, duration, rate,
//! volume, play/pause), resolves the active caption on every position
//! update, and tells an external [`MediaEngine`] what to do. It never plays
//! audio itself.
//!
//! ```
//! use episodic_playback::{EngineCommand, MediaSource, PlaybackController, PlaybackOptions};
//!
//! let mut player = PlaybackController::new(Vec::<EngineCommand>::new(), PlaybackOptions::default());
//! assert!(player.attach(MediaSource::new("https://cdn.example/ep1.mp3")).is_none());
//!
//! player.metadata_loaded(120.0);
//! player.play();
//! player.seek(150.0);
//!
//! assert_eq!(player.position(), 120.0);
//! assert_eq!(player.active_caption(), "");
//! ```

mod captions;
mod clock;
mod controller;
mod engine;
mod rate;
mod shortcuts;
mod state;
mod volume;

pub use captions::{
    CaptionError, CaptionRequest, CaptionResponse, CaptionSource, HttpCaptionSource,
};
pub use clock::format_clock;
pub use controller::{MediaSource, PlaybackController, PlaybackOptions};
pub use engine::{EngineCommand, MediaEngine};
pub use rate::{PlaybackRate, RATES};
pub use shortcuts::{InputContext, Shortcut, REWIND_SECS, SKIP_SECS};
pub use state::{CaptionStatus, LoadState, PlaybackSnapshot, CAPTION_PLACEHOLDER};
pub use volume::{Volume, DEFAULT_VOLUME};
