//! # episodic-captions
//!
//! Caption-track handling for episode playback: parse a WebVTT document into
//! timed [`Cue`]s, find the cue active at a playback position, and render
//! transcription segments back into a WebVTT track.
//!
//! ## Quick Start
//!
//! ```
//! use episodic_captions::{active_cue, parse};
//!
//! let track = "WEBVTT\n\n00:00:00.000 --> 00:00:05.000\nHello\n\n00:00:03.000 --> 00:00:08.000\nWorld\n";
//! let cues = parse(track);
//!
//! assert_eq!(cues.len(), 2);
//! assert_eq!(active_cue(&cues, 4.0).map(|c| c.text.as_str()), Some("Hello"));
//! ```

mod cue;
mod parser;
mod writer;

pub use cue::{active_cue, active_text, Cue};
pub use parser::{parse, parse_timestamp};
pub use writer::{format_timestamp, render_vtt, Segment, Transcript};
