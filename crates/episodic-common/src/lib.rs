//! Episodic-Common: Shared types, ids, and utilities.
//!
//! This crate provides common functionality used across episodic:
//!
//! - **Episode model**: the full [`Episode`] record and its index projection
//!   [`EpisodeSummary`]
//! - **Typed IDs**: [`EpisodeId`], an opaque string identifier
//! - **Citations**: APA and BibTeX rendering for an episode
//! - **Error Handling**: the unified [`Error`] type and [`Result`] alias
//!
//! # Examples
//!
//! ```
//! use episodic_common::{Episode, EpisodeId, NewEpisode};
//!
//! let input = NewEpisode {
//!     title: "Pilot".into(),
//!     body: String::new(),
//!     audio_url: "https://cdn.example.com/pilot.mp3".into(),
//!     rating: None,
//!     views: None,
//! };
//! let episode = Episode::create(EpisodeId::generate(), input, chrono::Utc::now()).unwrap();
//! assert_eq!(episode.rating, 5.0);
//! assert_eq!(episode.summary().title, "Pilot");
//! ```

pub mod citation;
pub mod error;
pub mod ids;
pub mod types;

pub use error::{Error, Result};
pub use ids::*;
pub use types::*;
