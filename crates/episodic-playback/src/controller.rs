//! Transport state machine for a single media resource.

use episodic_captions::{active_text, Cue};
use tracing::{debug, warn};

use crate::{
    CaptionRequest, CaptionResponse, CaptionStatus, InputContext, LoadState, MediaEngine,
    PlaybackRate, PlaybackSnapshot, Shortcut, Volume, REWIND_SECS, SKIP_SECS,
};

/// What to play: the audio resource and its optional caption track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaSource {
    pub audio_url: String,
    pub captions_url: Option<String>,
}

impl MediaSource {
    pub fn new(audio_url: impl Into<String>) -> Self {
        Self {
            audio_url: audio_url.into(),
            captions_url: None,
        }
    }

    pub fn with_captions(mut self, url: impl Into<String>) -> Self {
        self.captions_url = Some(url.into());
        self
    }
}

/// Options fixed for the controller's lifetime.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackOptions {
    /// Deep-link start offset in seconds, applied once when the first
    /// duration becomes known.
    pub start_at: Option<f64>,
}

/// Owns playback state for one player and drives a [`MediaEngine`].
///
/// Every transition takes `&mut self`; the host serializes media events and
/// user input onto the controller.
pub struct PlaybackController<E: MediaEngine> {
    engine: E,
    state: LoadState,
    playing: bool,
    position: f64,
    duration: f64,
    buffered: f64,
    rate: PlaybackRate,
    volume: Volume,
    cues: Vec<Cue>,
    captions: CaptionStatus,
    /// Bumped on every attach so late caption responses can be recognized.
    generation: u64,
    pending_start: Option<f64>,
}

impl<E: MediaEngine> PlaybackController<E> {
    pub fn new(engine: E, options: PlaybackOptions) -> Self {
        Self {
            engine,
            state: LoadState::Idle,
            playing: false,
            position: 0.0,
            duration: 0.0,
            buffered: 0.0,
            rate: PlaybackRate::default(),
            volume: Volume::default(),
            cues: Vec::new(),
            captions: CaptionStatus::None,
            generation: 0,
            pending_start: options.start_at.filter(|t| t.is_finite()),
        }
    }

    /// Attach a new resource, discarding all per-resource state.
    ///
    /// Returns the caption fetch the host should run, if the resource has a
    /// caption track. Any fetch still in flight for a previous attachment is
    /// superseded.
    pub fn attach(&mut self, source: MediaSource) -> Option<CaptionRequest> {
        self.generation += 1;
        self.state = LoadState::Loading;
        self.playing = false;
        self.position = 0.0;
        self.duration = 0.0;
        self.buffered = 0.0;
        self.cues.clear();

        debug!(url = %source.audio_url, generation = self.generation, "Attaching media");
        self.engine.load(&source.audio_url);
        self.engine.set_rate(self.rate.value());

        match source.captions_url {
            Some(url) => {
                self.captions = CaptionStatus::Loading;
                Some(CaptionRequest {
                    generation: self.generation,
                    url,
                })
            }
            None => {
                self.captions = CaptionStatus::None;
                None
            }
        }
    }

    /// The engine reported the resource's duration.
    pub fn metadata_loaded(&mut self, duration: f64) {
        if self.state == LoadState::Idle {
            debug!("Ignoring metadata with no media attached");
            return;
        }
        self.duration = if duration.is_finite() {
            duration.max(0.0)
        } else {
            0.0
        };
        self.state = LoadState::Ready;
        self.position = self.clamp(self.position);
        self.buffered = self.buffered.min(self.duration);

        if let Some(start) = self.pending_start.take() {
            debug!(start, "Applying deep-link start offset");
            self.seek(start);
        }
    }

    /// The engine could not load the resource. The controller stays in
    /// `Loading` and does not retry.
    pub fn load_failed(&mut self, reason: &str) {
        warn!(generation = self.generation, reason, "Media failed to load");
        self.playing = false;
    }

    pub fn play(&mut self) {
        if self.state != LoadState::Ready || self.playing {
            return;
        }
        self.engine.play();
        self.playing = true;
    }

    pub fn pause(&mut self) {
        if !self.playing {
            return;
        }
        self.engine.pause();
        self.playing = false;
    }

    pub fn toggle_play(&mut self) {
        if self.playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Periodic position report from the engine.
    pub fn position_update(&mut self, position: f64) {
        if self.state == LoadState::Idle || position.is_nan() {
            return;
        }
        self.position = self.clamp(position);
    }

    /// Buffered-through report from the engine. The watermark only grows
    /// until the next attach.
    pub fn buffered_update(&mut self, buffered: f64) {
        if self.state == LoadState::Idle || buffered.is_nan() {
            return;
        }
        let mut watermark = self.buffered.max(buffered);
        if self.state == LoadState::Ready {
            watermark = watermark.min(self.duration);
        }
        self.buffered = watermark;
    }

    /// Playback reached the end of the resource.
    pub fn ended(&mut self) {
        if self.state != LoadState::Ready {
            return;
        }
        self.playing = false;
        self.position = self.duration;
    }

    /// Move to `target`, clamped to `[0, duration]`.
    pub fn seek(&mut self, target: f64) {
        if self.state == LoadState::Idle || target.is_nan() {
            return;
        }
        self.position = self.clamp(target);
        self.engine.seek(self.position);
    }

    pub fn rewind(&mut self) {
        self.seek(self.position - REWIND_SECS);
    }

    pub fn skip_forward(&mut self) {
        self.seek(self.position + SKIP_SECS);
    }

    /// Set the rate, snapped to the nearest supported value.
    pub fn set_rate(&mut self, rate: f64) {
        self.apply_rate(PlaybackRate::nearest(rate));
    }

    /// Advance to the next rate, wrapping after the fastest.
    pub fn next_rate(&mut self) -> PlaybackRate {
        self.apply_rate(self.rate.next());
        self.rate
    }

    pub fn faster(&mut self) {
        self.apply_rate(self.rate.faster());
    }

    pub fn slower(&mut self) {
        self.apply_rate(self.rate.slower());
    }

    fn apply_rate(&mut self, rate: PlaybackRate) {
        self.rate = rate;
        self.engine.set_rate(rate.value());
    }

    pub fn set_volume(&mut self, volume: f64) {
        let was_muted = self.volume.is_muted();
        self.volume.set_level(volume);
        self.engine.set_volume(self.volume.level());
        if was_muted != self.volume.is_muted() {
            self.engine.set_muted(self.volume.is_muted());
        }
    }

    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.engine.set_muted(self.volume.is_muted());
        if !self.volume.is_muted() {
            self.engine.set_volume(self.volume.level());
        }
    }

    /// Handle a caption fetch result. Returns `false` when the response
    /// belongs to an earlier attachment and was discarded.
    pub fn captions_loaded(&mut self, response: CaptionResponse) -> bool {
        if response.generation != self.generation {
            debug!(
                stale = response.generation,
                current = self.generation,
                "Discarding caption response for a previous attachment"
            );
            return false;
        }
        match response.cues {
            Ok(cues) => {
                self.cues = cues;
                self.captions = CaptionStatus::Ready;
            }
            Err(e) => {
                warn!(error = %e, "Caption track unavailable, continuing without captions");
                self.cues.clear();
                self.captions = CaptionStatus::Unavailable;
            }
        }
        true
    }

    /// Dispatch a key press. Returns whether it mapped to a shortcut that
    /// was applied.
    pub fn handle_key(&mut self, key: &str, context: InputContext) -> bool {
        if context == InputContext::TextEntry {
            return false;
        }
        match Shortcut::from_key(key) {
            Some(shortcut) => {
                self.apply_shortcut(shortcut);
                true
            }
            None => false,
        }
    }

    pub fn apply_shortcut(&mut self, shortcut: Shortcut) {
        match shortcut {
            Shortcut::TogglePlay => self.toggle_play(),
            Shortcut::Rewind => self.rewind(),
            Shortcut::Skip => self.skip_forward(),
            Shortcut::Faster => self.faster(),
            Shortcut::Slower => self.slower(),
            Shortcut::ToggleMute => self.toggle_mute(),
        }
    }

    /// Text of the cue active at the current position, or `""`.
    pub fn active_caption(&self) -> &str {
        active_text(&self.cues, self.position)
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            state: self.state,
            position: self.position,
            duration: self.duration,
            playing: self.playing,
            rate: self.rate,
            volume: self.volume.level(),
            muted: self.volume.is_muted(),
            buffered: self.buffered,
            active_caption: self.active_caption().to_string(),
            captions: self.captions,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn rate(&self) -> PlaybackRate {
        self.rate
    }

    pub fn volume(&self) -> &Volume {
        &self.volume
    }

    pub fn buffered(&self) -> f64 {
        self.buffered
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    pub fn caption_status(&self) -> CaptionStatus {
        self.captions
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    fn clamp(&self, t: f64) -> f64 {
        t.clamp(0.0, self.duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EngineCommand;

    fn ready(duration: f64) -> PlaybackController<Vec<EngineCommand>> {
        let mut ctl = PlaybackController::new(Vec::new(), PlaybackOptions::default());
        ctl.attach(MediaSource::new("https://cdn.test/a.mp3"));
        ctl.metadata_loaded(duration);
        ctl.engine_mut().clear();
        ctl
    }

    #[test]
    fn test_attach_moves_to_loading() {
        let mut ctl = PlaybackController::new(Vec::new(), PlaybackOptions::default());
        assert_eq!(ctl.state(), LoadState::Idle);
        let req = ctl.attach(MediaSource::new("a.mp3"));
        assert!(req.is_none());
        assert_eq!(ctl.state(), LoadState::Loading);
        assert_eq!(ctl.engine()[0], EngineCommand::Load("a.mp3".into()));
    }

    #[test]
    fn test_play_ignored_until_ready() {
        let mut ctl = PlaybackController::new(Vec::new(), PlaybackOptions::default());
        ctl.play();
        assert!(!ctl.is_playing());
        ctl.attach(MediaSource::new("a.mp3"));
        ctl.play();
        assert!(!ctl.is_playing());
        ctl.metadata_loaded(60.0);
        ctl.play();
        assert!(ctl.is_playing());
    }

    #[test]
    fn test_play_is_idempotent() {
        let mut ctl = ready(60.0);
        ctl.play();
        ctl.play();
        assert_eq!(ctl.engine().as_slice(), &[EngineCommand::Play]);
    }

    #[test]
    fn test_seek_clamps() {
        let mut ctl = ready(100.0);
        ctl.seek(150.0);
        assert_eq!(ctl.position(), 100.0);
        ctl.seek(-10.0);
        assert_eq!(ctl.position(), 0.0);
        ctl.seek(42.5);
        assert_eq!(ctl.position(), 42.5);
    }

    #[test]
    fn test_seek_before_duration_known() {
        let mut ctl = PlaybackController::new(Vec::new(), PlaybackOptions::default());
        ctl.attach(MediaSource::new("a.mp3"));
        ctl.seek(30.0);
        assert_eq!(ctl.position(), 0.0);
    }

    #[test]
    fn test_position_update_keeps_playing_flag() {
        let mut ctl = ready(100.0);
        ctl.play();
        ctl.position_update(12.0);
        assert!(ctl.is_playing());
        assert_eq!(ctl.position(), 12.0);
        ctl.position_update(500.0);
        assert_eq!(ctl.position(), 100.0);
    }

    #[test]
    fn test_ended_pauses_at_duration() {
        let mut ctl = ready(80.0);
        ctl.play();
        ctl.ended();
        assert!(!ctl.is_playing());
        assert_eq!(ctl.position(), 80.0);
    }

    #[test]
    fn test_rewind_and_skip_clamp() {
        let mut ctl = ready(100.0);
        ctl.seek(10.0);
        ctl.rewind();
        assert_eq!(ctl.position(), 0.0);
        ctl.seek(50.0);
        ctl.skip_forward();
        assert_eq!(ctl.position(), 80.0);
        ctl.skip_forward();
        assert_eq!(ctl.position(), 100.0);
    }

    #[test]
    fn test_buffered_is_monotonic() {
        let mut ctl = ready(100.0);
        ctl.buffered_update(40.0);
        ctl.buffered_update(20.0);
        assert_eq!(ctl.buffered(), 40.0);
        ctl.buffered_update(250.0);
        assert_eq!(ctl.buffered(), 100.0);

        ctl.attach(MediaSource::new("b.mp3"));
        assert_eq!(ctl.buffered(), 0.0);
    }

    #[test]
    fn test_deep_link_applied_once() {
        let opts = PlaybackOptions {
            start_at: Some(90.0),
        };
        let mut ctl = PlaybackController::new(Vec::new(), opts);
        ctl.attach(MediaSource::new("a.mp3"));
        ctl.metadata_loaded(60.0);
        assert_eq!(ctl.position(), 60.0);

        ctl.attach(MediaSource::new("b.mp3"));
        ctl.metadata_loaded(120.0);
        assert_eq!(ctl.position(), 0.0);
    }

    #[test]
    fn test_volume_and_mute_commands() {
        let mut ctl = ready(10.0);
        ctl.set_volume(0.5);
        ctl.toggle_mute();
        ctl.toggle_mute();
        assert_eq!(
            ctl.engine().as_slice(),
            &[
                EngineCommand::SetVolume(0.5),
                EngineCommand::SetMuted(true),
                EngineCommand::SetMuted(false),
                EngineCommand::SetVolume(0.5),
            ]
        );
    }

    #[test]
    fn test_snapshot_keeps_level_while_muted() {
        let mut ctl = ready(10.0);
        ctl.set_volume(0.4);
        ctl.toggle_mute();

        let snap = ctl.snapshot();
        assert_eq!(snap.volume, 0.4);
        assert!(snap.muted);
        assert_eq!(ctl.engine().last(), Some(&EngineCommand::SetMuted(true)));
    }

    #[test]
    fn test_text_entry_blocks_shortcuts() {
        let mut ctl = ready(100.0);
        assert!(!ctl.handle_key(" ", InputContext::TextEntry));
        assert!(!ctl.is_playing());
        assert!(ctl.handle_key(" ", InputContext::Player));
        assert!(ctl.is_playing());
        assert!(!ctl.handle_key("q", InputContext::Player));
    }

    #[test]
    fn test_load_failure_stays_loading() {
        let mut ctl = PlaybackController::new(Vec::new(), PlaybackOptions::default());
        ctl.attach(MediaSource::new("missing.mp3"));
        ctl.load_failed("404");
        assert_eq!(ctl.state(), LoadState::Loading);
        ctl.play();
        assert!(!ctl.is_playing());
    }
}
