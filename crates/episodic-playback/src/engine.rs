//! The seam between the controller and whatever actually plays audio.

/// Side effects the controller asks the host's media element to perform.
///
/// The controller never reads state back from the engine; the host reports
/// progress through the controller's event methods instead.
pub trait MediaEngine {
    fn load(&mut self, url: &str);
    fn play(&mut self);
    fn pause(&mut self);
    fn seek(&mut self, position: f64);
    fn set_rate(&mut self, rate: f64);
    fn set_volume(&mut self, volume: f64);
    fn set_muted(&mut self, muted: bool);
}

/// A recorded engine call.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCommand {
    Load(String),
    Play,
    Pause,
    Seek(f64),
    SetRate(f64),
    SetVolume(f64),
    SetMuted(bool),
}

/// Queue commands for a host that drains them on its own schedule.
impl MediaEngine for Vec<EngineCommand> {
    fn load(&mut self, url: &str) {
        self.push(EngineCommand::Load(url.to_string()));
    }

    fn play(&mut self) {
        self.push(EngineCommand::Play);
    }

    fn pause(&mut self) {
        self.push(EngineCommand::Pause);
    }

    fn seek(&mut self, position: f64) {
        self.push(EngineCommand::Seek(position));
    }

    fn set_rate(&mut self, rate: f64) {
        self.push(EngineCommand::SetRate(rate));
    }

    fn set_volume(&mut self, volume: f64) {
        self.push(EngineCommand::SetVolume(volume));
    }

    fn set_muted(&mut self, muted: bool) {
        self.push(EngineCommand::SetMuted(muted));
    }
}
