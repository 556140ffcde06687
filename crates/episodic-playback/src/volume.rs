//! Volume level with a mute flag that remembers the pre-mute level.

/// Level restored on unmute when the remembered level was silent.
pub const DEFAULT_VOLUME: f64 = 1.0;

/// Linear volume in `0.0..=1.0` plus mute state.
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    level: f64,
    muted: bool,
    /// Level captured at the moment of muting.
    restore: f64,
}

impl Volume {
    pub fn new(level: f64) -> Self {
        let level = clamp_level(level).unwrap_or(DEFAULT_VOLUME);
        Self {
            level,
            muted: false,
            restore: level,
        }
    }

    /// Set the level, clamped to `0.0..=1.0`. NaN is ignored.
    ///
    /// A level above zero clears mute. Setting zero leaves the mute flag alone.
    pub fn set_level(&mut self, level: f64) {
        let Some(level) = clamp_level(level) else {
            return;
        };
        self.level = level;
        if level > 0.0 {
            self.muted = false;
        }
    }

    pub fn level(&self) -> f64 {
        self.level
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Flip mute. Unmuting restores the level captured when muting, or
    /// [`DEFAULT_VOLUME`] if that level was zero.
    pub fn toggle_mute(&mut self) {
        if self.muted {
            self.muted = false;
            self.level = if self.restore > 0.0 {
                self.restore
            } else {
                DEFAULT_VOLUME
            };
        } else {
            self.restore = self.level;
            self.muted = true;
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(DEFAULT_VOLUME)
    }
}

fn clamp_level(level: f64) -> Option<f64> {
    (!level.is_nan()).then(|| level.clamp(0.0, 1.0))
}
