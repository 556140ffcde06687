//! Discrete playback-rate set.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Every rate the controller will accept, slowest first.
pub const RATES: [f64; 7] = [0.5, 0.75, 1.0, 1.25, 1.5, 1.75, 2.0];

const NORMAL: usize = 2;

/// A playback rate constrained to [`RATES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "f64", try_from = "f64")]
pub struct PlaybackRate(usize);

impl PlaybackRate {
    /// The 1x rate.
    pub const NORMAL: Self = Self(NORMAL);

    /// Snap an arbitrary multiplier to the closest member of the set.
    ///
    /// Exactly halfway between two members snaps to the slower one.
    /// Non-finite input yields 1x.
    pub fn nearest(rate: f64) -> Self {
        if !rate.is_finite() {
            return Self::NORMAL;
        }
        let mut best = 0;
        for (i, r) in RATES.iter().enumerate() {
            if (r - rate).abs() < (RATES[best] - rate).abs() {
                best = i;
            }
        }
        Self(best)
    }

    pub fn value(self) -> f64 {
        RATES[self.0]
    }

    /// Next member of the set, wrapping from the fastest back to the slowest.
    pub fn next(self) -> Self {
        Self((self.0 + 1) % RATES.len())
    }

    /// One step faster, stopping at the fastest rate.
    pub fn faster(self) -> Self {
        Self((self.0 + 1).min(RATES.len() - 1))
    }

    /// One step slower, stopping at the slowest rate.
    pub fn slower(self) -> Self {
        Self(self.0.saturating_sub(1))
    }
}

impl Default for PlaybackRate {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl From<PlaybackRate> for f64 {
    fn from(rate: PlaybackRate) -> Self {
        rate.value()
    }
}

impl TryFrom<f64> for PlaybackRate {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        RATES
            .iter()
            .position(|r| *r == value)
            .map(Self)
            .ok_or_else(|| format!("unsupported playback rate: {value}"))
    }
}

impl fmt::Display for PlaybackRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.value())
    }
}
