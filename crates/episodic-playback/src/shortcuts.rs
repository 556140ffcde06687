//! Keyboard transport shortcuts.

/// Seconds moved back by [`Shortcut::Rewind`].
pub const REWIND_SECS: f64 = 15.0;
/// Seconds moved forward by [`Shortcut::Skip`].
pub const SKIP_SECS: f64 = 30.0;

/// Where keyboard focus currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputContext {
    #[default]
    Player,
    /// Focus is in a text field; shortcuts must not fire.
    TextEntry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    TogglePlay,
    Rewind,
    Skip,
    Faster,
    Slower,
    ToggleMute,
}

impl Shortcut {
    /// Map a key name (as reported by a DOM `KeyboardEvent.key`) to a shortcut.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            " " | "k" | "K" => Some(Self::TogglePlay),
            "ArrowLeft" | "j" | "J" => Some(Self::Rewind),
            "ArrowRight" | "l" | "L" => Some(Self::Skip),
            ">" => Some(Self::Faster),
            "<" => Some(Self::Slower),
            "m" | "M" => Some(Self::ToggleMute),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(Shortcut::from_key(" "), Some(Shortcut::TogglePlay));
        assert_eq!(Shortcut::from_key("ArrowLeft"), Some(Shortcut::Rewind));
        assert_eq!(Shortcut::from_key("l"), Some(Shortcut::Skip));
        assert_eq!(Shortcut::from_key(">"), Some(Shortcut::Faster));
        assert_eq!(Shortcut::from_key("<"), Some(Shortcut::Slower));
        assert_eq!(Shortcut::from_key("M"), Some(Shortcut::ToggleMute));
        assert_eq!(Shortcut::from_key("Enter"), None);
        assert_eq!(Shortcut::from_key(""), None);
    }
}
