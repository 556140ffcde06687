//! Typed identifier for catalog entries.
//!
//! Episode ids are opaque strings. Fresh ids are random UUID v4 strings, but
//! any non-empty string read back from storage or a URL path is accepted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::Error;

/// Unique identifier for an episode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EpisodeId(String);

impl EpisodeId {
    /// Generate a new random episode ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EpisodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EpisodeId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::validation("episode id cannot be empty"));
        }
        // Ids become part of storage keys; keep them to a single path segment.
        if s.contains('/') || s.contains('\\') {
            return Err(Error::validation(format!("invalid episode id: {s}")));
        }
        Ok(Self(s.to_string()))
    }
}

impl AsRef<str> for EpisodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_unique() {
        let a = EpisodeId::generate();
        let b = EpisodeId::generate();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn test_parse_opaque() {
        let id: EpisodeId = "e1".parse().unwrap();
        assert_eq!(id.as_str(), "e1");
        assert_eq!(id.to_string(), "e1");
    }

    #[test]
    fn test_parse_rejects_empty_and_paths() {
        assert!("".parse::<EpisodeId>().is_err());
        assert!("   ".parse::<EpisodeId>().is_err());
        assert!("../index".parse::<EpisodeId>().is_err());
    }

    #[test]
    fn test_serde_transparent() {
        let id: EpisodeId = "abc".parse().unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""abc""#);
        let back: EpisodeId = serde_json::from_str(r#""abc""#).unwrap();
        assert_eq!(back, id);
    }
}
