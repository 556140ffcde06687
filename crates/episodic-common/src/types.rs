//! Episode records and their index projection.
//!
//! Records are stored as JSON documents with camelCase field names. Optional
//! fields are omitted when absent so documents stay compact and readable by
//! older peers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{EpisodeId, Error, Result};

/// Highest allowed rating.
pub const MAX_RATING: f64 = 5.0;

/// Rating assigned when a new episode does not specify one.
pub const DEFAULT_RATING: f64 = 5.0;

/// Keys a patch may never overwrite.
const IMMUTABLE_FIELDS: &[&str] = &["id", "createdAt", "updatedAt"];

/// A credited author of an episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliation: Option<String>,
}

/// Full episode record, one per `items/{id}.json` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub id: EpisodeId,
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub audio_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captions_vtt_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript_json_url: Option<String>,
    pub rating: f64,
    #[serde(default)]
    pub views: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Length of the audio in seconds, once known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<Author>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permalink: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_points: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
}

/// Index entry: everything in [`Episode`] except `body`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeSummary {
    pub id: EpisodeId,
    pub title: String,
    pub audio_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captions_vtt_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript_json_url: Option<String>,
    pub rating: f64,
    #[serde(default)]
    pub views: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<Author>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permalink: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_points: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
}

/// Input for creating an episode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEpisode {
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub audio_url: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub views: Option<u64>,
}

impl Episode {
    /// Build a new record from creation input, stamping both timestamps with `now`.
    pub fn create(id: EpisodeId, input: NewEpisode, now: DateTime<Utc>) -> Result<Self> {
        let episode = Self {
            id,
            title: input.title.trim().to_string(),
            body: input.body,
            audio_url: input.audio_url,
            captions_vtt_url: None,
            transcript_json_url: None,
            rating: input.rating.unwrap_or(DEFAULT_RATING),
            views: input.views.unwrap_or(0),
            created_at: now,
            updated_at: now,
            duration: None,
            authors: Vec::new(),
            permalink: None,
            doi: None,
            key_points: Vec::new(),
            references: Vec::new(),
            license: None,
        };
        episode.validate()?;
        Ok(episode)
    }

    /// Check the field-level invariants of a record.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::validation("title cannot be empty"));
        }
        if self.audio_url.trim().is_empty() {
            return Err(Error::validation("audioUrl cannot be empty"));
        }
        validate_rating(self.rating)?;
        if let Some(duration) = self.duration {
            if !duration.is_finite() || duration < 0.0 {
                return Err(Error::validation(format!(
                    "duration must be a non-negative number of seconds, got {duration}"
                )));
            }
        }
        if self.updated_at < self.created_at {
            return Err(Error::validation("updatedAt cannot precede createdAt"));
        }
        Ok(())
    }

    /// Project this record onto its index entry.
    pub fn summary(&self) -> EpisodeSummary {
        EpisodeSummary::from(self)
    }

    /// Merge a JSON patch over this record.
    ///
    /// Keys present in `patch` replace the stored value (a `null` clears an
    /// optional field). `id`, `createdAt` and `updatedAt` are ignored; the
    /// result carries `updatedAt = now`.
    pub fn apply_patch(&self, patch: &Map<String, Value>, now: DateTime<Utc>) -> Result<Self> {
        let mut doc = match serde_json::to_value(self)? {
            Value::Object(map) => map,
            _ => return Err(Error::internal("episode did not serialize to an object")),
        };

        for (key, value) in patch {
            if IMMUTABLE_FIELDS.contains(&key.as_str()) {
                continue;
            }
            doc.insert(key.clone(), value.clone());
        }

        let mut updated: Episode = serde_json::from_value(Value::Object(doc))
            .map_err(|e| Error::validation(format!("invalid patch: {e}")))?;
        updated.updated_at = now.max(self.created_at);
        updated.validate()?;
        Ok(updated)
    }

    /// Year of publication, used for citations.
    pub fn year(&self) -> i32 {
        use chrono::Datelike;
        self.created_at.year()
    }
}

impl From<&Episode> for EpisodeSummary {
    fn from(ep: &Episode) -> Self {
        Self {
            id: ep.id.clone(),
            title: ep.title.clone(),
            audio_url: ep.audio_url.clone(),
            captions_vtt_url: ep.captions_vtt_url.clone(),
            transcript_json_url: ep.transcript_json_url.clone(),
            rating: ep.rating,
            views: ep.views,
            created_at: ep.created_at,
            updated_at: ep.updated_at,
            duration: ep.duration,
            authors: ep.authors.clone(),
            permalink: ep.permalink.clone(),
            doi: ep.doi.clone(),
            key_points: ep.key_points.clone(),
            references: ep.references.clone(),
            license: ep.license.clone(),
        }
    }
}

/// Ratings run from 0 to 5 in half-point steps.
pub fn validate_rating(rating: f64) -> Result<()> {
    if !rating.is_finite() || !(0.0..=MAX_RATING).contains(&rating) {
        return Err(Error::validation(format!(
            "rating must be between 0 and {MAX_RATING}, got {rating}"
        )));
    }
    if (rating * 2.0).fract() != 0.0 {
        return Err(Error::validation(format!(
            "rating must be a multiple of 0.5, got {rating}"
        )));
    }
    Ok(())
}
