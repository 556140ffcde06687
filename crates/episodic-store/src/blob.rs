//! Keyed document storage shared by the durable and transient tiers.

use episodic_common::{EpisodeId, Result};

/// Key of the summary index document.
pub const INDEX_KEY: &str = "index.json";

/// Key of the full record for `id`.
pub fn item_key(id: &EpisodeId) -> String {
    format!("items/{id}.json")
}

/// A flat map from string keys to JSON documents.
///
/// Each call is independently atomic; nothing spans calls.
pub trait BlobStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    /// Removing a missing key is not an error.
    fn delete(&self, key: &str) -> Result<()>;
}
