//! Index/record bookkeeping on top of a [`BlobStore`].
//!
//! Every record lives at `items/{id}.json` and has exactly one summary in
//! `index.json`. Writes update the record first and the index second;
//! deletes go the other way, so a crash between the two steps leaves at
//! worst an orphaned record that no read path will surface.
//!
//! The index update is a plain read-modify-write with no lock around it.
//! Two concurrent writers can each read the same index and the later write
//! wins, dropping the other's summary. The catalog assumes a single writer.

use episodic_common::{Episode, EpisodeId, EpisodeSummary, Result};
use tracing::warn;

use crate::blob::{item_key, BlobStore, INDEX_KEY};

/// Read the summary index, newest first. A missing index is empty.
pub fn list(store: &dyn BlobStore) -> Result<Vec<EpisodeSummary>> {
    match store.get(INDEX_KEY)? {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(Vec::new()),
    }
}

/// Load the full record for `id`, provided the index knows about it.
pub fn get(store: &dyn BlobStore, id: &EpisodeId) -> Result<Option<Episode>> {
    let index = list(store)?;
    if !index.iter().any(|s| &s.id == id) {
        return Ok(None);
    }
    match store.get(&item_key(id))? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => {
            warn!(episode_id = %id, "Index entry has no record");
            Ok(None)
        }
    }
}

/// Write the record, then merge its summary into the index.
pub fn put(store: &dyn BlobStore, episode: &Episode) -> Result<()> {
    episode.validate()?;
    store.set(&item_key(&episode.id), &serde_json::to_string(episode)?)?;

    let index = merge_index(list(store)?, episode.summary());
    store.set(INDEX_KEY, &serde_json::to_string(&index)?)
}

/// Drop the summary from the index, then the record. Absent ids are a no-op.
pub fn delete(store: &dyn BlobStore, id: &EpisodeId) -> Result<()> {
    let mut index = list(store)?;
    let before = index.len();
    index.retain(|s| &s.id != id);
    if index.len() != before {
        store.set(INDEX_KEY, &serde_json::to_string(&index)?)?;
    }
    store.delete(&item_key(id))
}

/// Replace any summary with the same id, prepend the new one, and sort by
/// `created_at` descending. The sort is stable, so among equal timestamps the
/// entry written last comes first.
pub fn merge_index(mut index: Vec<EpisodeSummary>, summary: EpisodeSummary) -> Vec<EpisodeSummary> {
    index.retain(|s| s.id != summary.id);
    index.insert(0, summary);
    index.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    index
}
