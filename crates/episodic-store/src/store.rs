//! Tier selection for catalog operations.
//!
//! Each operation picks its tier when it runs:
//!
//! 1. **durable**: the SQLite blob table, if configured and a connection can
//!    be checked out;
//! 2. **remote**: a read-only peer mirror, if configured;
//! 3. **transient**: the in-process map.
//!
//! The durable pool is opened lazily and kept only once it opens; until then
//! every operation retries the open. Durable failures and remote read
//! failures are logged and fall through to the next tier. Writes never go to the remote mirror; they fail
//! with [`Error::ReadOnly`] instead.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use episodic_common::{Episode, EpisodeId, EpisodeSummary, Error, Result};
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{catalog, BlobStore, MemoryBlobStore, RemoteMirror, SqliteBlobStore};

/// Default request timeout for the remote mirror.
pub const DEFAULT_REMOTE_TIMEOUT: Duration = Duration::from_secs(5);

/// Which tiers are available to a [`CatalogStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub db_path: Option<PathBuf>,
    pub remote_url: Option<String>,
    pub remote_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            remote_url: None,
            remote_timeout: DEFAULT_REMOTE_TIMEOUT,
        }
    }
}

/// A storage tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TierKind {
    Durable,
    Remote,
    Transient,
}

impl TierKind {
    pub fn is_writable(self) -> bool {
        self != TierKind::Remote
    }
}

impl fmt::Display for TierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TierKind::Durable => write!(f, "durable"),
            TierKind::Remote => write!(f, "remote"),
            TierKind::Transient => write!(f, "transient"),
        }
    }
}

/// The episode catalog. Cheap to share behind an `Arc`.
#[derive(Debug)]
pub struct CatalogStore {
    db_path: Option<PathBuf>,
    durable: Mutex<Option<SqliteBlobStore>>,
    remote: Option<RemoteMirror>,
    transient: MemoryBlobStore,
}

impl CatalogStore {
    /// Build the store. Never fails: a durable tier that cannot be opened yet
    /// is logged and retried by later operations.
    pub fn open(config: &StoreConfig) -> Self {
        let remote = config.remote_url.as_deref().map(|url| {
            info!(url, "Using read-only catalog mirror");
            RemoteMirror::new(url, config.remote_timeout)
        });

        let store = Self {
            db_path: config.db_path.clone(),
            durable: Mutex::new(None),
            remote,
            transient: MemoryBlobStore::new(),
        };
        store.durable();
        store
    }

    /// A store backed only by process memory.
    pub fn in_memory() -> Self {
        Self::open(&StoreConfig::default())
    }

    /// The tier the next operation would use.
    pub fn active_tier(&self) -> TierKind {
        if self.with_durable(|_| Ok(())).is_some() {
            TierKind::Durable
        } else if self.remote.is_some() {
            TierKind::Remote
        } else {
            TierKind::Transient
        }
    }

    /// All summaries, newest first.
    pub async fn list(&self) -> Result<Vec<EpisodeSummary>> {
        if let Some(result) = self.with_durable(catalog::list) {
            return result;
        }
        if let Some(remote) = &self.remote {
            match remote.list().await {
                Ok(index) => {
                    debug!(tier = %TierKind::Remote, count = index.len(), "Listed episodes");
                    return Ok(index);
                }
                Err(e) => warn!(error = %e, "Mirror list failed, using transient tier"),
            }
        }
        debug!(tier = %TierKind::Transient, "Listing episodes");
        catalog::list(&self.transient)
    }

    /// The full record for `id`, if it is in the index.
    pub async fn get(&self, id: &EpisodeId) -> Result<Option<Episode>> {
        if let Some(result) = self.with_durable(|blobs| catalog::get(blobs, id)) {
            return result;
        }
        if let Some(remote) = &self.remote {
            match remote.get(id).await {
                Ok(episode) => {
                    debug!(tier = %TierKind::Remote, episode_id = %id, "Fetched episode");
                    return Ok(episode);
                }
                Err(e) => warn!(episode_id = %id, error = %e, "Mirror read failed, using transient tier"),
            }
        }
        catalog::get(&self.transient, id)
    }

    /// Insert or replace a record and its index entry.
    pub async fn put(&self, episode: &Episode) -> Result<()> {
        if let Some(result) = self.with_durable(|blobs| catalog::put(blobs, episode)) {
            return result;
        }
        self.ensure_writable()?;
        debug!(tier = %TierKind::Transient, episode_id = %episode.id, "Saving episode");
        catalog::put(&self.transient, episode)
    }

    /// Remove a record and its index entry. Absent ids are a no-op.
    pub async fn delete(&self, id: &EpisodeId) -> Result<()> {
        if let Some(result) = self.with_durable(|blobs| catalog::delete(blobs, id)) {
            return result;
        }
        self.ensure_writable()?;
        debug!(tier = %TierKind::Transient, episode_id = %id, "Deleting episode");
        catalog::delete(&self.transient, id)
    }

    fn ensure_writable(&self) -> Result<()> {
        match &self.remote {
            Some(remote) => Err(Error::ReadOnly(format!(
                "writes are disabled while mirroring {}",
                remote.base_url()
            ))),
            None => Ok(()),
        }
    }

    /// The durable pool, opening it if no earlier operation managed to.
    fn durable(&self) -> Option<SqliteBlobStore> {
        let path = self.db_path.as_ref()?;
        let mut slot = self.durable.lock();
        if let Some(store) = slot.as_ref() {
            return Some(store.clone());
        }
        match SqliteBlobStore::open(path) {
            Ok(store) => {
                info!(path = %path.display(), "Durable catalog storage ready");
                *slot = Some(store.clone());
                Some(store)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Durable storage unavailable, falling back");
                None
            }
        }
    }

    /// Run `op` against a freshly checked-out durable connection.
    ///
    /// `None` means the durable tier is not configured, could not be opened,
    /// or could not hand out a connection, and the caller should try the
    /// next tier.
    fn with_durable<T>(&self, op: impl FnOnce(&dyn BlobStore) -> Result<T>) -> Option<Result<T>> {
        let durable = self.durable()?;
        match durable.session() {
            Ok(session) => {
                debug!(tier = %TierKind::Durable, "Resolved storage tier");
                Some(op(&session))
            }
            Err(e) => {
                warn!(error = %e, "Durable storage unavailable for this operation");
                None
            }
        }
    }
}
