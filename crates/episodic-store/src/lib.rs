//! # episodic-store
//!
//! Episode catalog persistence. Records are JSON documents keyed
//! `items/{id}.json`, with a denormalized summary index at `index.json`.
//!
//! [`CatalogStore`] resolves a storage tier on every operation: a SQLite
//! blob table when one is configured and reachable, otherwise a read-only
//! peer mirror, otherwise process memory.
//!
//! ```
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), episodic_common::Error> {
//! use chrono::Utc;
//! use episodic_common::{Episode, EpisodeId, NewEpisode};
//! use episodic_store::CatalogStore;
//!
//! let store = CatalogStore::in_memory();
//! let episode = Episode::create(
//!     EpisodeId::generate(),
//!     NewEpisode {
//!         title: "Pilot".into(),
//!         body: String::new(),
//!         audio_url: "https://cdn.example/pilot.mp3".into(),
//!         rating: None,
//!         views: None,
//!     },
//!     Utc::now(),
//! )?;
//!
//! store.put(&episode).await?;
//! assert_eq!(store.list().await?.len(), 1);
//! # Ok(())
//! # }
//! ```

mod blob;
pub mod catalog;
mod memory;
mod remote;
mod sqlite;
mod store;

pub use blob::{item_key, BlobStore, INDEX_KEY};
pub use memory::MemoryBlobStore;
pub use remote::RemoteMirror;
pub use sqlite::{DbPool, PooledConnection, SqliteBlobStore, SqliteSession};
pub use store::{CatalogStore, StoreConfig, TierKind, DEFAULT_REMOTE_TIMEOUT};
