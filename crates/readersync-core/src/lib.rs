//! readersync Core Library
//!
//! Reconciliation core for an offline-first encyclopedia reader:
//! reading lists synced against a remote service, and talk pages merged
//! against fresh snapshots.
//!
//! ## Overview
//!
//! The crate implements two engines over a pair of abstract
//! collaborators (a [`LocalStore`] and a [`RemoteApiClient`]):
//!
//! - **Reading-list sync engine**: user actions mark lists and entries
//!   dirty; debounced cycles batch the pending work into bounded
//!   network passes, pull remote changes, and clear dirty flags as the
//!   server confirms each record. Per-item failures are retried on the
//!   next cycle; nothing aborts a pass.
//! - **Talk-page merge engine**: a hash-keyed symmetric-difference
//!   merge that makes the stored topic/reply tree mirror a fetched
//!   snapshot while keeping local ids stable for unchanged subtrees.
//!
//! ## Core Principles
//!
//! - **Local-first**: every edit lands locally and synchronously; the
//!   network follows through asynchronously
//! - **Eventual consistency**: failed items stay dirty and retry on the
//!   next debounced cycle
//! - **Stable identity**: merges never recreate nodes whose content is
//!   unchanged
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use readersync_core::{
//!     Article, ArticleKey, MemoryStore, ReadingListsController, SyncConfig,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(MemoryStore::new());
//!     let controller = ReadingListsController::new(store, remote, SyncConfig::default())?;
//!
//!     // Create a list and save an article to it
//!     let list = controller.create_reading_list("Science", "Physics reading", &[])?;
//!     let article = Article::new(ArticleKey::new("en.wikipedia.org", "Solar System"), "Solar System");
//!     controller.add_articles_to_list(&[article], list.id)?;
//!
//!     // Turn on sync and start the periodic trigger
//!     controller.set_sync_enabled(true, false, false)?;
//!     controller.start();
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Concurrency model
//!
//! Local mutation is serialized through the controller: at most one
//! sync cycle runs at a time, and a trigger arriving while one is in
//! flight is dropped rather than queued. Outbound network calls within
//! a cycle fan out through a `JoinSet` bounded by the configured batch
//! limit; each batch is awaited in full before the next begins. There
//! is no mid-cycle cancellation.

pub mod config;
pub mod error;
pub mod hash;
pub mod remote;
pub mod store;
pub mod sync;
pub mod talk;
pub mod types;

// Re-exports
pub use config::SyncConfig;
pub use error::{SyncError, SyncResult};
pub use hash::ContentSha;
pub use remote::{
    EntryCreation, ListCreation, RemoteApiClient, RemoteReadingList, RemoteReadingListEntry,
};
pub use store::{LocalStore, MemoryStore};
pub use sync::{CycleSummary, ReadingListsController, SyncEvent, SyncState};
pub use talk::{merge_talk_page, MergeOutcome, TalkPageFetcher, TalkPageRequest};
pub use types::*;
