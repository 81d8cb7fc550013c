//! Abstract contract for the remote reading-list and talk-page service.
//!
//! The engines never talk to the network directly; they drive an
//! implementation of [`RemoteApiClient`]. Errors are treated uniformly
//! regardless of cause (timeout, server error, decode failure) — the
//! network layer owns timeout semantics.
//!
//! ## Ordering contract
//!
//! Batch-create responses MUST be positionally aligned with their
//! requests: response index *i* corresponds to request index *i*.
//! The sync cycle assigns returned server ids back by position, so an
//! implementation that reorders responses will misassign ids.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SyncResult;
use crate::types::TalkPageSnapshot;

/// Payload for creating one reading list remotely
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListCreation {
    /// Display name
    pub name: String,
    /// Free-form description
    pub description: String,
}

/// Payload for creating one entry remotely
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryCreation {
    /// Project host the article belongs to
    pub project: String,
    /// Normalized article title
    pub title: String,
}

/// Remote record of a reading list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteReadingList {
    /// Server-assigned id
    pub id: i64,
    /// Display name
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Whether this is the account's default list
    pub is_default: bool,
    /// Whether the record is deleted server-side
    pub deleted: bool,
    /// Server-side creation timestamp
    pub created: DateTime<Utc>,
    /// Server-side last-update timestamp; drives the sync watermark
    pub updated: DateTime<Utc>,
}

/// Remote record of a reading-list entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteReadingListEntry {
    /// Server-assigned id
    pub id: i64,
    /// Server id of the owning list
    pub list_id: i64,
    /// Project host the article belongs to
    pub project: String,
    /// Normalized article title
    pub title: String,
    /// Whether the record is deleted server-side
    pub deleted: bool,
    /// Server-side creation timestamp
    pub created: DateTime<Utc>,
    /// Server-side last-update timestamp; drives the sync watermark
    pub updated: DateTime<Utc>,
}

/// Network operations the engines depend on.
///
/// Implementations must be safe to call from concurrent batch tasks.
#[async_trait]
pub trait RemoteApiClient: Send + Sync {
    /// Provision remote sync for this account (enable path)
    async fn setup(&self) -> SyncResult<()>;

    /// Tear down remote sync for this account, deleting remote lists
    /// (disable path)
    async fn teardown(&self) -> SyncResult<()>;

    /// Create several lists in one call.
    ///
    /// Returns server ids positionally aligned with `lists`.
    async fn create_lists(&self, lists: &[ListCreation]) -> SyncResult<Vec<i64>>;

    /// Update name and description of a list
    async fn update_list(&self, list_id: i64, name: &str, description: &str) -> SyncResult<()>;

    /// Delete a list
    async fn delete_list(&self, list_id: i64) -> SyncResult<()>;

    /// Create several entries for one list in one call.
    ///
    /// Returns server ids positionally aligned with `entries`.
    async fn add_entries(&self, list_id: i64, entries: &[EntryCreation]) -> SyncResult<Vec<i64>>;

    /// Remove one entry from a list
    async fn remove_entry(&self, list_id: i64, entry_id: i64) -> SyncResult<()>;

    /// Fetch lists updated since the given watermark.
    ///
    /// Passing the epoch floor fetches everything.
    async fn fetch_lists_since(&self, since: DateTime<Utc>) -> SyncResult<Vec<RemoteReadingList>>;

    /// Fetch entries of one list updated since the given watermark
    async fn fetch_entries_since(
        &self,
        list_id: i64,
        since: DateTime<Utc>,
    ) -> SyncResult<Vec<RemoteReadingListEntry>>;

    /// Fetch the talk page for a title at a given revision
    async fn fetch_talk_page(
        &self,
        host: &str,
        language: &str,
        title: &str,
        revision_id: u64,
    ) -> SyncResult<TalkPageSnapshot>;
}
