//! Abstract contract for local persistence.
//!
//! The engines read and mutate the five entity kinds (reading lists,
//! entries, articles, talk pages, plus two single-value keys for the
//! sync-state bitset and the incremental-sync watermark) exclusively
//! through this trait. Implementations own their transaction mechanics;
//! `save` marks a commit boundary and `reset_working_set` lets the sync
//! cycle bound memory growth while reconciling large entry sets.
//!
//! Implementations must be internally synchronized (`Send + Sync`); the
//! engines serialize their own mutation through the single-flight sync
//! cycle, but collaborators may read concurrently.

use chrono::{DateTime, Utc};

use crate::error::SyncResult;
use crate::types::{
    Article, ArticleKey, EntryId, ReadingList, ReadingListEntry, ReadingListId, TalkPage,
    TalkPageKey,
};

mod memory;

pub use memory::MemoryStore;

/// Local persistence over the entities the engines reconcile
pub trait LocalStore: Send + Sync {
    // ── Reading lists ──────────────────────────────────────────────────

    /// Insert a new list
    fn insert_list(&self, list: ReadingList) -> SyncResult<()>;

    /// Persist changes to an existing list
    fn update_list(&self, list: &ReadingList) -> SyncResult<()>;

    /// Hard-remove a list. Does not cascade to entries.
    fn delete_list(&self, id: ReadingListId) -> SyncResult<()>;

    /// Fetch a list by local id
    fn list(&self, id: ReadingListId) -> SyncResult<Option<ReadingList>>;

    /// Fetch a list by its server-assigned id
    fn list_by_remote_id(&self, remote_id: i64) -> SyncResult<Option<ReadingList>>;

    /// Fetch a non-deleted list by canonical name
    fn list_by_canonical_name(&self, canonical_name: &str) -> SyncResult<Option<ReadingList>>;

    /// All lists, including soft-deleted ones
    fn lists(&self) -> SyncResult<Vec<ReadingList>>;

    /// Lists with local-only changes pending a push
    fn dirty_lists(&self) -> SyncResult<Vec<ReadingList>>;

    /// The single default list, if one exists
    fn default_list(&self) -> SyncResult<Option<ReadingList>>;

    // ── Entries ────────────────────────────────────────────────────────

    /// Insert a new entry
    fn insert_entry(&self, entry: ReadingListEntry) -> SyncResult<()>;

    /// Persist changes to an existing entry
    fn update_entry(&self, entry: &ReadingListEntry) -> SyncResult<()>;

    /// Hard-remove an entry
    fn delete_entry(&self, id: EntryId) -> SyncResult<()>;

    /// Fetch an entry by local id
    fn entry(&self, id: EntryId) -> SyncResult<Option<ReadingListEntry>>;

    /// Fetch an entry by its server-assigned id
    fn entry_by_remote_id(&self, remote_id: i64) -> SyncResult<Option<ReadingListEntry>>;

    /// All entries of one list, including soft-deleted ones
    fn entries_for_list(&self, list_id: ReadingListId) -> SyncResult<Vec<ReadingListEntry>>;

    /// All entries saving one article, across lists
    fn entries_for_article(&self, key: &ArticleKey) -> SyncResult<Vec<ReadingListEntry>>;

    /// Entries with local-only changes pending a push
    fn dirty_entries(&self) -> SyncResult<Vec<ReadingListEntry>>;

    // ── Articles ───────────────────────────────────────────────────────

    /// Fetch an article's saved-state record
    fn article(&self, key: &ArticleKey) -> SyncResult<Option<Article>>;

    /// Insert or replace an article's saved-state record
    fn upsert_article(&self, article: Article) -> SyncResult<()>;

    /// All known articles
    fn articles(&self) -> SyncResult<Vec<Article>>;

    // ── Talk pages ─────────────────────────────────────────────────────

    /// Fetch the stored talk page for a key
    fn talk_page(&self, key: &TalkPageKey) -> SyncResult<Option<TalkPage>>;

    /// Insert or replace a stored talk page
    fn put_talk_page(&self, page: TalkPage) -> SyncResult<()>;

    // ── Single-value state ─────────────────────────────────────────────

    /// Load the persisted sync-state bitset
    fn sync_state(&self) -> SyncResult<u32>;

    /// Persist the sync-state bitset
    fn set_sync_state(&self, bits: u32) -> SyncResult<()>;

    /// Load the incremental-sync watermark
    fn watermark(&self) -> SyncResult<Option<DateTime<Utc>>>;

    /// Persist the incremental-sync watermark
    fn set_watermark(&self, watermark: DateTime<Utc>) -> SyncResult<()>;

    // ── Transaction boundaries ─────────────────────────────────────────

    /// Commit pending changes
    fn save(&self) -> SyncResult<()>;

    /// Drop any cached working set; the next read goes back to the
    /// underlying storage
    fn reset_working_set(&self);
}
