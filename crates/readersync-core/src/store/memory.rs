//! In-memory reference implementation of [`LocalStore`].
//!
//! Backs the integration tests and serves as the behavioral reference
//! for real adapters. All maps live behind a single `parking_lot`
//! read-write lock; `save` only counts commit boundaries so tests can
//! assert how often the sync cycle flushes.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use super::LocalStore;
use crate::error::SyncResult;
use crate::types::{
    Article, ArticleKey, EntryId, ReadingList, ReadingListEntry, ReadingListId, TalkPage,
    TalkPageKey,
};

#[derive(Default)]
struct Inner {
    lists: HashMap<ReadingListId, ReadingList>,
    entries: HashMap<EntryId, ReadingListEntry>,
    articles: HashMap<ArticleKey, Article>,
    talk_pages: HashMap<TalkPageKey, TalkPage>,
    sync_state: u32,
    watermark: Option<DateTime<Utc>>,
    save_count: u64,
    reset_count: u64,
}

/// Thread-safe in-memory store
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `save` calls so far
    pub fn save_count(&self) -> u64 {
        self.inner.read().save_count
    }

    /// Number of `reset_working_set` calls so far
    pub fn reset_count(&self) -> u64 {
        self.inner.read().reset_count
    }
}

impl LocalStore for MemoryStore {
    fn insert_list(&self, list: ReadingList) -> SyncResult<()> {
        self.inner.write().lists.insert(list.id, list);
        Ok(())
    }

    fn update_list(&self, list: &ReadingList) -> SyncResult<()> {
        self.inner.write().lists.insert(list.id, list.clone());
        Ok(())
    }

    fn delete_list(&self, id: ReadingListId) -> SyncResult<()> {
        self.inner.write().lists.remove(&id);
        Ok(())
    }

    fn list(&self, id: ReadingListId) -> SyncResult<Option<ReadingList>> {
        Ok(self.inner.read().lists.get(&id).cloned())
    }

    fn list_by_remote_id(&self, remote_id: i64) -> SyncResult<Option<ReadingList>> {
        Ok(self
            .inner
            .read()
            .lists
            .values()
            .find(|l| l.remote_id == Some(remote_id))
            .cloned())
    }

    fn list_by_canonical_name(&self, canonical_name: &str) -> SyncResult<Option<ReadingList>> {
        Ok(self
            .inner
            .read()
            .lists
            .values()
            .find(|l| !l.is_deleted_locally && l.canonical_name == canonical_name)
            .cloned())
    }

    fn lists(&self) -> SyncResult<Vec<ReadingList>> {
        let mut lists: Vec<ReadingList> = self.inner.read().lists.values().cloned().collect();
        lists.sort_by_key(|l| l.id.0);
        Ok(lists)
    }

    fn dirty_lists(&self) -> SyncResult<Vec<ReadingList>> {
        let mut lists: Vec<ReadingList> = self
            .inner
            .read()
            .lists
            .values()
            .filter(|l| l.is_updated_locally)
            .cloned()
            .collect();
        lists.sort_by_key(|l| l.id.0);
        Ok(lists)
    }

    fn default_list(&self) -> SyncResult<Option<ReadingList>> {
        Ok(self
            .inner
            .read()
            .lists
            .values()
            .find(|l| l.is_default && !l.is_deleted_locally)
            .cloned())
    }

    fn insert_entry(&self, entry: ReadingListEntry) -> SyncResult<()> {
        self.inner.write().entries.insert(entry.id, entry);
        Ok(())
    }

    fn update_entry(&self, entry: &ReadingListEntry) -> SyncResult<()> {
        self.inner.write().entries.insert(entry.id, entry.clone());
        Ok(())
    }

    fn delete_entry(&self, id: EntryId) -> SyncResult<()> {
        self.inner.write().entries.remove(&id);
        Ok(())
    }

    fn entry(&self, id: EntryId) -> SyncResult<Option<ReadingListEntry>> {
        Ok(self.inner.read().entries.get(&id).cloned())
    }

    fn entry_by_remote_id(&self, remote_id: i64) -> SyncResult<Option<ReadingListEntry>> {
        Ok(self
            .inner
            .read()
            .entries
            .values()
            .find(|e| e.remote_id == Some(remote_id))
            .cloned())
    }

    fn entries_for_list(&self, list_id: ReadingListId) -> SyncResult<Vec<ReadingListEntry>> {
        let mut entries: Vec<ReadingListEntry> = self
            .inner
            .read()
            .entries
            .values()
            .filter(|e| e.list_id == list_id)
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.id.0);
        Ok(entries)
    }

    fn entries_for_article(&self, key: &ArticleKey) -> SyncResult<Vec<ReadingListEntry>> {
        let mut entries: Vec<ReadingListEntry> = self
            .inner
            .read()
            .entries
            .values()
            .filter(|e| &e.article_key == key)
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.id.0);
        Ok(entries)
    }

    fn dirty_entries(&self) -> SyncResult<Vec<ReadingListEntry>> {
        let mut entries: Vec<ReadingListEntry> = self
            .inner
            .read()
            .entries
            .values()
            .filter(|e| e.is_updated_locally)
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.id.0);
        Ok(entries)
    }

    fn article(&self, key: &ArticleKey) -> SyncResult<Option<Article>> {
        Ok(self.inner.read().articles.get(key).cloned())
    }

    fn upsert_article(&self, article: Article) -> SyncResult<()> {
        self.inner.write().articles.insert(article.key.clone(), article);
        Ok(())
    }

    fn articles(&self) -> SyncResult<Vec<Article>> {
        let mut articles: Vec<Article> = self.inner.read().articles.values().cloned().collect();
        articles.sort_by(|a, b| a.key.as_str().cmp(b.key.as_str()));
        Ok(articles)
    }

    fn talk_page(&self, key: &TalkPageKey) -> SyncResult<Option<TalkPage>> {
        Ok(self.inner.read().talk_pages.get(key).cloned())
    }

    fn put_talk_page(&self, page: TalkPage) -> SyncResult<()> {
        self.inner.write().talk_pages.insert(page.key.clone(), page);
        Ok(())
    }

    fn sync_state(&self) -> SyncResult<u32> {
        Ok(self.inner.read().sync_state)
    }

    fn set_sync_state(&self, bits: u32) -> SyncResult<()> {
        self.inner.write().sync_state = bits;
        Ok(())
    }

    fn watermark(&self) -> SyncResult<Option<DateTime<Utc>>> {
        Ok(self.inner.read().watermark)
    }

    fn set_watermark(&self, watermark: DateTime<Utc>) -> SyncResult<()> {
        self.inner.write().watermark = Some(watermark);
        Ok(())
    }

    fn save(&self) -> SyncResult<()> {
        self.inner.write().save_count += 1;
        Ok(())
    }

    fn reset_working_set(&self) {
        self.inner.write().reset_count += 1;
    }
}
