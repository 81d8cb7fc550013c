//! One pass of the sync engine: flag-driven maintenance, remote-to-local
//! reconciliation, then local-to-remote push.
//!
//! ## Structure
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │  SyncCycle::run(state)                                         │
//! │  ├── local clears / resets          (flag-driven, local only)  │
//! │  ├── remote teardown / setup        (disable / enable paths)   │
//! │  ├── reconcile                                                 │
//! │  │   ├── pull: fetch_lists_since → apply_remote_lists          │
//! │  │   ├── pull: fetch_entries_since → apply_remote_entries      │
//! │  │   └── push: process_local_updates (batched, bounded)        │
//! │  └── persist watermark + state, save                           │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pull runs before push so that name-matched lists pick up their remote
//! ids first and are updated rather than re-created.
//!
//! Per-item network failures never abort the cycle: the item keeps its
//! dirty flag and is retried on the next debounced pass. Phase-level
//! failures (a fetch, setup or teardown call) end the cycle early with
//! the reason recorded in the summary; the flags they were serving stay
//! set for the next pass.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use super::membership;
use super::state::SyncState;
use crate::config::SyncConfig;
use crate::error::SyncResult;
use crate::remote::{
    EntryCreation, ListCreation, RemoteApiClient, RemoteReadingList, RemoteReadingListEntry,
};
use crate::store::LocalStore;
use crate::types::{
    canonicalize, ArticleKey, ReadingList, ReadingListEntry, ReadingListId,
};

/// Epoch floor used as the watermark when no records have been seen yet
pub(crate) fn distant_past() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

/// Whether a reconciliation pass sees the complete remote state or only
/// records changed since the watermark. Orphan deletion is only sound
/// against a complete snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reconciliation {
    Full,
    Incremental,
}

/// Counts and watermark from one finished cycle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleSummary {
    /// Remote records applied to the local store
    pub records_pulled: usize,
    /// Local creates and updates confirmed by the remote service
    pub records_pushed: usize,
    /// Local records hard-removed, after server confirmation or because
    /// they never existed server-side
    pub records_purged: usize,
    /// Per-item failures left dirty for the next cycle
    pub failures: usize,
    /// Highest remote `updated` timestamp observed this pass
    pub watermark: Option<DateTime<Utc>>,
    /// Set when a phase-level error ended the cycle early
    pub interrupted: Option<String>,
}

/// Result of a cycle: the summary plus the state the flags settled into
pub(crate) struct CycleOutcome {
    pub state: SyncState,
    pub summary: CycleSummary,
}

/// One sync pass over the store and the remote service
pub(crate) struct SyncCycle {
    store: Arc<dyn LocalStore>,
    remote: Arc<dyn RemoteApiClient>,
    config: SyncConfig,
}

impl SyncCycle {
    pub(crate) fn new(
        store: Arc<dyn LocalStore>,
        remote: Arc<dyn RemoteApiClient>,
        config: SyncConfig,
    ) -> Self {
        Self {
            store,
            remote,
            config,
        }
    }

    /// Run the cycle, consuming the flags it can satisfy.
    ///
    /// Returns `Err` only for local-store failures; everything
    /// network-shaped is folded into the summary.
    pub(crate) async fn run(&self, mut state: SyncState) -> SyncResult<CycleOutcome> {
        debug!(?state, "Sync cycle started");
        let mut summary = CycleSummary::default();

        if state.contains(SyncState::NEEDS_LOCAL_ARTICLE_CLEAR) {
            self.clear_saved_articles()?;
            state = self.clear_flags(state, SyncState::NEEDS_LOCAL_ARTICLE_CLEAR)?;
        }
        if state.contains(SyncState::NEEDS_LOCAL_LIST_CLEAR) {
            self.clear_user_lists()?;
            state = self.clear_flags(state, SyncState::NEEDS_LOCAL_LIST_CLEAR)?;
        }

        if state.intersects(SyncState::NEEDS_RANDOM_LISTS | SyncState::NEEDS_RANDOM_ENTRIES) {
            #[cfg(feature = "debug-fixtures")]
            {
                if state.contains(SyncState::NEEDS_RANDOM_LISTS) {
                    self.seed_random_lists()?;
                }
                if state.contains(SyncState::NEEDS_RANDOM_ENTRIES) {
                    self.seed_random_entries()?;
                }
            }
            state = self.clear_flags(
                state,
                SyncState::NEEDS_RANDOM_LISTS | SyncState::NEEDS_RANDOM_ENTRIES,
            )?;
        }

        if state.contains(SyncState::NEEDS_REMOTE_DISABLE) {
            if let Err(err) = self.remote.teardown().await {
                warn!(%err, "Remote teardown failed; retrying next cycle");
                summary.interrupted = Some(err.to_string());
                return Ok(CycleOutcome { state, summary });
            }
            state = self.clear_flags(state, SyncState::NEEDS_REMOTE_DISABLE)?;
        }

        if state.contains(SyncState::NEEDS_LOCAL_RESET) {
            self.reset_local_lists()?;
            state = self.clear_flags(state, SyncState::NEEDS_LOCAL_RESET)?;
        }

        if state.contains(SyncState::NEEDS_REMOTE_ENABLE) {
            if let Err(err) = self.remote.setup().await {
                warn!(%err, "Remote setup failed; retrying next cycle");
                summary.interrupted = Some(err.to_string());
                return Ok(CycleOutcome { state, summary });
            }
            state = self.clear_flags(state, SyncState::NEEDS_REMOTE_ENABLE)?;
        }

        if state.contains(SyncState::NEEDS_SYNC) {
            match self.reconcile(Reconciliation::Full, &mut summary).await {
                Ok(()) => {
                    state.remove(SyncState::NEEDS_SYNC);
                    state.insert(SyncState::NEEDS_UPDATE);
                    self.store.set_sync_state(state.bits())?;
                }
                Err(err) => {
                    warn!(%err, "Full sync failed; retrying next cycle");
                    summary.interrupted = Some(err.to_string());
                    return Ok(CycleOutcome { state, summary });
                }
            }
        } else if state.contains(SyncState::NEEDS_UPDATE) {
            if let Err(err) = self.reconcile(Reconciliation::Incremental, &mut summary).await {
                warn!(%err, "Incremental sync failed; retrying next cycle");
                summary.interrupted = Some(err.to_string());
                return Ok(CycleOutcome { state, summary });
            }
        }

        self.store.save()?;
        info!(
            pulled = summary.records_pulled,
            pushed = summary.records_pushed,
            purged = summary.records_purged,
            failures = summary.failures,
            "Sync cycle finished"
        );
        Ok(CycleOutcome { state, summary })
    }

    fn clear_flags(&self, mut state: SyncState, flags: SyncState) -> SyncResult<SyncState> {
        state.remove(flags);
        self.store.set_sync_state(state.bits())?;
        Ok(state)
    }

    // ── Flag-driven local maintenance ──────────────────────────────────

    /// Remove every saved-article trace: all entries, all counts, all
    /// derived saved state
    fn clear_saved_articles(&self) -> SyncResult<()> {
        for mut list in self.store.lists()? {
            for entry in self.store.entries_for_list(list.id)? {
                self.store.delete_entry(entry.id)?;
            }
            if list.entry_count != 0 {
                list.entry_count = 0;
                self.store.update_list(&list)?;
            }
        }
        for mut article in self.store.articles()? {
            if article.saved_at.is_some() {
                article.saved_at = None;
                self.store.upsert_article(article)?;
            }
        }
        self.store.save()?;
        Ok(())
    }

    /// Delete every non-default list (and its entries) locally
    fn clear_user_lists(&self) -> SyncResult<()> {
        for list in self.store.lists()? {
            if !list.is_default {
                self.purge_list(&list)?;
            }
        }
        self.store.save()?;
        Ok(())
    }

    /// Return all lists and entries to the unsynced state: remote ids
    /// stripped, dirty flags cleared, watermark floored
    fn reset_local_lists(&self) -> SyncResult<()> {
        for mut list in self.store.lists()? {
            list.reset_to_unsynced();
            self.store.update_list(&list)?;
            for mut entry in self.store.entries_for_list(list.id)? {
                entry.remote_id = None;
                entry.is_updated_locally = false;
                self.store.update_entry(&entry)?;
            }
        }
        self.store.set_watermark(distant_past())?;
        self.store.save()?;
        Ok(())
    }

    /// Hard-remove a list with its entries, keeping derived article
    /// state consistent
    fn purge_list(&self, list: &ReadingList) -> SyncResult<()> {
        let mut touched: HashSet<ArticleKey> = HashSet::new();
        for entry in self.store.entries_for_list(list.id)? {
            self.store.delete_entry(entry.id)?;
            touched.insert(entry.article_key);
        }
        self.store.delete_list(list.id)?;
        for key in &touched {
            membership::recompute_article_state(self.store.as_ref(), key)?;
        }
        Ok(())
    }

    #[cfg(feature = "debug-fixtures")]
    fn seed_random_lists(&self) -> SyncResult<()> {
        use rand::distr::Alphanumeric;
        use rand::Rng;
        let mut rng = rand::rng();
        for _ in 0..8 {
            let suffix: String = (&mut rng)
                .sample_iter(Alphanumeric)
                .take(10)
                .map(char::from)
                .collect();
            self.store
                .insert_list(ReadingList::new(format!("List {}", suffix), "Seeded"))?;
        }
        self.store.save()?;
        Ok(())
    }

    #[cfg(feature = "debug-fixtures")]
    fn seed_random_entries(&self) -> SyncResult<()> {
        use rand::Rng;
        let mut rng = rand::rng();
        for list in self.store.lists()? {
            if list.is_deleted_locally {
                continue;
            }
            for _ in 0..rng.random_range(1..=5) {
                let title = format!("Seed_{}", rng.random_range(0..100_000u32));
                let key = ArticleKey::new("en.wikipedia.org", &title);
                self.store
                    .insert_entry(ReadingListEntry::new(list.id, key, title))?;
            }
            membership::refresh_entry_count(self.store.as_ref(), list.id)?;
        }
        self.store.save()?;
        Ok(())
    }

    // ── Reconciliation ─────────────────────────────────────────────────

    async fn reconcile(
        &self,
        mode: Reconciliation,
        summary: &mut CycleSummary,
    ) -> SyncResult<()> {
        let since = match mode {
            Reconciliation::Full => distant_past(),
            Reconciliation::Incremental => self.store.watermark()?.unwrap_or_else(distant_past),
        };

        let remote_lists = self.remote.fetch_lists_since(since).await?;
        let mut watermark = self.apply_remote_lists(&remote_lists, mode, summary)?;

        for list in self.store.lists()? {
            if list.is_deleted_locally {
                continue;
            }
            let Some(remote_id) = list.remote_id else {
                continue;
            };
            let remote_entries = self.remote.fetch_entries_since(remote_id, since).await?;
            let entry_watermark =
                self.apply_remote_entries(&list, &remote_entries, mode, summary)?;
            watermark = watermark.max(entry_watermark);
        }

        self.process_local_updates(summary).await?;

        if watermark > distant_past() {
            self.store.set_watermark(watermark)?;
            summary.watermark = Some(watermark);
        }
        Ok(())
    }

    /// Remote-to-local pass over lists: match by remote id, then by
    /// canonical name; remote `deleted` wins; unmatched remote records
    /// are inserted; in full mode, local records bound to a server id
    /// the snapshot no longer contains are orphans and removed.
    ///
    /// Returns the highest `updated` timestamp seen (the next
    /// incremental watermark), or the epoch floor if no records came.
    fn apply_remote_lists(
        &self,
        remotes: &[RemoteReadingList],
        mode: Reconciliation,
        summary: &mut CycleSummary,
    ) -> SyncResult<DateTime<Utc>> {
        let mut watermark = distant_past();
        let mut matched: HashSet<ReadingListId> = HashSet::new();

        for remote in remotes {
            watermark = watermark.max(remote.updated);

            let local = match self.store.list_by_remote_id(remote.id)? {
                Some(list) => Some(list),
                // fall back to name matching only for lists the server
                // has never confirmed
                None => self
                    .store
                    .list_by_canonical_name(&canonicalize(&remote.name))?
                    .filter(|l| l.remote_id.is_none()),
            };

            if remote.deleted {
                if let Some(local) = local {
                    self.purge_list(&local)?;
                    summary.records_pulled += 1;
                }
                continue;
            }

            match local {
                Some(mut local) => {
                    matched.insert(local.id);
                    local.remote_id = Some(remote.id);
                    if !local.is_updated_locally {
                        // remote wins only while no local edits are pending
                        local.name = remote.name.clone();
                        local.canonical_name = canonicalize(&remote.name);
                        local.description = remote.description.clone();
                        local.is_default = remote.is_default;
                        local.updated = remote.updated;
                    }
                    self.store.update_list(&local)?;
                    summary.records_pulled += 1;
                }
                None => {
                    let local = list_from_remote(remote);
                    matched.insert(local.id);
                    self.store.insert_list(local)?;
                    summary.records_pulled += 1;
                }
            }
        }

        if mode == Reconciliation::Full {
            for list in self.store.lists()? {
                if list.remote_id.is_some() && !matched.contains(&list.id) {
                    debug!(list = %list.id, "Removing orphaned list absent from remote snapshot");
                    self.purge_list(&list)?;
                }
            }
        }

        membership::enforce_default_uniqueness(self.store.as_ref())?;
        Ok(watermark)
    }

    /// Remote-to-local pass over one list's entries: match by remote id,
    /// then by article key within the list
    fn apply_remote_entries(
        &self,
        list: &ReadingList,
        remotes: &[RemoteReadingListEntry],
        mode: Reconciliation,
        summary: &mut CycleSummary,
    ) -> SyncResult<DateTime<Utc>> {
        let mut watermark = distant_past();
        let mut matched: HashSet<crate::types::EntryId> = HashSet::new();
        let mut touched: HashSet<ArticleKey> = HashSet::new();

        for remote in remotes {
            watermark = watermark.max(remote.updated);
            let key = ArticleKey::new(&remote.project, &remote.title);

            let local = match self.store.entry_by_remote_id(remote.id)? {
                Some(entry) => Some(entry),
                None => self
                    .store
                    .entries_for_list(list.id)?
                    .into_iter()
                    .find(|e| {
                        !e.is_deleted_locally && e.remote_id.is_none() && e.article_key == key
                    }),
            };

            if remote.deleted {
                if let Some(entry) = local {
                    self.store.delete_entry(entry.id)?;
                    touched.insert(entry.article_key);
                    summary.records_pulled += 1;
                }
                continue;
            }

            match local {
                Some(mut entry) => {
                    matched.insert(entry.id);
                    entry.remote_id = Some(remote.id);
                    self.store.update_entry(&entry)?;
                    summary.records_pulled += 1;
                }
                None => {
                    let mut entry = ReadingListEntry::new(
                        list.id,
                        key.clone(),
                        remote.title.replace('_', " "),
                    );
                    entry.remote_id = Some(remote.id);
                    entry.is_updated_locally = false;
                    entry.created = remote.created;
                    matched.insert(entry.id);
                    touched.insert(key);
                    self.store.insert_entry(entry)?;
                    summary.records_pulled += 1;
                }
            }
        }

        if mode == Reconciliation::Full {
            for entry in self.store.entries_for_list(list.id)? {
                if entry.remote_id.is_some() && !matched.contains(&entry.id) {
                    debug!(entry = %entry.id, "Removing orphaned entry absent from remote snapshot");
                    self.store.delete_entry(entry.id)?;
                    touched.insert(entry.article_key);
                }
            }
        }

        for key in &touched {
            membership::recompute_article_state(self.store.as_ref(), key)?;
        }
        membership::refresh_entry_count(self.store.as_ref(), list.id)?;
        Ok(watermark)
    }

    // ── Local-to-remote push ───────────────────────────────────────────

    async fn process_local_updates(&self, summary: &mut CycleSummary) -> SyncResult<()> {
        self.push_list_updates(summary).await?;
        self.push_entry_updates(summary).await?;
        Ok(())
    }

    async fn push_list_updates(&self, summary: &mut CycleSummary) -> SyncResult<()> {
        let mut to_create: Vec<ReadingList> = Vec::new();
        let mut to_update: Vec<ReadingList> = Vec::new();
        let mut to_delete: Vec<(ReadingListId, i64)> = Vec::new();

        for list in self.store.dirty_lists()? {
            if list.is_deleted_locally {
                match list.remote_id {
                    // never existed server-side
                    None => {
                        self.purge_list(&list)?;
                        summary.records_purged += 1;
                    }
                    Some(remote_id) => to_delete.push((list.id, remote_id)),
                }
            } else if list.remote_id.is_some() {
                to_update.push(list);
            } else {
                to_create.push(list);
            }
        }

        // deletes: bounded fan-out, local purge only on confirmation
        for chunk in to_delete.chunks(self.config.batch_request_limit) {
            let mut batch = JoinSet::new();
            for (local_id, remote_id) in chunk.iter().copied() {
                let remote = Arc::clone(&self.remote);
                batch.spawn(async move { (local_id, remote.delete_list(remote_id).await) });
            }
            while let Some(joined) = batch.join_next().await {
                match joined {
                    Ok((local_id, Ok(()))) => {
                        if let Some(list) = self.store.list(local_id)? {
                            self.purge_list(&list)?;
                        }
                        summary.records_purged += 1;
                    }
                    Ok((local_id, Err(err))) => {
                        warn!(list = %local_id, %err, "Remote list delete failed; retrying next cycle");
                        summary.failures += 1;
                    }
                    Err(err) => {
                        warn!(%err, "List delete task failed to join");
                        summary.failures += 1;
                    }
                }
            }
            // bound memory while flushing large deletion sets
            self.store.save()?;
            self.store.reset_working_set();
        }

        // updates: bounded fan-out
        for chunk in to_update.chunks(self.config.batch_request_limit) {
            let mut batch = JoinSet::new();
            for list in chunk {
                let Some(remote_id) = list.remote_id else {
                    continue;
                };
                let remote = Arc::clone(&self.remote);
                let list = list.clone();
                batch.spawn(async move {
                    let result = remote
                        .update_list(remote_id, &list.name, &list.description)
                        .await;
                    (list, result)
                });
            }
            while let Some(joined) = batch.join_next().await {
                match joined {
                    Ok((mut list, Ok(()))) => {
                        list.is_updated_locally = false;
                        self.store.update_list(&list)?;
                        summary.records_pushed += 1;
                    }
                    Ok((list, Err(err))) => {
                        warn!(list = %list.id, %err, "Remote list update failed; retrying next cycle");
                        summary.failures += 1;
                    }
                    Err(err) => {
                        warn!(%err, "List update task failed to join");
                        summary.failures += 1;
                    }
                }
            }
        }

        // creates: one batch call; response ids are positionally aligned
        if !to_create.is_empty() {
            let payload: Vec<ListCreation> = to_create
                .iter()
                .map(|l| ListCreation {
                    name: l.name.clone(),
                    description: l.description.clone(),
                })
                .collect();
            match self.remote.create_lists(&payload).await {
                Ok(ids) if ids.len() == to_create.len() => {
                    for (mut list, remote_id) in to_create.into_iter().zip(ids) {
                        list.remote_id = Some(remote_id);
                        list.is_updated_locally = false;
                        self.store.update_list(&list)?;
                        summary.records_pushed += 1;
                    }
                }
                Ok(ids) => {
                    warn!(
                        requested = to_create.len(),
                        returned = ids.len(),
                        "Create-lists response misaligned; lists stay dirty"
                    );
                    summary.failures += to_create.len();
                }
                Err(err) => {
                    warn!(%err, count = to_create.len(), "Batch list creation failed; lists stay dirty");
                    summary.failures += to_create.len();
                }
            }
        }

        Ok(())
    }

    async fn push_entry_updates(&self, summary: &mut CycleSummary) -> SyncResult<()> {
        let mut to_create: Vec<ReadingListEntry> = Vec::new();
        let mut to_delete: Vec<(ReadingListEntry, i64, i64)> = Vec::new();

        for mut entry in self.store.dirty_entries()? {
            if entry.is_deleted_locally {
                let list_remote_id = self
                    .store
                    .list(entry.list_id)?
                    .and_then(|l| l.remote_id);
                match (entry.remote_id, list_remote_id) {
                    (Some(entry_remote_id), Some(list_remote_id)) => {
                        to_delete.push((entry, list_remote_id, entry_remote_id));
                    }
                    // never existed server-side
                    _ => {
                        self.store.delete_entry(entry.id)?;
                        membership::recompute_article_state(
                            self.store.as_ref(),
                            &entry.article_key,
                        )?;
                        membership::refresh_entry_count(self.store.as_ref(), entry.list_id)?;
                        summary.records_purged += 1;
                    }
                }
            } else if entry.remote_id.is_none() {
                to_create.push(entry);
            } else {
                // entries are immutable server-side once created
                entry.is_updated_locally = false;
                self.store.update_entry(&entry)?;
            }
        }

        // deletes: bounded fan-out, save-and-reset after every batch
        for chunk in to_delete.chunks(self.config.batch_request_limit) {
            let mut batch = JoinSet::new();
            for (entry, list_remote_id, entry_remote_id) in chunk.iter().cloned() {
                let remote = Arc::clone(&self.remote);
                batch.spawn(async move {
                    let result = remote.remove_entry(list_remote_id, entry_remote_id).await;
                    (entry, result)
                });
            }
            while let Some(joined) = batch.join_next().await {
                match joined {
                    Ok((entry, Ok(()))) => {
                        self.store.delete_entry(entry.id)?;
                        membership::recompute_article_state(
                            self.store.as_ref(),
                            &entry.article_key,
                        )?;
                        membership::refresh_entry_count(self.store.as_ref(), entry.list_id)?;
                        summary.records_purged += 1;
                    }
                    Ok((entry, Err(err))) => {
                        warn!(entry = %entry.id, %err, "Remote entry delete failed; retrying next cycle");
                        summary.failures += 1;
                    }
                    Err(err) => {
                        warn!(%err, "Entry delete task failed to join");
                        summary.failures += 1;
                    }
                }
            }
            self.store.save()?;
            self.store.reset_working_set();
        }

        // creates: grouped per owning list, chunked by the batch limit;
        // each chunk is one API call with positionally aligned ids
        let mut by_list: BTreeMap<ReadingListId, Vec<ReadingListEntry>> = BTreeMap::new();
        for entry in to_create {
            by_list.entry(entry.list_id).or_default().push(entry);
        }
        for (list_id, entries) in by_list {
            let Some(list) = self.store.list(list_id)? else {
                warn!(list = %list_id, "Dirty entries reference a missing list");
                summary.failures += entries.len();
                continue;
            };
            let Some(list_remote_id) = list.remote_id else {
                // the owning list has not been created remotely yet
                // (for instance its create failed this cycle); the
                // entries stay dirty and flush once the list has an id
                debug!(list = %list_id, pending = entries.len(), "Deferring entry creation until list is created remotely");
                continue;
            };
            for chunk in entries.chunks(self.config.batch_request_limit) {
                let payload: Vec<EntryCreation> = chunk
                    .iter()
                    .map(|e| EntryCreation {
                        project: e.article_key.project().to_string(),
                        title: e.article_key.title().to_string(),
                    })
                    .collect();
                match self.remote.add_entries(list_remote_id, &payload).await {
                    Ok(ids) if ids.len() == chunk.len() => {
                        for (entry, remote_id) in chunk.iter().zip(ids) {
                            let mut entry = entry.clone();
                            entry.remote_id = Some(remote_id);
                            entry.is_updated_locally = false;
                            self.store.update_entry(&entry)?;
                            summary.records_pushed += 1;
                        }
                    }
                    Ok(ids) => {
                        warn!(
                            requested = chunk.len(),
                            returned = ids.len(),
                            "Add-entries response misaligned; entries stay dirty"
                        );
                        summary.failures += chunk.len();
                    }
                    Err(err) => {
                        warn!(%err, list = %list_id, count = chunk.len(), "Batch entry creation failed; entries stay dirty");
                        summary.failures += chunk.len();
                    }
                }
            }
        }

        Ok(())
    }
}

fn list_from_remote(remote: &RemoteReadingList) -> ReadingList {
    ReadingList {
        id: ReadingListId::new(),
        remote_id: Some(remote.id),
        name: remote.name.clone(),
        canonical_name: canonicalize(&remote.name),
        description: remote.description.clone(),
        created: remote.created,
        updated: remote.updated,
        is_default: remote.is_default,
        is_deleted_locally: false,
        is_updated_locally: false,
        entry_count: 0,
    }
}
