//! Public surface of the reading-list sync engine.
//!
//! `ReadingListsController` owns the sync-state bitset, the debounce
//! and periodic triggers, and the single-flight gate around the cycle.
//! Every mutating operation has a synchronous local effect (validated
//! up front, saved in one pass) followed by an asynchronous network
//! follow-through on the next debounced cycle.
//!
//! ## Triggering
//!
//! Any mutating user action and a periodic 15-second timer (while
//! started) call [`ReadingListsController::sync`]. The call is
//! debounced: a pending dispatch is cancelled and rescheduled, so a
//! burst of edits coalesces into one network pass. At most one cycle
//! runs at a time; a trigger arriving while one is in flight is dropped
//! rather than queued, because the next debounce tick naturally picks
//! up whatever state the running cycle missed.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::cycle::{CycleSummary, SyncCycle};
use super::events::SyncEvent;
use super::membership;
use super::state::SyncState;
use crate::config::SyncConfig;
use crate::error::{SyncError, SyncResult};
use crate::remote::RemoteApiClient;
use crate::store::LocalStore;
use crate::types::{canonicalize, Article, ArticleKey, ReadingList, ReadingListEntry, ReadingListId};

/// Display name given to the lazily created default list
const DEFAULT_LIST_NAME: &str = "Saved";

/// Coordinator for reading-list state and synchronization
pub struct ReadingListsController {
    store: Arc<dyn LocalStore>,
    remote: Arc<dyn RemoteApiClient>,
    config: SyncConfig,
    state: Mutex<SyncState>,
    event_tx: broadcast::Sender<SyncEvent>,
    cycle_in_flight: AtomicBool,
    debounce_task: Mutex<Option<JoinHandle<()>>>,
    periodic_task: Mutex<Option<JoinHandle<()>>>,
    /// Self-reference handed to spawned trigger tasks; never keeps the
    /// controller alive on its own
    weak: Weak<ReadingListsController>,
}

impl ReadingListsController {
    /// Create a controller over the given collaborators, restoring the
    /// persisted sync state
    pub fn new(
        store: Arc<dyn LocalStore>,
        remote: Arc<dyn RemoteApiClient>,
        config: SyncConfig,
    ) -> SyncResult<Arc<Self>> {
        let state = SyncState::from_bits_truncate(store.sync_state()?);
        let (event_tx, _) = broadcast::channel(config.event_capacity);
        Ok(Arc::new_cyclic(|weak| Self {
            store,
            remote,
            config,
            state: Mutex::new(state),
            event_tx,
            cycle_in_flight: AtomicBool::new(false),
            debounce_task: Mutex::new(None),
            periodic_task: Mutex::new(None),
            weak: weak.clone(),
        }))
    }

    /// Subscribe to sync events
    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.event_tx.subscribe()
    }

    /// Current sync-state flags
    pub fn state(&self) -> SyncState {
        *self.state.lock()
    }

    /// Whether sync is enabled (a full or incremental pass is pending
    /// or active)
    pub fn is_sync_enabled(&self) -> bool {
        self.state.lock().is_sync_enabled()
    }

    // ═══════════════════════════════════════════════════════════════════
    // List operations
    // ═══════════════════════════════════════════════════════════════════

    /// Create a reading list, optionally seeding it with articles.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::ListExistsWithTheSameName`] if a non-deleted
    /// list with the same canonical name exists;
    /// [`SyncError::UnableToCreateList`] if the name is empty. Neither
    /// mutates any state.
    pub fn create_reading_list(
        &self,
        name: &str,
        description: &str,
        articles: &[Article],
    ) -> SyncResult<ReadingList> {
        let canonical = canonicalize(name);
        if canonical.is_empty() {
            return Err(SyncError::UnableToCreateList);
        }
        if self.store.list_by_canonical_name(&canonical)?.is_some() {
            return Err(SyncError::ListExistsWithTheSameName(name.to_string()));
        }

        let list = ReadingList::new(name, description);
        self.store.insert_list(list.clone())?;
        self.add_articles_internal(articles, &list)?;
        self.store.save()?;
        info!(list = %list.id, name, "Created reading list");
        self.sync();
        self.store.list(list.id)?.ok_or(SyncError::UnableToCreateList)
    }

    /// Rename a list and/or replace its description.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::ListExistsWithTheSameName`] if the new name
    /// collides with another non-deleted list;
    /// [`SyncError::UnableToUpdateList`] if the list does not exist.
    pub fn update_reading_list(
        &self,
        id: ReadingListId,
        new_name: Option<&str>,
        new_description: Option<&str>,
    ) -> SyncResult<()> {
        let mut list = self.store.list(id)?.ok_or(SyncError::UnableToUpdateList)?;

        if let Some(name) = new_name {
            let canonical = canonicalize(name);
            if let Some(other) = self.store.list_by_canonical_name(&canonical)? {
                if other.id != id {
                    return Err(SyncError::ListExistsWithTheSameName(name.to_string()));
                }
            }
            list.rename(name);
        }
        if let Some(description) = new_description {
            list.description = description.to_string();
            list.mark_updated();
        }

        self.store.update_list(&list)?;
        self.store.save()?;
        self.sync();
        Ok(())
    }

    /// Soft-delete lists pending server confirmation.
    ///
    /// The whole operation is validated before any mutation: an unknown
    /// id or the default list aborts with no state change.
    pub fn delete_reading_lists(&self, ids: &[ReadingListId]) -> SyncResult<()> {
        let mut lists = Vec::with_capacity(ids.len());
        for id in ids {
            let list = self.store.list(*id)?.ok_or(SyncError::UnableToDeleteList)?;
            if list.is_default {
                return Err(SyncError::CannotDeleteDefaultList);
            }
            lists.push(list);
        }

        let mut touched: HashSet<ArticleKey> = HashSet::new();
        for mut list in lists {
            for mut entry in self.store.entries_for_list(list.id)? {
                if entry.is_deleted_locally {
                    continue;
                }
                entry.is_deleted_locally = true;
                entry.is_updated_locally = true;
                touched.insert(entry.article_key.clone());
                self.store.update_entry(&entry)?;
            }
            list.is_deleted_locally = true;
            list.mark_updated();
            list.entry_count = 0;
            self.store.update_list(&list)?;
            info!(list = %list.id, "Deleted reading list");
        }
        for key in &touched {
            membership::recompute_article_state(self.store.as_ref(), key)?;
        }
        self.store.save()?;
        self.sync();
        Ok(())
    }

    /// Look up a non-deleted list by display name.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::ListWithProvidedNameNotFound`] when no list
    /// matches.
    pub fn reading_list_named(&self, name: &str) -> SyncResult<ReadingList> {
        self.store
            .list_by_canonical_name(&canonicalize(name))?
            .ok_or_else(|| SyncError::ListWithProvidedNameNotFound(name.to_string()))
    }

    /// The single default list, created lazily on first use
    pub fn default_list(&self) -> SyncResult<ReadingList> {
        membership::enforce_default_uniqueness(self.store.as_ref())?;
        if let Some(list) = self.store.default_list()? {
            return Ok(list);
        }
        let mut list = ReadingList::new(DEFAULT_LIST_NAME, "Articles you save");
        list.is_default = true;
        self.store.insert_list(list.clone())?;
        self.store.save()?;
        debug!(list = %list.id, "Created default list");
        Ok(list)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Membership operations
    // ═══════════════════════════════════════════════════════════════════

    /// Add articles to a list, deduplicating by article key, within one
    /// local transaction.
    pub fn add_articles_to_list(
        &self,
        articles: &[Article],
        list_id: ReadingListId,
    ) -> SyncResult<()> {
        let list = self.store.list(list_id)?.ok_or(SyncError::UnableToAddEntry)?;
        if list.is_deleted_locally {
            return Err(SyncError::UnableToAddEntry);
        }
        self.add_articles_internal(articles, &list)?;
        self.store.save()?;
        self.sync();
        Ok(())
    }

    /// Remove articles from a list (soft-delete of their entries).
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::UnableToRemoveEntry`] if the list does not
    /// exist.
    pub fn remove_articles_from_list(
        &self,
        articles: &[Article],
        list_id: ReadingListId,
    ) -> SyncResult<()> {
        if self.store.list(list_id)?.is_none() {
            return Err(SyncError::UnableToRemoveEntry);
        }
        let keys: HashSet<&ArticleKey> = articles.iter().map(|a| &a.key).collect();
        for mut entry in self.store.entries_for_list(list_id)? {
            if entry.is_deleted_locally || !keys.contains(&entry.article_key) {
                continue;
            }
            entry.is_deleted_locally = true;
            entry.is_updated_locally = true;
            self.store.update_entry(&entry)?;
        }
        membership::refresh_entry_count(self.store.as_ref(), list_id)?;
        for article in articles {
            membership::recompute_article_state(self.store.as_ref(), &article.key)?;
        }
        self.store.save()?;
        self.sync();
        Ok(())
    }

    /// Save an article to the default list
    pub fn save_article(&self, article: &Article) -> SyncResult<()> {
        let list = self.default_list()?;
        self.add_articles_to_list(std::slice::from_ref(article), list.id)
    }

    /// Remove an article from every list it belongs to
    pub fn unsave_article(&self, key: &ArticleKey) -> SyncResult<()> {
        let mut touched_lists: HashSet<ReadingListId> = HashSet::new();
        for mut entry in self.store.entries_for_article(key)? {
            if entry.is_deleted_locally {
                continue;
            }
            entry.is_deleted_locally = true;
            entry.is_updated_locally = true;
            touched_lists.insert(entry.list_id);
            self.store.update_entry(&entry)?;
        }
        for list_id in &touched_lists {
            membership::refresh_entry_count(self.store.as_ref(), *list_id)?;
        }
        membership::recompute_article_state(self.store.as_ref(), key)?;
        self.store.save()?;
        self.sync();
        Ok(())
    }

    /// Shared insert path: dedupe against existing membership, insert
    /// dirty entries, keep counts and saved state consistent
    fn add_articles_internal(&self, articles: &[Article], list: &ReadingList) -> SyncResult<()> {
        if articles.is_empty() {
            return Ok(());
        }
        let existing: HashSet<ArticleKey> = self
            .store
            .entries_for_list(list.id)?
            .into_iter()
            .filter(|e| !e.is_deleted_locally)
            .map(|e| e.article_key)
            .collect();

        for article in articles {
            if existing.contains(&article.key) {
                continue;
            }
            if self.store.article(&article.key)?.is_none() {
                self.store.upsert_article(article.clone())?;
            }
            let entry = ReadingListEntry::new(
                list.id,
                article.key.clone(),
                article.display_title.clone(),
            );
            self.store.insert_entry(entry)?;
        }
        membership::refresh_entry_count(self.store.as_ref(), list.id)?;
        for article in articles {
            membership::recompute_article_state(self.store.as_ref(), &article.key)?;
        }
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Sync control
    // ═══════════════════════════════════════════════════════════════════

    /// Enable or disable sync, with optional destructive resets.
    ///
    /// Computes the new flag set through the named transitions, writes
    /// it only if it changed, emits [`SyncEvent::StateChanged`] and
    /// triggers a cycle. Disabling strips remote ids from local lists
    /// rather than deleting them, unless deletion was asked for.
    pub fn set_sync_enabled(
        &self,
        enabled: bool,
        delete_local: bool,
        delete_remote: bool,
    ) -> SyncResult<()> {
        if enabled == self.is_sync_enabled() && !delete_local && !delete_remote {
            debug!(enabled, "Sync already in requested state");
            return Ok(());
        }

        let new_state = if enabled {
            SyncState::for_enable(delete_local)
        } else {
            SyncState::for_disable(delete_remote)
        };

        {
            let mut state = self.state.lock();
            if *state == new_state {
                return Ok(());
            }
            *state = new_state;
        }
        self.store.set_sync_state(new_state.bits())?;
        self.store.save()?;
        info!(?new_state, enabled, "Sync state changed");
        let _ = self.event_tx.send(SyncEvent::StateChanged { state: new_state });
        self.sync();
        Ok(())
    }

    /// Start the periodic sync trigger
    pub fn start(&self) {
        let mut slot = self.periodic_task.lock();
        if slot.is_some() {
            debug!("Sync already started");
            return;
        }
        let weak = self.weak.clone();
        let interval = self.config.periodic_interval;
        *slot = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // the first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(controller) = weak.upgrade() else {
                    break;
                };
                controller.sync();
            }
        }));
        info!("Reading list sync started");
    }

    /// Stop the periodic trigger and cancel any pending debounced
    /// dispatch. An already-running cycle finishes; there is no
    /// mid-cycle cancellation.
    pub fn stop(&self) {
        if let Some(handle) = self.periodic_task.lock().take() {
            handle.abort();
        }
        if let Some(handle) = self.debounce_task.lock().take() {
            handle.abort();
        }
        info!("Reading list sync stopped");
    }

    /// Trigger a debounced sync cycle.
    ///
    /// A pending dispatch is cancelled and rescheduled, coalescing
    /// bursts of edits into one network pass.
    pub fn sync(&self) {
        let mut slot = self.debounce_task.lock();
        if let Some(pending) = slot.take() {
            pending.abort();
        }
        let weak = self.weak.clone();
        let debounce = self.config.debounce;
        *slot = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            if let Some(controller) = weak.upgrade() {
                controller.dispatch_cycle();
            }
        }));
    }

    /// Run one cycle immediately, bypassing the debounce. For callers
    /// that need completion feedback (pull-to-refresh, tests).
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Generic`] if a cycle is already in flight.
    pub async fn sync_now(&self) -> SyncResult<CycleSummary> {
        if self
            .cycle_in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(SyncError::Generic("a sync cycle is already running".to_string()));
        }
        let result = self.run_cycle().await;
        self.cycle_in_flight.store(false, Ordering::SeqCst);
        result
    }

    /// Dispatch a cycle onto a background task unless one is in flight
    fn dispatch_cycle(&self) {
        if self
            .cycle_in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("Sync cycle already in flight; trigger dropped");
            return;
        }
        let Some(controller) = self.weak.upgrade() else {
            self.cycle_in_flight.store(false, Ordering::SeqCst);
            return;
        };
        tokio::spawn(async move {
            if let Err(err) = controller.run_cycle().await {
                warn!(%err, "Sync cycle failed");
            }
            controller.cycle_in_flight.store(false, Ordering::SeqCst);
        });
    }

    /// Execute one cycle against the current state and apply its
    /// outcome. Callers hold the single-flight gate.
    async fn run_cycle(&self) -> SyncResult<CycleSummary> {
        let state = *self.state.lock();
        let cycle = SyncCycle::new(
            Arc::clone(&self.store),
            Arc::clone(&self.remote),
            self.config.clone(),
        );
        match cycle.run(state).await {
            Ok(outcome) => {
                *self.state.lock() = outcome.state;
                if let Some(reason) = &outcome.summary.interrupted {
                    let _ = self.event_tx.send(SyncEvent::CycleFailed {
                        message: reason.clone(),
                    });
                } else {
                    let _ = self.event_tx.send(SyncEvent::CycleCompleted {
                        summary: outcome.summary.clone(),
                    });
                }
                Ok(outcome.summary)
            }
            Err(err) => {
                let _ = self.event_tx.send(SyncEvent::CycleFailed {
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }
}

impl Drop for ReadingListsController {
    fn drop(&mut self) {
        if let Some(handle) = self.periodic_task.lock().take() {
            handle.abort();
        }
        if let Some(handle) = self.debounce_task.lock().take() {
            handle.abort();
        }
    }
}
