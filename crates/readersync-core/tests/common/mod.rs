//! Shared fixtures for integration tests: an in-memory remote service
//! with switchable failure modes and a call log.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use readersync_core::{
    EntryCreation, ListCreation, RemoteApiClient, RemoteReadingList, RemoteReadingListEntry,
    SyncError, SyncResult, TalkPageSnapshot,
};

/// Install a test subscriber once; respects RUST_LOG
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Default)]
struct ServerState {
    lists: HashMap<i64, RemoteReadingList>,
    entries: HashMap<i64, RemoteReadingListEntry>,
}

/// In-memory stand-in for the remote reading-list service
pub struct MockRemoteClient {
    state: Mutex<ServerState>,
    next_id: AtomicI64,
    calls: Mutex<Vec<String>>,
    talk_snapshot: Mutex<Option<TalkPageSnapshot>>,
    talk_fetches: AtomicUsize,
    pub fail_create_lists: AtomicBool,
    pub fail_add_entries: AtomicBool,
    pub fail_delete_list: AtomicBool,
    pub fail_remove_entry: AtomicBool,
}

impl MockRemoteClient {
    pub fn new() -> Self {
        init_tracing();
        Self {
            state: Mutex::new(ServerState::default()),
            next_id: AtomicI64::new(1),
            calls: Mutex::new(Vec::new()),
            talk_snapshot: Mutex::new(None),
            talk_fetches: AtomicUsize::new(0),
            fail_create_lists: AtomicBool::new(false),
            fail_add_entries: AtomicBool::new(false),
            fail_delete_list: AtomicBool::new(false),
            fail_remove_entry: AtomicBool::new(false),
        }
    }

    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().push(call.into());
    }

    /// Number of recorded calls whose name matches `prefix`
    pub fn call_count(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    /// Full call log, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// Seed a list on the fake server, returning its id
    pub fn seed_list(&self, name: &str, is_default: bool, deleted: bool) -> i64 {
        let id = self.next_id();
        self.state.lock().lists.insert(
            id,
            RemoteReadingList {
                id,
                name: name.to_string(),
                description: String::new(),
                is_default,
                deleted,
                created: Utc::now(),
                updated: Utc::now(),
            },
        );
        id
    }

    /// Seed an entry on the fake server, returning its id
    pub fn seed_entry(&self, list_id: i64, project: &str, title: &str, deleted: bool) -> i64 {
        let id = self.next_id();
        self.state.lock().entries.insert(
            id,
            RemoteReadingListEntry {
                id,
                list_id,
                project: project.to_string(),
                title: title.to_string(),
                deleted,
                created: Utc::now(),
                updated: Utc::now(),
            },
        );
        id
    }

    /// Set the snapshot served by `fetch_talk_page`
    pub fn set_talk_snapshot(&self, snapshot: TalkPageSnapshot) {
        *self.talk_snapshot.lock() = Some(snapshot);
    }

    /// Number of talk-page fetches served so far
    pub fn talk_fetches(&self) -> usize {
        self.talk_fetches.load(Ordering::SeqCst)
    }

    /// Number of lists currently on the fake server (deleted included)
    pub fn server_list_count(&self) -> usize {
        self.state.lock().lists.len()
    }
}

#[async_trait]
impl RemoteApiClient for MockRemoteClient {
    async fn setup(&self) -> SyncResult<()> {
        self.record("setup");
        Ok(())
    }

    async fn teardown(&self) -> SyncResult<()> {
        self.record("teardown");
        let mut state = self.state.lock();
        state.lists.clear();
        state.entries.clear();
        Ok(())
    }

    async fn create_lists(&self, lists: &[ListCreation]) -> SyncResult<Vec<i64>> {
        self.record(format!("create_lists:{}", lists.len()));
        if self.fail_create_lists.load(Ordering::SeqCst) {
            return Err(SyncError::Network("create_lists unavailable".to_string()));
        }
        let mut ids = Vec::with_capacity(lists.len());
        let mut state = self.state.lock();
        for list in lists {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            state.lists.insert(
                id,
                RemoteReadingList {
                    id,
                    name: list.name.clone(),
                    description: list.description.clone(),
                    is_default: false,
                    deleted: false,
                    created: Utc::now(),
                    updated: Utc::now(),
                },
            );
            ids.push(id);
        }
        Ok(ids)
    }

    async fn update_list(&self, list_id: i64, name: &str, description: &str) -> SyncResult<()> {
        self.record(format!("update_list:{list_id}"));
        let mut state = self.state.lock();
        let list = state
            .lists
            .get_mut(&list_id)
            .ok_or_else(|| SyncError::Network(format!("unknown list {list_id}")))?;
        list.name = name.to_string();
        list.description = description.to_string();
        list.updated = Utc::now();
        Ok(())
    }

    async fn delete_list(&self, list_id: i64) -> SyncResult<()> {
        self.record(format!("delete_list:{list_id}"));
        if self.fail_delete_list.load(Ordering::SeqCst) {
            return Err(SyncError::Network("delete_list unavailable".to_string()));
        }
        let mut state = self.state.lock();
        state.lists.remove(&list_id);
        state.entries.retain(|_, e| e.list_id != list_id);
        Ok(())
    }

    async fn add_entries(&self, list_id: i64, entries: &[EntryCreation]) -> SyncResult<Vec<i64>> {
        self.record(format!("add_entries:{}", entries.len()));
        if self.fail_add_entries.load(Ordering::SeqCst) {
            return Err(SyncError::Network("add_entries unavailable".to_string()));
        }
        let mut ids = Vec::with_capacity(entries.len());
        let mut state = self.state.lock();
        for entry in entries {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            state.entries.insert(
                id,
                RemoteReadingListEntry {
                    id,
                    list_id,
                    project: entry.project.clone(),
                    title: entry.title.clone(),
                    deleted: false,
                    created: Utc::now(),
                    updated: Utc::now(),
                },
            );
            ids.push(id);
        }
        Ok(ids)
    }

    async fn remove_entry(&self, list_id: i64, entry_id: i64) -> SyncResult<()> {
        self.record(format!("remove_entry:{list_id}:{entry_id}"));
        if self.fail_remove_entry.load(Ordering::SeqCst) {
            return Err(SyncError::Network("remove_entry unavailable".to_string()));
        }
        self.state.lock().entries.remove(&entry_id);
        Ok(())
    }

    async fn fetch_lists_since(&self, since: DateTime<Utc>) -> SyncResult<Vec<RemoteReadingList>> {
        self.record("fetch_lists");
        let mut lists: Vec<RemoteReadingList> = self
            .state
            .lock()
            .lists
            .values()
            .filter(|l| l.updated > since)
            .cloned()
            .collect();
        lists.sort_by_key(|l| l.id);
        Ok(lists)
    }

    async fn fetch_entries_since(
        &self,
        list_id: i64,
        since: DateTime<Utc>,
    ) -> SyncResult<Vec<RemoteReadingListEntry>> {
        self.record(format!("fetch_entries:{list_id}"));
        let mut entries: Vec<RemoteReadingListEntry> = self
            .state
            .lock()
            .entries
            .values()
            .filter(|e| e.list_id == list_id && e.updated > since)
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.id);
        Ok(entries)
    }

    async fn fetch_talk_page(
        &self,
        _host: &str,
        _language: &str,
        _title: &str,
        _revision_id: u64,
    ) -> SyncResult<TalkPageSnapshot> {
        self.record("fetch_talk_page");
        self.talk_fetches.fetch_add(1, Ordering::SeqCst);
        self.talk_snapshot
            .lock()
            .clone()
            .ok_or_else(|| SyncError::Network("no talk page configured".to_string()))
    }
}
