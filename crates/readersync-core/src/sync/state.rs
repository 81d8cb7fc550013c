//! Sync-state bitset.
//!
//! The engine's pending intents are independent flags, not a single
//! enum, because several can coexist (e.g. a remote enable queued behind
//! a local clear). The set is persisted as one integer through the local
//! store and changes only through the named transitions below, so every
//! state the engine can be in has a constructor with a name.

use bitflags::bitflags;

bitflags! {
    /// Pending sync intents, persisted as a single integer
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct SyncState: u32 {
        /// Remote service must be provisioned before syncing
        const NEEDS_REMOTE_ENABLE = 1 << 0;
        /// A full reconciliation pass is pending
        const NEEDS_SYNC = 1 << 1;
        /// Incremental reconciliation passes are active
        const NEEDS_UPDATE = 1 << 2;
        /// Remote service must be torn down
        const NEEDS_REMOTE_DISABLE = 1 << 3;
        /// Local lists must be returned to the unsynced state
        /// (remote ids stripped, dirty flags cleared)
        const NEEDS_LOCAL_RESET = 1 << 4;
        /// All local saved-article state must be cleared
        const NEEDS_LOCAL_ARTICLE_CLEAR = 1 << 5;
        /// All local non-default lists must be deleted
        const NEEDS_LOCAL_LIST_CLEAR = 1 << 6;
        /// Debug: seed random lists on the next cycle
        const NEEDS_RANDOM_LISTS = 1 << 7;
        /// Debug: seed random entries on the next cycle
        const NEEDS_RANDOM_ENTRIES = 1 << 8;

        /// Clear both article and list local state
        const NEEDS_LOCAL_CLEAR =
            Self::NEEDS_LOCAL_ARTICLE_CLEAR.bits() | Self::NEEDS_LOCAL_LIST_CLEAR.bits();
        /// Provision the remote service, then run a full sync
        const NEEDS_ENABLE = Self::NEEDS_REMOTE_ENABLE.bits() | Self::NEEDS_SYNC.bits();
        /// Wipe local state, provision the remote service, full sync
        const NEEDS_CLEAR_AND_ENABLE =
            Self::NEEDS_LOCAL_CLEAR.bits() | Self::NEEDS_ENABLE.bits();
        /// Tear down the remote service and reset local lists
        const NEEDS_DISABLE =
            Self::NEEDS_REMOTE_DISABLE.bits() | Self::NEEDS_LOCAL_RESET.bits();
    }
}

impl SyncState {
    /// Sync is considered enabled while a full or incremental pass is
    /// pending or active
    pub fn is_sync_enabled(&self) -> bool {
        self.intersects(Self::NEEDS_SYNC | Self::NEEDS_UPDATE)
    }

    /// Transition target for enabling sync
    pub fn for_enable(delete_local: bool) -> Self {
        if delete_local {
            Self::NEEDS_CLEAR_AND_ENABLE
        } else {
            Self::NEEDS_ENABLE
        }
    }

    /// Transition target for disabling sync.
    ///
    /// Disabling keeps local lists (stripped of their remote ids) unless
    /// remote deletion was requested, in which case the remote service is
    /// torn down first.
    pub fn for_disable(delete_remote: bool) -> Self {
        if delete_remote {
            Self::NEEDS_DISABLE
        } else {
            Self::NEEDS_LOCAL_RESET
        }
    }
}
