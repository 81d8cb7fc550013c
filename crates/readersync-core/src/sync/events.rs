//! Events emitted by the sync engine for UI collaborators.

use super::cycle::CycleSummary;
use super::state::SyncState;

/// Notifications broadcast by the controller
#[derive(Debug, Clone)]
pub enum SyncEvent {
    /// The persisted sync-state bitset changed
    StateChanged {
        /// The new state
        state: SyncState,
    },
    /// A sync cycle ran to completion
    CycleCompleted {
        /// Counts and watermark from the finished cycle
        summary: CycleSummary,
    },
    /// A sync cycle ended early or could not run
    CycleFailed {
        /// Human-readable reason
        message: String,
    },
}
