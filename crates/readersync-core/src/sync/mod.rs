//! Reading-list synchronization engine.
//!
//! Keeps local reading lists and entries consistent with the remote
//! service, tolerating offline edits. User actions mark records dirty;
//! debounced cycles batch the pending work into bounded network passes
//! and clear the dirty flags as the server confirms each change.

mod controller;
mod cycle;
mod events;
mod membership;
mod state;

pub use controller::ReadingListsController;
pub use cycle::CycleSummary;
pub use events::SyncEvent;
pub use state::SyncState;
