//! Tunables for the sync engine, threaded through the controller as an
//! explicit value instead of ambient constants.

use std::time::Duration;

/// Configuration for the reading-list sync engine
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Maximum number of in-flight requests per batch; also the chunk
    /// size for grouped entry-creation calls
    pub batch_request_limit: usize,
    /// How long a triggered sync cycle waits before dispatching, so
    /// bursts of edits coalesce into one network pass
    pub debounce: Duration,
    /// Interval of the periodic trigger while the controller is started
    pub periodic_interval: Duration,
    /// Capacity of the event broadcast channel
    pub event_capacity: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            batch_request_limit: 8,
            debounce: Duration::from_millis(500),
            periodic_interval: Duration::from_secs(15),
            event_capacity: 256,
        }
    }
}
