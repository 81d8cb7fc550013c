//! Reading lists and their entries.
//!
//! Lists and entries carry local surrogate ids (ULIDs) plus an optional
//! remote id assigned once the server has created them. Local-only edits
//! are tracked with per-record dirty flags and flushed by the sync cycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use super::article::ArticleKey;

/// Unique local identifier for a reading list
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReadingListId(pub Ulid);

impl ReadingListId {
    /// Create a new random ReadingListId
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for ReadingListId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ReadingListId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "list_{}", self.0)
    }
}

/// Unique local identifier for a reading-list entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntryId(pub Ulid);

impl EntryId {
    /// Create a new random EntryId
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "entry_{}", self.0)
    }
}

/// Canonical form of a list name: whitespace-trimmed and case-folded.
///
/// Used for uniqueness checks among non-deleted lists and for name-based
/// matching during remote-to-local reconciliation when no remote id is
/// available yet.
pub fn canonicalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// A user's reading list.
///
/// Invariants:
/// - the canonical name is unique among non-deleted lists
/// - exactly one list per account has `is_default == true`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingList {
    /// Local surrogate id
    pub id: ReadingListId,
    /// Server-assigned id, set once the list has been created remotely
    pub remote_id: Option<i64>,
    /// Display name
    pub name: String,
    /// Canonical name used for matching; always `canonicalize(name)`
    pub canonical_name: String,
    /// Free-form description
    pub description: String,
    /// Creation timestamp
    pub created: DateTime<Utc>,
    /// Last local or remote update timestamp
    pub updated: DateTime<Utc>,
    /// Whether this is the single default list
    pub is_default: bool,
    /// Soft-deleted pending server confirmation
    pub is_deleted_locally: bool,
    /// Local-only changes not yet confirmed by the remote service
    pub is_updated_locally: bool,
    /// Cached count of non-deleted entries
    pub entry_count: u64,
}

impl ReadingList {
    /// Create a new dirty (not yet server-created) list
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        let name = name.into();
        let now = Utc::now();
        Self {
            id: ReadingListId::new(),
            remote_id: None,
            canonical_name: canonicalize(&name),
            name,
            description: description.into(),
            created: now,
            updated: now,
            is_default: false,
            is_deleted_locally: false,
            is_updated_locally: true,
            entry_count: 0,
        }
    }

    /// Rename the list, keeping the canonical name in step
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.canonical_name = canonicalize(&self.name);
        self.mark_updated();
    }

    /// Flag the list as locally modified and bump its update timestamp
    pub fn mark_updated(&mut self) {
        self.is_updated_locally = true;
        self.updated = Utc::now();
    }

    /// Strip sync state, returning the list to "never synced".
    ///
    /// Used when sync is disabled without deleting local data.
    pub fn reset_to_unsynced(&mut self) {
        self.remote_id = None;
        self.is_updated_locally = false;
    }
}

/// Membership of one article in one reading list.
///
/// An entry belongs to exactly one list; at most one non-deleted entry
/// exists per (list, article key) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingListEntry {
    /// Local surrogate id
    pub id: EntryId,
    /// Server-assigned id, set once the entry has been created remotely
    pub remote_id: Option<i64>,
    /// The owning list
    pub list_id: ReadingListId,
    /// The article this entry saves
    pub article_key: ArticleKey,
    /// Human-readable title for display
    pub display_title: String,
    /// Creation timestamp
    pub created: DateTime<Utc>,
    /// Soft-deleted pending server confirmation
    pub is_deleted_locally: bool,
    /// Local-only changes not yet confirmed by the remote service
    pub is_updated_locally: bool,
}

impl ReadingListEntry {
    /// Create a new dirty (not yet server-created) entry
    pub fn new(
        list_id: ReadingListId,
        article_key: ArticleKey,
        display_title: impl Into<String>,
    ) -> Self {
        Self {
            id: EntryId::new(),
            remote_id: None,
            list_id,
            article_key,
            display_title: display_title.into(),
            created: Utc::now(),
            is_deleted_locally: false,
            is_updated_locally: true,
        }
    }
}
