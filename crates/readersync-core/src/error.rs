//! Error types for the reconciliation core

use thiserror::Error;

use crate::hash::ContentSha;

/// Main error type for reading-list and talk-page operations
#[derive(Error, Debug)]
pub enum SyncError {
    /// A non-deleted list with the same canonical name already exists
    #[error("A list named \"{0}\" already exists")]
    ListExistsWithTheSameName(String),

    /// Lookup by name found no matching list
    #[error("No list named \"{0}\" was found")]
    ListWithProvidedNameNotFound(String),

    /// The default list can only lose entries, never be deleted itself
    #[error("The default list cannot be deleted")]
    CannotDeleteDefaultList,

    /// Local store failed to create a list
    #[error("Unable to create list")]
    UnableToCreateList,

    /// Local store failed to delete a list
    #[error("Unable to delete list")]
    UnableToDeleteList,

    /// Local store failed to update a list
    #[error("Unable to update list")]
    UnableToUpdateList,

    /// Local store failed to add an entry
    #[error("Unable to add entry")]
    UnableToAddEntry,

    /// Local store failed to remove an entry
    #[error("Unable to remove entry")]
    UnableToRemoveEntry,

    /// Two topics or replies in the same merge scope hashed identically,
    /// so the 1:1 pairing the merge relies on does not exist
    #[error("Duplicate {level} content hash {sha}")]
    DuplicateContentHash {
        /// Which merge level collided ("topic" or "reply")
        level: &'static str,
        /// The colliding digest
        sha: ContentSha,
    },

    /// Error during local store operations
    #[error("Storage error: {0}")]
    Storage(String),

    /// Error reported by the remote API client
    #[error("Network error: {0}")]
    Network(String),

    /// Remote payload could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// Catch-all for unexpected conditions
    #[error("{0}")]
    Generic(String),
}

/// Result type alias using SyncError
pub type SyncResult<T> = Result<T, SyncError>;
