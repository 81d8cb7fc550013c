//! Content-identity hashing for talk-page topics and replies.
//!
//! Topics and replies carry no stable server-side ids, so merge identity
//! is a SHA-256 digest of their content. Two nodes with equal digests are
//! treated as the same logical node across fetches; hash equality implying
//! content equality is an accepted tradeoff, not guarded against.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{SyncError, SyncResult};

/// A stable SHA-256 digest of a node's textual content, used as a merge key.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ContentSha([u8; 32]);

impl ContentSha {
    /// Create a ContentSha from raw digest bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw digest bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Hex-encode the digest
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse a digest from its hex encoding
    pub fn from_hex(s: &str) -> SyncResult<Self> {
        let bytes = hex::decode(s).map_err(|e| SyncError::Decode(e.to_string()))?;
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| SyncError::Decode("content sha must be 32 bytes".to_string()))?;
        Ok(Self(arr))
    }
}

impl std::fmt::Display for ContentSha {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode(&self.0[..8]))
    }
}

impl std::fmt::Debug for ContentSha {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ContentSha({})", self)
    }
}

/// Digest of an arbitrary piece of text
pub fn sha_of_text(text: &str) -> ContentSha {
    ContentSha(Sha256::digest(text.as_bytes()).into())
}

/// Digest of a topic's own text (its heading)
pub fn topic_sha(title: &str) -> ContentSha {
    sha_of_text(title)
}

/// Digest of a reply's content.
///
/// Covers nesting depth and text but NOT the sort position: reordering a
/// reply must not change its identity, while any text or depth change
/// manifests as a different logical reply.
pub fn reply_sha(depth: u32, text: &str) -> ContentSha {
    let mut hasher = Sha256::new();
    hasher.update(depth.to_le_bytes());
    hasher.update([0x1f]);
    hasher.update(text.as_bytes());
    ContentSha(hasher.finalize().into())
}

/// Digest of a topic's entire reply subtree, computed over the ordered
/// per-reply digests. Lets the merge skip reply-level diffing for
/// untouched threads with a single comparison.
pub fn replies_sha(shas: &[ContentSha]) -> ContentSha {
    let mut hasher = Sha256::new();
    for sha in shas {
        hasher.update(sha.as_bytes());
    }
    ContentSha(hasher.finalize().into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha_is_stable() {
        assert_eq!(sha_of_text("hello"), sha_of_text("hello"));
        assert_ne!(sha_of_text("hello"), sha_of_text("hello "));
    }

    #[test]
    fn test_reply_sha_covers_depth_but_not_sort() {
        let a = reply_sha(0, "same text");
        let b = reply_sha(1, "same text");
        assert_ne!(a, b);
    }

    #[test]
    fn test_replies_sha_is_order_sensitive() {
        let r1 = reply_sha(0, "first");
        let r2 = reply_sha(0, "second");
        assert_ne!(replies_sha(&[r1, r2]), replies_sha(&[r2, r1]));
        assert_eq!(replies_sha(&[r1, r2]), replies_sha(&[r1, r2]));
    }

    #[test]
    fn test_hex_roundtrip() {
        let sha = sha_of_text("roundtrip");
        let decoded = ContentSha::from_hex(&sha.to_hex()).expect("valid hex");
        assert_eq!(sha, decoded);
    }

    #[test]
    fn test_from_hex_rejects_short_input() {
        assert!(ContentSha::from_hex("abcd").is_err());
    }
}
