//! Talk pages: the local object graph and the remote snapshot it is
//! reconciled against.
//!
//! The local graph (`TalkPage` → `TalkPageTopic` → `TalkPageReply`)
//! carries surrogate ids so observers can rely on stable identity across
//! merges. The snapshot types mirror what the remote API returns for one
//! revision of a page; their content hashes are computed on demand from
//! the hashing module and act as the merge keys.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::hash::{self, ContentSha};

/// Composite key identifying a talk page, derived from the normalized
/// page language and title
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TalkPageKey(String);

impl TalkPageKey {
    /// Build a key from a language code and a page title
    pub fn new(language: &str, title: &str) -> Self {
        let language = language.trim().to_lowercase();
        let title = title.trim().replace(' ', "_");
        Self(format!("{}:{}", language, title))
    }

    /// The full normalized key string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TalkPageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique local identifier for a topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TopicId(pub Ulid);

impl TopicId {
    /// Create a new random TopicId
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for TopicId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique local identifier for a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReplyId(pub Ulid);

impl ReplyId {
    /// Create a new random ReplyId
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for ReplyId {
    fn default() -> Self {
        Self::new()
    }
}

/// Locally stored talk page for one article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TalkPage {
    /// Composite page key
    pub key: TalkPageKey,
    /// Revision id of the last applied snapshot; monotonic per fetch
    pub revision_id: u64,
    /// Language code of the page
    pub language: String,
    /// Display title of the page
    pub title: String,
    /// Topics in display order
    pub topics: Vec<TalkPageTopic>,
}

/// One discussion topic on a talk page; exclusively owned by its page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TalkPageTopic {
    /// Local surrogate id; stable across merges for unchanged topics
    pub id: TopicId,
    /// Topic heading text
    pub title: String,
    /// Section index on the rendered page
    pub section_index: i64,
    /// Display sort order
    pub sort: i64,
    /// Digest of the topic's own text; merge key at the topic level
    pub text_sha: ContentSha,
    /// Digest of the entire reply subtree; equality short-circuits
    /// reply-level diffing
    pub replies_sha: ContentSha,
    /// Replies in display order
    pub replies: Vec<TalkPageReply>,
}

impl TalkPageTopic {
    /// Build a fresh local topic (with all replies) from a snapshot
    pub fn from_snapshot(snapshot: &TopicSnapshot) -> Self {
        Self {
            id: TopicId::new(),
            title: snapshot.title.clone(),
            section_index: snapshot.section_index,
            sort: snapshot.sort,
            text_sha: snapshot.text_sha(),
            replies_sha: snapshot.replies_sha(),
            replies: snapshot.replies.iter().map(TalkPageReply::from_snapshot).collect(),
        }
    }
}

/// One reply within a topic.
///
/// Identity for merge purposes is the content hash, not the surrogate
/// id: any text or depth change produces a different hash, i.e. a
/// different logical reply. Text and depth are immutable once created;
/// only the sort position is ever updated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TalkPageReply {
    /// Local surrogate id; stable across merges for unchanged replies
    pub id: ReplyId,
    /// Reply text
    pub text: String,
    /// Nesting level
    pub depth: u32,
    /// Display sort order
    pub sort: i64,
    /// Content digest; merge key at the reply level
    pub sha: ContentSha,
}

impl TalkPageReply {
    /// Build a fresh local reply from a snapshot
    pub fn from_snapshot(snapshot: &ReplySnapshot) -> Self {
        Self {
            id: ReplyId::new(),
            text: snapshot.text.clone(),
            depth: snapshot.depth,
            sort: snapshot.sort,
            sha: snapshot.sha(),
        }
    }
}

impl TalkPage {
    /// Build the full local object graph from a remote snapshot in one
    /// pass. Used when no local page exists yet; no merge needed.
    pub fn from_snapshot(key: TalkPageKey, snapshot: &TalkPageSnapshot) -> Self {
        let mut topics: Vec<TalkPageTopic> = snapshot
            .topics
            .iter()
            .map(TalkPageTopic::from_snapshot)
            .collect();
        topics.sort_by_key(|t| t.sort);
        Self {
            key,
            revision_id: snapshot.revision_id,
            language: snapshot.language.clone(),
            title: snapshot.title.clone(),
            topics,
        }
    }
}

/// Freshly fetched remote state of a talk page at one revision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TalkPageSnapshot {
    /// Revision id of this snapshot
    pub revision_id: u64,
    /// Language code of the page
    pub language: String,
    /// Display title of the page
    pub title: String,
    /// Topics in display order
    pub topics: Vec<TopicSnapshot>,
}

/// Remote state of one topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicSnapshot {
    /// Topic heading text
    pub title: String,
    /// Section index on the rendered page
    pub section_index: i64,
    /// Display sort order
    pub sort: i64,
    /// Replies in display order
    pub replies: Vec<ReplySnapshot>,
}

impl TopicSnapshot {
    /// Digest of the topic's own text
    pub fn text_sha(&self) -> ContentSha {
        hash::topic_sha(&self.title)
    }

    /// Digest of the topic's reply subtree
    pub fn replies_sha(&self) -> ContentSha {
        let shas: Vec<ContentSha> = self.replies.iter().map(|r| r.sha()).collect();
        hash::replies_sha(&shas)
    }
}

/// Remote state of one reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplySnapshot {
    /// Reply text
    pub text: String,
    /// Nesting level
    pub depth: u32,
    /// Display sort order
    pub sort: i64,
}

impl ReplySnapshot {
    /// Content digest of this reply
    pub fn sha(&self) -> ContentSha {
        hash::reply_sha(self.depth, &self.text)
    }
}
