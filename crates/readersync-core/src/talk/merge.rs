//! Hash-keyed merge of a stored talk page against a fresh snapshot.
//!
//! A symmetric-difference merge applied at two nesting levels. Each
//! level indexes both sides by content hash and resolves three explicit
//! sets: local-only (delete), common (update in place), remote-only
//! (insert). Nodes surviving the merge keep their local ids, so
//! observers relying on stable identity are not spuriously notified.
//!
//! The merge requires hash *sets*, not multisets: a duplicated hash on
//! either side means the 1:1 pairing does not exist, and the merge
//! refuses with [`SyncError::DuplicateContentHash`] before touching the
//! local graph instead of reconciling the subtree incorrectly.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::{SyncError, SyncResult};
use crate::hash::ContentSha;
use crate::types::{TalkPage, TalkPageReply, TalkPageSnapshot, TalkPageTopic, TopicSnapshot};

/// Counts of structural changes applied by one merge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Topics inserted from the snapshot
    pub topics_added: usize,
    /// Topics removed because the snapshot no longer contains them
    pub topics_removed: usize,
    /// Common topics whose ordering or reply subtree changed
    pub topics_updated: usize,
    /// Replies inserted under common topics
    pub replies_added: usize,
    /// Replies removed under common topics
    pub replies_removed: usize,
}

impl MergeOutcome {
    /// Whether the merge changed anything at all
    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }
}

/// Merge a snapshot into the stored page so its topic/reply structure
/// exactly mirrors the snapshot afterwards.
///
/// # Errors
///
/// Returns [`SyncError::DuplicateContentHash`] if two topics (or two
/// replies within one topic) hash identically on either side; the local
/// graph is left untouched in that case.
pub fn merge_talk_page(
    local: &mut TalkPage,
    snapshot: &TalkPageSnapshot,
) -> SyncResult<MergeOutcome> {
    let remote_by_sha = index_topics(snapshot)?;
    let local_shas = local_topic_shas(local)?;

    // reply-level duplicate detection happens before any mutation so a
    // refused merge leaves the page exactly as stored
    for topic in &snapshot.topics {
        check_remote_reply_set(topic)?;
    }
    for topic in &local.topics {
        if remote_by_sha.contains_key(&topic.text_sha) {
            check_local_reply_set(topic)?;
        }
    }

    let mut outcome = MergeOutcome::default();

    // local-only topics: delete
    local.topics.retain(|topic| {
        let keep = remote_by_sha.contains_key(&topic.text_sha);
        if !keep {
            outcome.topics_removed += 1;
        }
        keep
    });

    // common topics: update ordering, recurse into replies when the
    // subtree digest says anything changed
    for topic in &mut local.topics {
        let remote = remote_by_sha[&topic.text_sha];
        let mut updated = false;
        if topic.sort != remote.sort || topic.section_index != remote.section_index {
            topic.sort = remote.sort;
            topic.section_index = remote.section_index;
            updated = true;
        }
        let remote_replies_sha = remote.replies_sha();
        if topic.replies_sha == remote_replies_sha {
            // untouched thread: skip reply-level diffing entirely
            debug!(topic = %topic.id.0, "Reply subtree unchanged; skipping");
        } else {
            merge_replies(topic, remote, &mut outcome);
            topic.replies_sha = remote_replies_sha;
            updated = true;
        }
        if updated {
            outcome.topics_updated += 1;
        }
    }

    // remote-only topics: insert with their full reply subtree
    for topic in &snapshot.topics {
        if !local_shas.contains(&topic.text_sha()) {
            local.topics.push(TalkPageTopic::from_snapshot(topic));
            outcome.topics_added += 1;
        }
    }

    local.topics.sort_by_key(|t| t.sort);
    local.revision_id = snapshot.revision_id;
    local.title = snapshot.title.clone();
    Ok(outcome)
}

/// Apply the same delete/common/insert sets one level down.
///
/// Common replies only have their sort position updated: a reply's hash
/// is derived from its content, so any content change manifests as a
/// different logical reply, never an in-place mutation.
fn merge_replies(topic: &mut TalkPageTopic, remote: &TopicSnapshot, outcome: &mut MergeOutcome) {
    let remote_by_sha: HashMap<ContentSha, _> =
        remote.replies.iter().map(|r| (r.sha(), r)).collect();
    let local_shas: HashSet<ContentSha> = topic.replies.iter().map(|r| r.sha).collect();

    topic.replies.retain(|reply| {
        let keep = remote_by_sha.contains_key(&reply.sha);
        if !keep {
            outcome.replies_removed += 1;
        }
        keep
    });

    for reply in &mut topic.replies {
        let remote_reply = remote_by_sha[&reply.sha];
        if reply.sort != remote_reply.sort {
            reply.sort = remote_reply.sort;
        }
    }

    for remote_reply in &remote.replies {
        if !local_shas.contains(&remote_reply.sha()) {
            topic.replies.push(TalkPageReply::from_snapshot(remote_reply));
            outcome.replies_added += 1;
        }
    }

    topic.replies.sort_by_key(|r| r.sort);
}

fn index_topics(
    snapshot: &TalkPageSnapshot,
) -> SyncResult<HashMap<ContentSha, &TopicSnapshot>> {
    let mut by_sha = HashMap::with_capacity(snapshot.topics.len());
    for topic in &snapshot.topics {
        let sha = topic.text_sha();
        if by_sha.insert(sha, topic).is_some() {
            return Err(SyncError::DuplicateContentHash {
                level: "topic",
                sha,
            });
        }
    }
    Ok(by_sha)
}

fn local_topic_shas(local: &TalkPage) -> SyncResult<HashSet<ContentSha>> {
    let mut shas = HashSet::with_capacity(local.topics.len());
    for topic in &local.topics {
        if !shas.insert(topic.text_sha) {
            return Err(SyncError::DuplicateContentHash {
                level: "topic",
                sha: topic.text_sha,
            });
        }
    }
    Ok(shas)
}

fn check_remote_reply_set(topic: &TopicSnapshot) -> SyncResult<()> {
    let mut seen = HashSet::with_capacity(topic.replies.len());
    for reply in &topic.replies {
        let sha = reply.sha();
        if !seen.insert(sha) {
            return Err(SyncError::DuplicateContentHash {
                level: "reply",
                sha,
            });
        }
    }
    Ok(())
}

fn check_local_reply_set(topic: &TalkPageTopic) -> SyncResult<()> {
    let mut seen = HashSet::with_capacity(topic.replies.len());
    for reply in &topic.replies {
        if !seen.insert(reply.sha) {
            return Err(SyncError::DuplicateContentHash {
                level: "reply",
                sha: reply.sha,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ReplySnapshot, TalkPageKey};

    fn reply(text: &str, depth: u32, sort: i64) -> ReplySnapshot {
        ReplySnapshot {
            text: text.to_string(),
            depth,
            sort,
        }
    }

    fn topic(title: &str, sort: i64, replies: Vec<ReplySnapshot>) -> TopicSnapshot {
        TopicSnapshot {
            title: title.to_string(),
            section_index: sort,
            sort,
            replies,
        }
    }

    fn snapshot(revision_id: u64, topics: Vec<TopicSnapshot>) -> TalkPageSnapshot {
        TalkPageSnapshot {
            revision_id,
            language: "en".to_string(),
            title: "Talk:Mars".to_string(),
            topics,
        }
    }

    fn page(snapshot: &TalkPageSnapshot) -> TalkPage {
        TalkPage::from_snapshot(TalkPageKey::new("en", "Talk:Mars"), snapshot)
    }

    #[test]
    fn test_new_reply_appended_without_touching_existing() {
        let base = snapshot(1, vec![topic("A", 0, vec![reply("r1", 0, 0)])]);
        let mut local = page(&base);
        let topic_id = local.topics[0].id;
        let reply_id = local.topics[0].replies[0].id;

        let next = snapshot(
            2,
            vec![topic("A", 0, vec![reply("r1", 0, 0), reply("r2", 1, 1)])],
        );
        let outcome = merge_talk_page(&mut local, &next).unwrap();

        assert_eq!(outcome.replies_added, 1);
        assert_eq!(outcome.replies_removed, 0);
        assert_eq!(local.topics[0].id, topic_id, "topic identity preserved");
        assert_eq!(local.topics[0].replies[0].id, reply_id, "reply identity preserved");
        assert_eq!(local.topics[0].replies.len(), 2);
        assert_eq!(local.revision_id, 2);
    }

    #[test]
    fn test_unchanged_subtree_short_circuits() {
        let base = snapshot(1, vec![topic("A", 0, vec![reply("r1", 0, 0)])]);
        let mut local = page(&base);
        let outcome = merge_talk_page(&mut local, &snapshot(2, base.topics.clone())).unwrap();
        assert!(outcome.is_noop());
        assert_eq!(local.revision_id, 2);
    }

    #[test]
    fn test_local_only_topic_deleted() {
        let base = snapshot(1, vec![topic("A", 0, vec![]), topic("B", 1, vec![])]);
        let mut local = page(&base);
        let next = snapshot(2, vec![topic("B", 0, vec![])]);
        let outcome = merge_talk_page(&mut local, &next).unwrap();
        assert_eq!(outcome.topics_removed, 1);
        assert_eq!(local.topics.len(), 1);
        assert_eq!(local.topics[0].title, "B");
        assert_eq!(local.topics[0].sort, 0);
    }

    #[test]
    fn test_reordered_replies_keep_identity() {
        let base = snapshot(
            1,
            vec![topic("A", 0, vec![reply("r1", 0, 0), reply("r2", 0, 1)])],
        );
        let mut local = page(&base);
        let r1_id = local.topics[0].replies[0].id;
        let r2_id = local.topics[0].replies[1].id;

        let next = snapshot(
            2,
            vec![topic("A", 0, vec![reply("r2", 0, 0), reply("r1", 0, 1)])],
        );
        merge_talk_page(&mut local, &next).unwrap();

        assert_eq!(local.topics[0].replies[0].id, r2_id);
        assert_eq!(local.topics[0].replies[1].id, r1_id);
    }

    #[test]
    fn test_duplicate_topic_hash_refused_without_mutation() {
        let base = snapshot(1, vec![topic("A", 0, vec![reply("r1", 0, 0)])]);
        let mut local = page(&base);
        let before = local.clone();

        let next = snapshot(2, vec![topic("A", 0, vec![]), topic("A", 1, vec![])]);
        let err = merge_talk_page(&mut local, &next).unwrap_err();
        assert!(matches!(
            err,
            SyncError::DuplicateContentHash { level: "topic", .. }
        ));
        assert_eq!(local, before, "refused merge must not mutate the page");
    }

    #[test]
    fn test_duplicate_reply_hash_refused_without_mutation() {
        let base = snapshot(1, vec![topic("A", 0, vec![reply("r1", 0, 0)])]);
        let mut local = page(&base);
        let before = local.clone();

        // same text and depth at different sorts: identical hashes
        let next = snapshot(
            2,
            vec![topic("A", 0, vec![reply("r1", 0, 0), reply("r1", 0, 1)])],
        );
        let err = merge_talk_page(&mut local, &next).unwrap_err();
        assert!(matches!(
            err,
            SyncError::DuplicateContentHash { level: "reply", .. }
        ));
        assert_eq!(local, before);
    }
}
