//! Property-based tests for the talk-page merge.
//!
//! Uses proptest to verify the structural guarantees of the hash-keyed
//! merge: the merged page mirrors the snapshot exactly, a second merge
//! of the same snapshot is a no-op, and unchanged nodes keep their ids.

use std::collections::BTreeMap;

use proptest::prelude::*;

use readersync_core::{
    merge_talk_page, ContentSha, ReplySnapshot, TalkPage, TalkPageKey, TalkPageSnapshot,
    TopicId, TopicSnapshot,
};

// ============================================================================
// Strategy Generators
// ============================================================================

/// Generate topic sets with unique titles and, per topic, replies with
/// unique (text, depth) pairs, so content hashes are sets as the merge
/// requires
fn topics_strategy() -> impl Strategy<Value = Vec<TopicSnapshot>> {
    prop::collection::btree_set("[a-z]{1,6}", 0..5).prop_flat_map(|titles| {
        let titles: Vec<String> = titles.into_iter().collect();
        let count = titles.len();
        (
            Just(titles),
            prop::collection::vec(
                prop::collection::btree_set(("[a-z]{1,4}", 0u32..3), 0..4),
                count..=count,
            ),
        )
            .prop_map(|(titles, reply_sets)| {
                titles
                    .into_iter()
                    .zip(reply_sets)
                    .enumerate()
                    .map(|(i, (title, replies))| TopicSnapshot {
                        title,
                        section_index: i as i64,
                        sort: i as i64,
                        replies: replies
                            .into_iter()
                            .enumerate()
                            .map(|(j, (text, depth))| ReplySnapshot {
                                text,
                                depth,
                                sort: j as i64,
                            })
                            .collect(),
                    })
                    .collect()
            })
    })
}

fn snapshot(revision_id: u64, topics: Vec<TopicSnapshot>) -> TalkPageSnapshot {
    TalkPageSnapshot {
        revision_id,
        language: "en".to_string(),
        title: "Talk:Mars".to_string(),
        topics,
    }
}

/// Observable structure of a page: title → ordered (depth, text) replies
fn page_shape(page: &TalkPage) -> BTreeMap<String, Vec<(u32, String)>> {
    page.topics
        .iter()
        .map(|t| {
            (
                t.title.clone(),
                t.replies.iter().map(|r| (r.depth, r.text.clone())).collect(),
            )
        })
        .collect()
}

fn snapshot_shape(snapshot: &TalkPageSnapshot) -> BTreeMap<String, Vec<(u32, String)>> {
    let mut topics: Vec<&TopicSnapshot> = snapshot.topics.iter().collect();
    topics.sort_by_key(|t| t.sort);
    topics
        .into_iter()
        .map(|t| {
            let mut replies: Vec<&ReplySnapshot> = t.replies.iter().collect();
            replies.sort_by_key(|r| r.sort);
            (
                t.title.clone(),
                replies.into_iter().map(|r| (r.depth, r.text.clone())).collect(),
            )
        })
        .collect()
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// After a merge the local structure exactly mirrors the snapshot
    #[test]
    fn merge_mirrors_snapshot(base in topics_strategy(), next in topics_strategy()) {
        let mut page = TalkPage::from_snapshot(
            TalkPageKey::new("en", "Talk:Mars"),
            &snapshot(1, base),
        );
        let next = snapshot(2, next);
        merge_talk_page(&mut page, &next).expect("unique hashes by construction");

        prop_assert_eq!(page.revision_id, 2);
        prop_assert_eq!(page_shape(&page), snapshot_shape(&next));
    }

    /// Merging the same snapshot a second time changes nothing
    #[test]
    fn merge_is_idempotent(base in topics_strategy(), next in topics_strategy()) {
        let mut page = TalkPage::from_snapshot(
            TalkPageKey::new("en", "Talk:Mars"),
            &snapshot(1, base),
        );
        let next = snapshot(2, next);
        merge_talk_page(&mut page, &next).expect("first merge");

        let before = page.clone();
        let outcome = merge_talk_page(&mut page, &next).expect("second merge");
        prop_assert!(outcome.is_noop());
        prop_assert_eq!(page, before);
    }

    /// Topics surviving a merge keep their local ids
    #[test]
    fn common_topics_keep_their_ids(base in topics_strategy(), next in topics_strategy()) {
        let mut page = TalkPage::from_snapshot(
            TalkPageKey::new("en", "Talk:Mars"),
            &snapshot(1, base),
        );
        let ids_before: BTreeMap<ContentSha, TopicId> = page
            .topics
            .iter()
            .map(|t| (t.text_sha, t.id))
            .collect();

        merge_talk_page(&mut page, &snapshot(2, next)).expect("merge");

        for topic in &page.topics {
            if let Some(id) = ids_before.get(&topic.text_sha) {
                prop_assert_eq!(*id, topic.id);
            }
        }
    }
}
