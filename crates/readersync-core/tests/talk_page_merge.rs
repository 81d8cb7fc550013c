//! Integration tests for the talk-page merge engine: revision-gated
//! fetching and identity-preserving merges through the fetcher.

mod common;

use std::sync::Arc;

use common::MockRemoteClient;
use readersync_core::{
    LocalStore, MemoryStore, ReplySnapshot, TalkPageFetcher, TalkPageKey, TalkPageRequest,
    TalkPageSnapshot, TopicSnapshot,
};

fn reply(text: &str, depth: u32, sort: i64) -> ReplySnapshot {
    ReplySnapshot {
        text: text.to_string(),
        depth,
        sort,
    }
}

fn snapshot(revision_id: u64, topics: Vec<TopicSnapshot>) -> TalkPageSnapshot {
    TalkPageSnapshot {
        revision_id,
        language: "en".to_string(),
        title: "Talk:Solar System".to_string(),
        topics,
    }
}

fn request(revision_id: u64) -> TalkPageRequest {
    TalkPageRequest {
        host: "en.wikipedia.org".to_string(),
        language: "en".to_string(),
        title: "Talk:Solar System".to_string(),
        revision_id,
    }
}

fn setup() -> (Arc<MemoryStore>, Arc<MockRemoteClient>, TalkPageFetcher) {
    let store = Arc::new(MemoryStore::new());
    let remote = Arc::new(MockRemoteClient::new());
    let fetcher = TalkPageFetcher::new(store.clone(), remote.clone());
    (store, remote, fetcher)
}

#[tokio::test]
async fn repeated_fetch_at_same_revision_skips_the_network() {
    let (_store, remote, fetcher) = setup();
    remote.set_talk_snapshot(snapshot(
        5,
        vec![TopicSnapshot {
            title: "Orbit diagrams".to_string(),
            section_index: 0,
            sort: 0,
            replies: vec![reply("Out of date.", 0, 0)],
        }],
    ));

    let first = fetcher.fetch_talk_page(&request(5)).await.unwrap();
    assert_eq!(remote.talk_fetches(), 1);

    let second = fetcher.fetch_talk_page(&request(5)).await.unwrap();
    assert_eq!(remote.talk_fetches(), 1, "revision gate must skip the fetch");
    assert_eq!(second, first, "the stored object is returned unchanged");
    assert_eq!(second.topics[0].id, first.topics[0].id);
}

#[tokio::test]
async fn newer_revision_merges_preserving_unchanged_identity() {
    let (store, remote, fetcher) = setup();
    remote.set_talk_snapshot(snapshot(
        1,
        vec![TopicSnapshot {
            title: "Orbit diagrams".to_string(),
            section_index: 0,
            sort: 0,
            replies: vec![reply("Out of date.", 0, 0)],
        }],
    ));
    let first = fetcher.fetch_talk_page(&request(1)).await.unwrap();
    let topic_id = first.topics[0].id;
    let reply_id = first.topics[0].replies[0].id;

    remote.set_talk_snapshot(snapshot(
        2,
        vec![
            TopicSnapshot {
                title: "Orbit diagrams".to_string(),
                section_index: 0,
                sort: 0,
                replies: vec![reply("Out of date.", 0, 0), reply("Fixed now.", 1, 1)],
            },
            TopicSnapshot {
                title: "Naming".to_string(),
                section_index: 1,
                sort: 1,
                replies: vec![],
            },
        ],
    ));
    let merged = fetcher.fetch_talk_page(&request(2)).await.unwrap();

    assert_eq!(remote.talk_fetches(), 2);
    assert_eq!(merged.revision_id, 2);
    assert_eq!(merged.topics.len(), 2);
    assert_eq!(merged.topics[0].id, topic_id, "unchanged topic keeps its id");
    assert_eq!(merged.topics[0].replies[0].id, reply_id, "unchanged reply keeps its id");
    assert_eq!(merged.topics[0].replies.len(), 2);

    // the merged graph is what the store now holds
    let key = TalkPageKey::new("en", "Talk:Solar System");
    let stored = store.talk_page(&key).unwrap().unwrap();
    assert_eq!(stored, merged);
}

#[test]
fn snapshot_decodes_from_wire_json() {
    let json = r#"{
        "revision_id": 9,
        "language": "en",
        "title": "Talk:Mars",
        "topics": [
            {
                "title": "Water evidence",
                "section_index": 0,
                "sort": 0,
                "replies": [{"text": "See the 2015 paper.", "depth": 0, "sort": 0}]
            }
        ]
    }"#;
    let snapshot: TalkPageSnapshot = serde_json::from_str(json).expect("valid payload");
    assert_eq!(snapshot.revision_id, 9);
    assert_eq!(snapshot.topics[0].replies[0].text, "See the 2015 paper.");
}

#[tokio::test]
async fn first_fetch_materializes_the_whole_graph() {
    let (store, remote, fetcher) = setup();
    remote.set_talk_snapshot(snapshot(
        3,
        vec![
            TopicSnapshot {
                title: "A".to_string(),
                section_index: 0,
                sort: 1,
                replies: vec![reply("r1", 0, 0), reply("r2", 1, 1)],
            },
            TopicSnapshot {
                title: "B".to_string(),
                section_index: 1,
                sort: 0,
                replies: vec![],
            },
        ],
    ));

    let page = fetcher.fetch_talk_page(&request(3)).await.unwrap();
    assert_eq!(page.topics.len(), 2);
    // topics come back ordered by sort
    assert_eq!(page.topics[0].title, "B");
    assert_eq!(page.topics[1].title, "A");
    assert_eq!(page.topics[1].replies.len(), 2);

    let key = TalkPageKey::new("en", "Talk:Solar System");
    assert!(store.talk_page(&key).unwrap().is_some());
}
