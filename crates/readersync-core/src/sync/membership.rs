//! Derived-state maintenance for list membership.
//!
//! Two invariants are recomputed here after every membership change:
//! an article's `saved_at` is `Some` iff it belongs to at least one
//! list, and each list's cached entry count matches its non-deleted
//! entries. Both are derived data; the entries are the source of truth.

use chrono::Utc;

use crate::error::SyncResult;
use crate::store::LocalStore;
use crate::types::{Article, ArticleKey, ReadingListId};

/// Recompute one article's saved state from its current memberships.
///
/// Creates the article record on first save if the store has none yet.
pub(crate) fn recompute_article_state(store: &dyn LocalStore, key: &ArticleKey) -> SyncResult<()> {
    let memberships: Vec<_> = store
        .entries_for_article(key)?
        .into_iter()
        .filter(|e| !e.is_deleted_locally)
        .collect();

    let mut article = match store.article(key)? {
        Some(article) => article,
        None => {
            let Some(first) = memberships.first() else {
                return Ok(());
            };
            Article::new(key.clone(), first.display_title.clone())
        }
    };

    match (memberships.is_empty(), article.saved_at) {
        (false, None) => {
            article.saved_at = Some(Utc::now());
            store.upsert_article(article)?;
        }
        (true, Some(_)) => {
            article.saved_at = None;
            store.upsert_article(article)?;
        }
        _ => {
            store.upsert_article(article)?;
        }
    }
    Ok(())
}

/// Refresh one list's cached entry count
pub(crate) fn refresh_entry_count(store: &dyn LocalStore, list_id: ReadingListId) -> SyncResult<()> {
    let Some(mut list) = store.list(list_id)? else {
        return Ok(());
    };
    let count = store
        .entries_for_list(list_id)?
        .iter()
        .filter(|e| !e.is_deleted_locally)
        .count() as u64;
    if list.entry_count != count {
        list.entry_count = count;
        store.update_list(&list)?;
    }
    Ok(())
}

/// Keep exactly one non-deleted default list.
///
/// When a remote merge brings in a second default, the oldest list by
/// creation date wins; the others are demoted without being marked
/// dirty (the default flag is not part of the push payload).
pub(crate) fn enforce_default_uniqueness(store: &dyn LocalStore) -> SyncResult<()> {
    let mut defaults: Vec<_> = store
        .lists()?
        .into_iter()
        .filter(|l| l.is_default && !l.is_deleted_locally)
        .collect();
    if defaults.len() <= 1 {
        return Ok(());
    }
    defaults.sort_by_key(|l| l.created);
    for mut list in defaults.into_iter().skip(1) {
        list.is_default = false;
        store.update_list(&list)?;
    }
    Ok(())
}
