//! Core domain types for the reconciliation engines

mod article;
mod reading_list;
mod talk_page;

pub use article::{Article, ArticleKey};
pub use reading_list::{canonicalize, EntryId, ReadingList, ReadingListEntry, ReadingListId};
pub use talk_page::{
    ReplyId, ReplySnapshot, TalkPage, TalkPageKey, TalkPageReply, TalkPageSnapshot, TalkPageTopic,
    TopicId, TopicSnapshot,
};
