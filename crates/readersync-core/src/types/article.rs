//! Articles and their derived saved state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable content identifier for an article, derived from its normalized
/// project and title ("en.wikipedia.org/Solar_System").
///
/// Two keys built from the same project and title always compare equal,
/// regardless of surrounding whitespace or space-vs-underscore spelling
/// in the title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArticleKey(String);

impl ArticleKey {
    /// Build a key from a project host and an article title
    pub fn new(project: &str, title: &str) -> Self {
        let project = project.trim().to_lowercase();
        let title = title.trim().replace(' ', "_");
        Self(format!("{}/{}", project, title))
    }

    /// The project host component of the key
    pub fn project(&self) -> &str {
        self.0.split_once('/').map(|(p, _)| p).unwrap_or(&self.0)
    }

    /// The normalized title component of the key
    pub fn title(&self) -> &str {
        self.0.split_once('/').map(|(_, t)| t).unwrap_or("")
    }

    /// The full normalized key string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ArticleKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Saved-state view of an article.
///
/// `saved_at` is `Some` iff the article currently belongs to at least one
/// reading list. This is a maintained invariant, recomputed after every
/// membership change rather than stored authoritatively anywhere else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Stable content identifier
    pub key: ArticleKey,
    /// Human-readable title for display
    pub display_title: String,
    /// When the article was last saved to any list; `None` when unsaved
    pub saved_at: Option<DateTime<Utc>>,
}

impl Article {
    /// Create an unsaved article
    pub fn new(key: ArticleKey, display_title: impl Into<String>) -> Self {
        Self {
            key,
            display_title: display_title.into(),
            saved_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_normalizes_spaces_and_case() {
        let a = ArticleKey::new("EN.wikipedia.org", "Solar System");
        let b = ArticleKey::new("en.wikipedia.org", " Solar_System ");
        assert_eq!(a, b);
        assert_eq!(a.project(), "en.wikipedia.org");
        assert_eq!(a.title(), "Solar_System");
    }

    #[test]
    fn test_new_article_is_unsaved() {
        let article = Article::new(ArticleKey::new("en.wikipedia.org", "Mars"), "Mars");
        assert!(article.saved_at.is_none());
    }
}
