use serde::Serialize;

use crate::domain::article::Article;
use crate::domain::foundation::ArticleId;

/// Cycle state delivered alongside each feed update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedMetadata {
    pub cycle_count: u64,
    pub is_new_cycle: bool,
    /// The feed was emptied by an explicit reset.
    pub is_reset: bool,
    pub total_articles: usize,
    pub current_article: Option<ArticleId>,
}

impl FeedMetadata {
    /// Metadata announcing a reset: everything zeroed.
    pub fn reset() -> Self {
        Self {
            is_reset: true,
            ..Self::default()
        }
    }
}

/// One notification to feed subscribers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedUpdate {
    pub articles: Vec<Article>,
    pub metadata: FeedMetadata,
}

impl FeedUpdate {
    /// The empty update sent after a reset.
    pub fn reset() -> Self {
        Self {
            articles: Vec::new(),
            metadata: FeedMetadata::reset(),
        }
    }

    /// The article currently flagged as live, if any.
    pub fn current(&self) -> Option<&Article> {
        self.articles.iter().find(|article| article.is_current)
    }
}
