//! Read models returned by the cycling engine.

use serde::{Deserialize, Serialize};

use crate::domain::article::Article;
use crate::domain::foundation::{ArticleId, Timestamp};

/// Cursor metadata sent alongside every engine response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleMetadata {
    pub current_index: i64,
    pub cycle_count: u64,
    #[serde(default)]
    pub is_new_cycle: bool,
    pub total_articles: usize,
    #[serde(default)]
    pub current_article: Option<ArticleId>,
    pub last_updated: Timestamp,
}

/// Result of a successful advance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleSnapshot {
    /// The newly current article.
    pub article: Article,
    pub metadata: CycleMetadata,
    /// Every article reached so far in the active cycle, newest first.
    pub cycle_articles: Vec<Article>,
}

/// Sorts articles newest first by publish time, later cycle positions first
/// on ties. Unstamped articles sink to the end.
pub fn sort_newest_first(articles: &mut [Article]) {
    articles.sort_by(|a, b| {
        b.publish_timestamp
            .cmp(&a.publish_timestamp)
            .then_with(|| b.cycle_index.cmp(&a.cycle_index))
    });
}
