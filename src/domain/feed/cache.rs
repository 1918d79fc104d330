//! Client-side feed cache with first-sight freezing.

use std::collections::HashMap;

use serde::Deserialize;

use crate::domain::article::Article;
use crate::domain::cycle::sort_newest_first;
use crate::domain::foundation::ArticleId;

/// Display order of the rendered feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedOrder {
    /// Most recently published first.
    #[default]
    NewestFirst,
    /// Position within the cycle, ascending.
    CycleIndex,
}

/// What a merge did to the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeOutcome {
    /// Ids seen for the first time in this cycle.
    pub added: usize,
    /// The cache was emptied because the engine moved to another cycle.
    pub restarted: bool,
}

/// Articles seen during the engine's active cycle, keyed by id.
///
/// Entries accumulate until the cycle changes or the cache is cleared;
/// an id missing from a later payload is never evicted. Once an entry holds
/// publish fields they are frozen, only the current flag moves.
#[derive(Debug, Clone, Default)]
pub struct FeedCache {
    cycle: Option<u64>,
    articles: HashMap<ArticleId, Article>,
    current: Option<ArticleId>,
    order: FeedOrder,
}

impl FeedCache {
    /// Creates an empty cache rendering in `order`.
    pub fn new(order: FeedOrder) -> Self {
        Self {
            order,
            ..Self::default()
        }
    }

    /// Merges a batch of articles belonging to engine cycle `cycle`.
    pub fn merge(
        &mut self,
        incoming: impl IntoIterator<Item = Article>,
        cycle: u64,
    ) -> MergeOutcome {
        let mut outcome = MergeOutcome::default();
        if self.cycle.is_some_and(|held| held != cycle) {
            self.articles.clear();
            self.current = None;
            outcome.restarted = true;
        }
        self.cycle = Some(cycle);

        for article in incoming {
            if article.is_current {
                self.current = Some(article.id.clone());
            }
            match self.articles.get_mut(&article.id) {
                Some(cached) => {
                    if cached.stamp().is_none() {
                        if let Some(stamp) = article.stamp() {
                            *cached = cached.stamped(&stamp, false);
                        }
                    }
                }
                None => {
                    outcome.added += 1;
                    self.articles.insert(article.id.clone(), article);
                }
            }
        }
        outcome
    }

    /// Marks `id` as the current article.
    pub fn set_current(&mut self, id: ArticleId) {
        self.current = Some(id);
    }

    /// The id of the current article, if any.
    pub fn current(&self) -> Option<&ArticleId> {
        self.current.as_ref()
    }

    /// Engine cycle the cache holds, if any.
    pub fn cycle(&self) -> Option<u64> {
        self.cycle
    }

    /// Rendered feed: every cached article, exactly one flagged current.
    pub fn ordered(&self) -> Vec<Article> {
        let mut articles: Vec<Article> = self
            .articles
            .values()
            .map(|article| Article {
                is_current: self.current.as_ref() == Some(&article.id),
                ..article.clone()
            })
            .collect();

        match self.order {
            FeedOrder::NewestFirst => sort_newest_first(&mut articles),
            FeedOrder::CycleIndex => articles.sort_by(|a, b| {
                a.cycle_index
                    .cmp(&b.cycle_index)
                    .then_with(|| a.publish_timestamp.cmp(&b.publish_timestamp))
            }),
        }
        articles
    }

    /// Drops everything, including the cycle marker.
    pub fn clear(&mut self) {
        self.cycle = None;
        self.articles.clear();
        self.current = None;
    }

    /// Number of cached articles.
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    /// True when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}
