//! Cycle record - cursor and article map persisted as one unit.
//!
//! All cycling rules live here as pure functions over the record and the
//! candidate set; the application layer only loads, calls, and writes back.

use serde::{Deserialize, Serialize};

use crate::domain::article::Article;
use crate::domain::foundation::Timestamp;

use super::article_map::CycleArticleMap;
use super::cursor::CursorState;
use super::snapshot::{sort_newest_first, CycleMetadata, CycleSnapshot};

/// The singleton record behind the cycling engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleRecord {
    #[serde(flatten)]
    pub cursor: CursorState,
    #[serde(default)]
    pub articles_map: CycleArticleMap,
}

impl CycleRecord {
    /// A record for a wire that has not published anything yet.
    pub fn fresh(now: Timestamp) -> Self {
        Self {
            cursor: CursorState::fresh(now),
            articles_map: CycleArticleMap::new(),
        }
    }

    /// Publishes the next article of `articles`.
    ///
    /// Returns `None` for an empty candidate set, leaving the record untouched.
    /// On wraparound the cycle counter grows and cycles older than
    /// `retained_cycles` are pruned from the article map.
    pub fn advance(
        &mut self,
        articles: &[Article],
        now: Timestamp,
        retained_cycles: u64,
    ) -> Option<CycleSnapshot> {
        if articles.is_empty() {
            return None;
        }

        let step = self.cursor.next_step(articles.len());
        self.cursor.apply(step, now);
        if step.wrapped {
            self.articles_map
                .retain_recent(self.cursor.cycle_count, retained_cycles);
        }

        let current = &articles[step.index];
        let stamp = self.articles_map.first_sight(
            self.cursor.cycle_count,
            &current.id,
            now,
            step.index,
        );

        Some(CycleSnapshot {
            article: current.stamped(&stamp, true),
            metadata: self.metadata(articles, step.wrapped),
            cycle_articles: self.cycle_articles(articles),
        })
    }

    /// The currently published article, without moving the cursor.
    pub fn current(&self, articles: &[Article]) -> Option<Article> {
        let index = self.cursor.position()?;
        let article = articles.get(index)?;
        Some(
            match self
                .articles_map
                .stamp(self.cursor.cycle_count, &article.id)
            {
                Some(stamp) => article.stamped(stamp, true),
                None => Article {
                    is_current: true,
                    ..article.clone()
                },
            },
        )
    }

    /// Articles reached so far in the active cycle, newest first.
    ///
    /// Stamped ids that are no longer in the candidate set are skipped.
    pub fn cycle_articles(&self, articles: &[Article]) -> Vec<Article> {
        let Some(stamps) = self.articles_map.cycle(self.cursor.cycle_count) else {
            return Vec::new();
        };
        let current_id = self
            .cursor
            .position()
            .and_then(|index| articles.get(index))
            .map(|article| &article.id);

        let mut reached: Vec<Article> = articles
            .iter()
            .filter_map(|article| {
                stamps
                    .get(&article.id)
                    .map(|stamp| article.stamped(stamp, Some(&article.id) == current_id))
            })
            .collect();
        sort_newest_first(&mut reached);
        reached
    }

    /// Cursor metadata for a response.
    pub fn metadata(&self, articles: &[Article], is_new_cycle: bool) -> CycleMetadata {
        CycleMetadata {
            current_index: self.cursor.current_index,
            cycle_count: self.cursor.cycle_count,
            is_new_cycle,
            total_articles: articles.len(),
            current_article: self
                .cursor
                .position()
                .and_then(|index| articles.get(index))
                .map(|article| article.id.clone()),
            last_updated: self.cursor.last_updated,
        }
    }
}
