//! GetCycleArticlesHandler - Query handler for the active cycle's feed.

use std::sync::Arc;

use crate::domain::article::Article;
use crate::domain::cycle::{CycleError, CycleMetadata};
use crate::ports::{ArticleSource, CursorStore};

use super::common::{load_candidates, load_record};

/// Query for every article reached so far in the active cycle.
#[derive(Debug, Clone, Default)]
pub struct GetCycleArticlesQuery;

#[derive(Debug, Clone, PartialEq)]
pub struct GetCycleArticlesResult {
    /// Newest first, the cursor's article flagged current.
    pub cycle_articles: Vec<Article>,
    pub metadata: CycleMetadata,
}

/// Handler for reading the cycle snapshot.
pub struct GetCycleArticlesHandler {
    source: Arc<dyn ArticleSource>,
    store: Arc<dyn CursorStore>,
}

impl GetCycleArticlesHandler {
    pub fn new(source: Arc<dyn ArticleSource>, store: Arc<dyn CursorStore>) -> Self {
        Self { source, store }
    }

    pub async fn handle(
        &self,
        _query: GetCycleArticlesQuery,
    ) -> Result<GetCycleArticlesResult, CycleError> {
        let candidates = load_candidates(self.source.as_ref()).await?;
        let record = load_record(self.store.as_ref()).await?;

        Ok(GetCycleArticlesResult {
            cycle_articles: record.cycle_articles(&candidates),
            metadata: record.metadata(&candidates, false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::cursor_store::InMemoryCursorStore;
    use crate::adapters::source::InMemorySource;
    use crate::application::handlers::cycle::{
        AdvanceCycleCommand, AdvanceCycleConfig, AdvanceCycleHandler,
    };
    use serde_json::json;

    #[tokio::test]
    async fn returns_reached_articles_newest_first() {
        let source = Arc::new(InMemorySource::new(
            ["a", "b", "c"]
                .iter()
                .map(|id| json!({ "message_id": id, "link": format!("https://example.com/{}", id) }))
                .collect(),
        ));
        let store = Arc::new(InMemoryCursorStore::new());
        let advance =
            AdvanceCycleHandler::new(source.clone(), store.clone(), AdvanceCycleConfig::default());
        advance.handle(AdvanceCycleCommand).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        advance.handle(AdvanceCycleCommand).await.unwrap();

        let result = GetCycleArticlesHandler::new(source, store)
            .handle(GetCycleArticlesQuery)
            .await
            .unwrap();

        let ids: Vec<_> = result.cycle_articles.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert!(result.cycle_articles[0].is_current);
        assert!(!result.cycle_articles[1].is_current);
        assert_eq!(result.metadata.current_index, 1);
    }

    #[tokio::test]
    async fn empty_before_first_advance() {
        let handler = GetCycleArticlesHandler::new(
            Arc::new(InMemorySource::default()),
            Arc::new(InMemoryCursorStore::new()),
        );

        let result = handler.handle(GetCycleArticlesQuery).await.unwrap();

        assert!(result.cycle_articles.is_empty());
        assert_eq!(result.metadata.cycle_count, 0);
    }
}
