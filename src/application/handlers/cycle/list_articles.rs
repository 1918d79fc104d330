//! ListArticlesHandler - Query handler for the plain candidate list.

use std::sync::Arc;

use crate::domain::article::Article;
use crate::domain::cycle::CycleError;
use crate::ports::ArticleSource;

use super::common::load_candidates;

/// Query for every publishable article, in source order.
#[derive(Debug, Clone, Default)]
pub struct ListArticlesQuery;

/// Handler for listing articles without touching the cursor.
pub struct ListArticlesHandler {
    source: Arc<dyn ArticleSource>,
}

impl ListArticlesHandler {
    pub fn new(source: Arc<dyn ArticleSource>) -> Self {
        Self { source }
    }

    pub async fn handle(&self, _query: ListArticlesQuery) -> Result<Vec<Article>, CycleError> {
        load_candidates(self.source.as_ref()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;
    use crate::ports::SourceError;
    use async_trait::async_trait;
    use serde_json::{json, Value};

    struct MockSource {
        items: Result<Vec<Value>, SourceError>,
    }

    #[async_trait]
    impl ArticleSource for MockSource {
        async fn fetch_all(&self) -> Result<Vec<Value>, SourceError> {
            self.items.clone()
        }
    }

    #[tokio::test]
    async fn filters_invalid_links_and_keeps_order() {
        let handler = ListArticlesHandler::new(Arc::new(MockSource {
            items: Ok(vec![
                json!({ "message_id": "b", "link": "https://example.com/b" }),
                json!({ "message_id": "x", "link": "not-a-url" }),
                json!({ "link": "https://example.com/no-id" }),
                json!({ "message_id": "a", "link": "https://example.com/a" }),
            ]),
        }));

        let articles = handler.handle(ListArticlesQuery).await.unwrap();

        let ids: Vec<_> = articles.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn source_failure_maps_to_source_unavailable() {
        let handler = ListArticlesHandler::new(Arc::new(MockSource {
            items: Err(SourceError::Unavailable("disk gone".to_string())),
        }));

        let err = handler.handle(ListArticlesQuery).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::SourceUnavailable);
    }
}
