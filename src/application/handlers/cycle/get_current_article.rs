//! GetCurrentArticleHandler - Query handler for the live article.

use std::sync::Arc;

use crate::domain::article::Article;
use crate::domain::cycle::{CycleError, CycleMetadata};
use crate::ports::{ArticleSource, CursorStore};

use super::common::{load_candidates, load_record};

/// Query for the current article without moving the cursor.
#[derive(Debug, Clone, Default)]
pub struct GetCurrentArticleQuery;

/// The current article, if the cursor points at one.
#[derive(Debug, Clone, PartialEq)]
pub struct GetCurrentArticleResult {
    pub article: Option<Article>,
    pub metadata: CycleMetadata,
}

/// Handler for reading the current article.
pub struct GetCurrentArticleHandler {
    source: Arc<dyn ArticleSource>,
    store: Arc<dyn CursorStore>,
}

impl GetCurrentArticleHandler {
    pub fn new(source: Arc<dyn ArticleSource>, store: Arc<dyn CursorStore>) -> Self {
        Self { source, store }
    }

    pub async fn handle(
        &self,
        _query: GetCurrentArticleQuery,
    ) -> Result<GetCurrentArticleResult, CycleError> {
        let candidates = load_candidates(self.source.as_ref()).await?;
        let record = load_record(self.store.as_ref()).await?;

        Ok(GetCurrentArticleResult {
            article: record.current(&candidates),
            metadata: record.metadata(&candidates, false),
        })
    }
}
