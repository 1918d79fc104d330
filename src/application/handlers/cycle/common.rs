//! Loading helpers shared by the engine handlers.

use crate::domain::article::{publishable, Article};
use crate::domain::cycle::{CycleError, CycleRecord};
use crate::domain::foundation::Timestamp;
use crate::ports::{ArticleSource, CursorStore, SourceError, StoreError, Versioned};

impl From<SourceError> for CycleError {
    fn from(err: SourceError) -> Self {
        CycleError::source_unavailable(err.to_string())
    }
}

impl From<StoreError> for CycleError {
    fn from(err: StoreError) -> Self {
        CycleError::store_unavailable(err.to_string())
    }
}

/// Reads the source and keeps only publishable articles.
pub(crate) async fn load_candidates(source: &dyn ArticleSource) -> Result<Vec<Article>, CycleError> {
    let items = source.fetch_all().await?;
    Ok(publishable(items))
}

/// Reads the cycle record, falling back to a fresh one when none was stored.
pub(crate) async fn load_record(store: &dyn CursorStore) -> Result<CycleRecord, CycleError> {
    Ok(store
        .load()
        .await?
        .map(|stored: Versioned<CycleRecord>| stored.value)
        .unwrap_or_else(|| CycleRecord::fresh(Timestamp::now())))
}
