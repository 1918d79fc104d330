//! JSON file article source.
//!
//! The file holds either a bare array of items or a table-scan style object
//! `{"Items": [...]}`. It is re-read on every fetch so edits show up on the
//! next advance.

use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::ports::{ArticleSource, SourceError};

/// Article source reading a JSON document from disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ArticleSource for JsonFileSource {
    async fn fetch_all(&self) -> Result<Vec<Value>, SourceError> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            SourceError::Unavailable(format!("{}: {}", self.path.display(), e))
        })?;

        let document: Value =
            serde_json::from_str(&raw).map_err(|e| SourceError::Malformed(e.to_string()))?;

        Ok(match document {
            Value::Array(items) => items,
            Value::Object(mut map) => match map.remove("Items") {
                Some(Value::Array(items)) => items,
                _ => {
                    warn!(path = %self.path.display(), "Article file has no item list");
                    Vec::new()
                }
            },
            _ => {
                warn!(path = %self.path.display(), "Article file is not a list");
                Vec::new()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn file_with(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn reads_bare_array() {
        let file = file_with(r#"[{"message_id": "a", "link": "https://example.com/a"}]"#);
        let source = JsonFileSource::new(file.path());

        let items = source.fetch_all().await.unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["message_id"], "a");
    }

    #[tokio::test]
    async fn reads_items_wrapper() {
        let file = file_with(r#"{"Items": [{"message_id": "a"}, {"message_id": "b"}], "Count": 2}"#);
        let source = JsonFileSource::new(file.path());

        assert_eq!(source.fetch_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn object_without_items_is_empty() {
        let file = file_with(r#"{"Count": 0}"#);
        let source = JsonFileSource::new(file.path());

        assert!(source.fetch_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_json_is_malformed() {
        let file = file_with("{not json");
        let source = JsonFileSource::new(file.path());

        let result = source.fetch_all().await;

        assert!(matches!(result, Err(SourceError::Malformed(_))));
    }

    #[tokio::test]
    async fn missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonFileSource::new(dir.path().join("missing.json"));

        let result = source.fetch_all().await;

        assert!(matches!(result, Err(SourceError::Unavailable(_))));
    }
}
