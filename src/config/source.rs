//! Article source configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Article source configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// JSON file holding the article list
    #[serde(default = "default_path")]
    pub path: PathBuf,
}

impl SourceConfig {
    /// Validate source configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("SOURCE__PATH"));
        }
        Ok(())
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

fn default_path() -> PathBuf {
    PathBuf::from("articles.json")
}
