//! HTTP DTOs (Data Transfer Objects) for the news wire endpoints.
//!
//! These types define the JSON request/response structure of the wire API.
//! Advance responses reuse [`CycleSnapshot`](crate::domain::cycle::CycleSnapshot)
//! directly since its serialized form already is the wire format.

use serde::{Deserialize, Serialize};

use crate::domain::article::Article;
use crate::domain::cycle::CycleMetadata;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /consumed`.
#[derive(Debug, Clone, Deserialize)]
pub struct ConsumedRequest {
    /// Cursor index of the article the client has shown.
    pub index: i64,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Advance outcome when the candidate set is empty.
#[derive(Debug, Clone, Serialize)]
pub struct NoArticlesResponse {
    pub message: String,
    pub articles: Vec<Article>,
}

impl Default for NoArticlesResponse {
    fn default() -> Self {
        Self {
            message: "No articles available".to_string(),
            articles: Vec::new(),
        }
    }
}

/// Response of `GET /current`.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentArticleResponse {
    /// `null` while the cursor is fresh.
    pub article: Option<Article>,
    pub metadata: CycleMetadata,
}

/// Response of `GET /cycle-articles`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleArticlesResponse {
    pub cycle_articles: Vec<Article>,
    pub metadata: CycleMetadata,
}

/// Response of `POST /consumed`.
#[derive(Debug, Clone, Serialize)]
pub struct ConsumedResponse {
    pub success: bool,
    pub index: i64,
}

/// Response of `POST /reset`.
#[derive(Debug, Clone, Serialize)]
pub struct ResetResponse {
    pub success: bool,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Error body used by every failing response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    pub fn not_found() -> Self {
        Self::new("Not Found")
    }

    pub fn internal() -> Self {
        Self::new("Internal Server Error")
    }
}
