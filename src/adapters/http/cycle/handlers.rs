//! HTTP handlers for the news wire endpoints.
//!
//! These handlers connect Axum routes to application layer command/query
//! handlers. Every failure leaves as a JSON `{error}` body.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{BoxError, Json};
use tower::timeout::error::Elapsed;
use tracing::{error, warn};

use crate::application::handlers::cycle::{
    AdvanceCycleCommand, AdvanceCycleConfig, AdvanceCycleHandler, AdvanceCycleResult,
    EngineMode, GetCurrentArticleHandler, GetCurrentArticleQuery, GetCycleArticlesHandler,
    GetCycleArticlesQuery, ListArticlesHandler, ListArticlesQuery, RecordConsumptionCommand,
    RecordConsumptionHandler, ResetCycleCommand, ResetCycleHandler,
};
use crate::domain::cycle::CycleError;
use crate::ports::{ArticleSource, CursorStore};

use super::dto::{
    ConsumedRequest, ConsumedResponse, CurrentArticleResponse, CycleArticlesResponse,
    ErrorResponse, HealthResponse, NoArticlesResponse, ResetResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Application state for the wire endpoints.
#[derive(Clone)]
pub struct CycleAppState {
    pub source: Arc<dyn ArticleSource>,
    pub store: Arc<dyn CursorStore>,
    pub mode: EngineMode,
    pub advance: AdvanceCycleConfig,
    /// Requests running longer than this answer 408.
    pub request_timeout: Duration,
}

impl CycleAppState {
    pub fn new(source: Arc<dyn ArticleSource>, store: Arc<dyn CursorStore>) -> Self {
        Self {
            source,
            store,
            mode: EngineMode::default(),
            advance: AdvanceCycleConfig::default(),
            request_timeout: Duration::from_secs(30),
        }
    }

    pub fn with_mode(mut self, mode: EngineMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_advance_config(mut self, config: AdvanceCycleConfig) -> Self {
        self.advance = config;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Create handlers on demand from the shared state.
    pub fn advance_cycle_handler(&self) -> AdvanceCycleHandler {
        AdvanceCycleHandler::new(self.source.clone(), self.store.clone(), self.advance.clone())
    }

    pub fn get_current_article_handler(&self) -> GetCurrentArticleHandler {
        GetCurrentArticleHandler::new(self.source.clone(), self.store.clone())
    }

    pub fn get_cycle_articles_handler(&self) -> GetCycleArticlesHandler {
        GetCycleArticlesHandler::new(self.source.clone(), self.store.clone())
    }

    pub fn list_articles_handler(&self) -> ListArticlesHandler {
        ListArticlesHandler::new(self.source.clone())
    }

    pub fn record_consumption_handler(&self) -> RecordConsumptionHandler {
        RecordConsumptionHandler::new(self.store.clone())
    }

    pub fn reset_cycle_handler(&self) -> ResetCycleHandler {
        ResetCycleHandler::new(self.store.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET / - Advance the wire, or list articles in simple mode
pub async fn wire_root(State(state): State<CycleAppState>) -> Result<Response, CycleApiError> {
    match state.mode {
        EngineMode::Cycling => advance(&state).await,
        EngineMode::Simple => {
            let articles = state
                .list_articles_handler()
                .handle(ListArticlesQuery)
                .await?;
            Ok(Json(articles).into_response())
        }
    }
}

/// GET /current - Current article without advancing
pub async fn get_current_article(
    State(state): State<CycleAppState>,
) -> Result<impl IntoResponse, CycleApiError> {
    let result = state
        .get_current_article_handler()
        .handle(GetCurrentArticleQuery)
        .await?;

    Ok(Json(CurrentArticleResponse {
        article: result.article,
        metadata: result.metadata,
    }))
}

/// GET /cycle-articles - Articles reached so far in the active cycle
pub async fn get_cycle_articles(
    State(state): State<CycleAppState>,
) -> Result<impl IntoResponse, CycleApiError> {
    let result = state
        .get_cycle_articles_handler()
        .handle(GetCycleArticlesQuery)
        .await?;

    Ok(Json(CycleArticlesResponse {
        cycle_articles: result.cycle_articles,
        metadata: result.metadata,
    }))
}

/// GET /health - Liveness probe
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /cycle - Advance exactly one step
pub async fn advance_cycle(State(state): State<CycleAppState>) -> Result<Response, CycleApiError> {
    advance(&state).await
}

/// POST /consumed - Acknowledge the shown article
pub async fn record_consumption(
    State(state): State<CycleAppState>,
    request: Result<Json<ConsumedRequest>, JsonRejection>,
) -> Result<impl IntoResponse, CycleApiError> {
    let Json(request) = request.map_err(|e| CycleApiError::BadRequest(e.body_text()))?;

    let record = state
        .record_consumption_handler()
        .handle(RecordConsumptionCommand {
            index: request.index,
        })
        .await?;

    Ok(Json(ConsumedResponse {
        success: true,
        index: record.last_consumed_index,
    }))
}

/// POST /reset - Clear cursor, article map, and acknowledgment
pub async fn reset_cycle(
    State(state): State<CycleAppState>,
) -> Result<impl IntoResponse, CycleApiError> {
    state.reset_cycle_handler().handle(ResetCycleCommand).await?;
    Ok(Json(ResetResponse { success: true }))
}

/// Fallback for unknown paths and methods.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::not_found()))
}

async fn advance(state: &CycleAppState) -> Result<Response, CycleApiError> {
    let result = state
        .advance_cycle_handler()
        .handle(AdvanceCycleCommand)
        .await?;

    Ok(match result {
        AdvanceCycleResult::Advanced(snapshot) => Json(snapshot).into_response(),
        AdvanceCycleResult::NoArticles => Json(NoArticlesResponse::default()).into_response(),
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts domain errors to HTTP responses.
#[derive(Debug)]
pub enum CycleApiError {
    BadRequest(String),
    Timeout,
    Internal(String),
}

impl From<CycleError> for CycleApiError {
    fn from(err: CycleError) -> Self {
        match err {
            CycleError::ValidationFailed { .. } => CycleApiError::BadRequest(err.message()),
            other => CycleApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for CycleApiError {
    fn into_response(self) -> Response {
        match self {
            CycleApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(msg))).into_response()
            }
            CycleApiError::Timeout => {
                warn!("Request exceeded the configured timeout");
                (StatusCode::REQUEST_TIMEOUT, Json(ErrorResponse::new("Request Timeout")))
                    .into_response()
            }
            CycleApiError::Internal(msg) => {
                error!(error = %msg, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse::internal())).into_response()
            }
        }
    }
}

/// Turns errors raised by the service layers into JSON responses.
pub async fn handle_layer_error(err: BoxError) -> CycleApiError {
    if err.is::<Elapsed>() {
        CycleApiError::Timeout
    } else {
        CycleApiError::Internal(err.to_string())
    }
}
