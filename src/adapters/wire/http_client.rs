//! reqwest implementation of the [`CycleApi`] port.
//!
//! Responses are decoded as loose JSON and folded through
//! [`CyclePayload::normalize`], so the client works against the axum server
//! as well as gateways that wrap bodies in a response envelope.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::{json, Value};

use crate::ports::{ApiError, CycleApi, CyclePayload};

/// Configuration for the HTTP cycle client.
#[derive(Debug, Clone)]
pub struct HttpCycleApiConfig {
    /// Engine root, e.g. `http://localhost:8080`.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl HttpCycleApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Cycle API client over HTTP.
pub struct HttpCycleApi {
    config: HttpCycleApiConfig,
    client: Client,
}

impl HttpCycleApi {
    pub fn new(config: HttpCycleApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn transport_error(&self, e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            ApiError::Transport(format!(
                "Request timed out after {}s",
                self.config.timeout.as_secs()
            ))
        } else if e.is_connect() {
            ApiError::Transport(format!("Connection failed: {}", e))
        } else {
            ApiError::Transport(e.to_string())
        }
    }

    async fn get(&self, path: &str) -> Result<Value, ApiError> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        Self::decode(response).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        let response = self
            .client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        Self::decode(response).await
    }

    async fn decode(response: Response) -> Result<Value, ApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
            });
        }
        response
            .json::<Value>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl CycleApi for HttpCycleApi {
    async fn advance(&self) -> Result<CyclePayload, ApiError> {
        self.get("/").await.map(CyclePayload::normalize)
    }

    async fn cycle_articles(&self) -> Result<CyclePayload, ApiError> {
        self.get("/cycle-articles").await.map(CyclePayload::normalize)
    }

    async fn acknowledge(&self, index: usize) -> Result<(), ApiError> {
        self.post("/consumed", json!({ "index": index })).await?;
        Ok(())
    }

    async fn reset(&self) -> Result<(), ApiError> {
        self.post("/reset", json!({})).await?;
        Ok(())
    }
}
