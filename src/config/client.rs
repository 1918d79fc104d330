//! Sync client configuration

use serde::Deserialize;
use std::time::Duration;
use url::Url;

use crate::domain::feed::FeedOrder;
use crate::domain::foundation::Backoff;

use super::error::ValidationError;

/// Sync client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Root URL of the engine
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Delay between successful polls, in milliseconds
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,

    /// First retry delay, in milliseconds
    #[serde(default = "default_backoff_base")]
    pub backoff_base_ms: u64,

    /// Longest retry delay, in milliseconds
    #[serde(default = "default_backoff_cap")]
    pub backoff_cap_ms: u64,

    /// Consecutive failures before polling halts
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Per-request timeout, in milliseconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,

    /// Feed ordering
    #[serde(default)]
    pub feed_order: FeedOrder,

    /// Articles per rendered page
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl ClientConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Retry policy built from the backoff settings
    pub fn backoff(&self) -> Backoff {
        Backoff::new(
            Duration::from_millis(self.backoff_base_ms),
            Duration::from_millis(self.backoff_cap_ms),
        )
    }

    /// Validate client configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| ValidationError::InvalidBaseUrl(format!("{}: {}", self.base_url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ValidationError::InvalidBaseUrl(self.base_url.clone()));
        }
        if self.poll_interval_ms == 0 {
            return Err(ValidationError::InvalidClientSetting("poll_interval_ms must be positive"));
        }
        if self.backoff_cap_ms < self.backoff_base_ms {
            return Err(ValidationError::InvalidClientSetting(
                "backoff_cap_ms is below backoff_base_ms",
            ));
        }
        if self.request_timeout_ms == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.page_size == 0 {
            return Err(ValidationError::InvalidClientSetting("page_size must be positive"));
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            poll_interval_ms: default_poll_interval(),
            backoff_base_ms: default_backoff_base(),
            backoff_cap_ms: default_backoff_cap(),
            max_retries: default_max_retries(),
            request_timeout_ms: default_request_timeout(),
            feed_order: FeedOrder::default(),
            page_size: default_page_size(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_poll_interval() -> u64 {
    5_000
}

fn default_backoff_base() -> u64 {
    1_000
}

fn default_backoff_cap() -> u64 {
    30_000
}

fn default_max_retries() -> u32 {
    3
}

fn default_request_timeout() -> u64 {
    10_000
}

fn default_page_size() -> usize {
    10
}
