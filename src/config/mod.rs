//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `NEWSWIRE` prefix and nested values use double underscores as separators.
//! Every section has defaults, so an empty environment yields a working
//! in-memory engine on port 8080.
//!
//! # Example
//!
//! ```no_run
//! use newswire::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Serving {}", config.source.path.display());
//! ```

mod client;
mod engine;
mod error;
mod server;
mod source;
mod store;

pub use client::ClientConfig;
pub use engine::EngineConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{LogFormat, ServerConfig};
pub use source::SourceConfig;
pub use store::{StoreBackend, StoreConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Shared by the engine server and the feed client; each binary reads the
/// sections it needs. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Cycling engine behavior
    #[serde(default)]
    pub engine: EngineConfig,

    /// Article source
    #[serde(default)]
    pub source: SourceConfig,

    /// Cursor persistence
    #[serde(default)]
    pub store: StoreConfig,

    /// Sync client settings
    #[serde(default)]
    pub client: ClientConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `NEWSWIRE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `NEWSWIRE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `NEWSWIRE__ENGINE__MODE=simple` -> `engine.mode = simple`
    /// - `NEWSWIRE__STORE__REDIS_URL=...` -> `store.redis_url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("NEWSWIRE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate the sections the engine server uses
    ///
    /// A gated advance must give up waiting before the request timeout
    /// fires, otherwise the cursor can never move.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.engine.validate()?;
        self.source.validate()?;
        self.store.validate()?;
        if self.engine.consumption_gating
            && self.engine.consumption_wait() >= self.server.request_timeout()
        {
            return Err(ValidationError::InvalidEngineSetting(
                "consumption_wait_ms must be shorter than server.request_timeout_secs",
            ));
        }
        Ok(())
    }

    /// Validate the sections the feed client uses
    pub fn validate_client(&self) -> Result<(), ValidationError> {
        self.client.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::cycle::EngineMode;
    use crate::domain::feed::FeedOrder;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "NEWSWIRE__SERVER__PORT",
        "NEWSWIRE__SERVER__REQUEST_TIMEOUT_SECS",
        "NEWSWIRE__SERVER__LOG_FORMAT",
        "NEWSWIRE__ENGINE__MODE",
        "NEWSWIRE__ENGINE__CONSUMPTION_GATING",
        "NEWSWIRE__ENGINE__CONSUMPTION_WAIT_MS",
        "NEWSWIRE__SOURCE__PATH",
        "NEWSWIRE__STORE__BACKEND",
        "NEWSWIRE__STORE__REDIS_URL",
        "NEWSWIRE__CLIENT__BASE_URL",
        "NEWSWIRE__CLIENT__FEED_ORDER",
        "NEWSWIRE__CLIENT__PAGE_SIZE",
    ];

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_with_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.engine.mode, EngineMode::Cycling);
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert!(config.validate().is_ok());
        assert!(config.validate_client().is_ok());
    }

    #[test]
    fn test_engine_settings_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("NEWSWIRE__ENGINE__MODE", "simple");
        env::set_var("NEWSWIRE__ENGINE__CONSUMPTION_GATING", "true");
        env::set_var("NEWSWIRE__ENGINE__CONSUMPTION_WAIT_MS", "2500");
        env::set_var("NEWSWIRE__SOURCE__PATH", "/srv/wire/articles.json");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.engine.mode, EngineMode::Simple);
        assert!(config.engine.consumption_gating);
        assert_eq!(config.engine.consumption_wait_ms, 2500);
        assert_eq!(
            config.source.path,
            std::path::PathBuf::from("/srv/wire/articles.json")
        );
    }

    #[test]
    fn test_redis_backend_requires_url() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("NEWSWIRE__STORE__BACKEND", "redis");
        let missing = AppConfig::load();
        env::set_var("NEWSWIRE__STORE__REDIS_URL", "redis://localhost:6379");
        let present = AppConfig::load();
        clear_env();

        assert!(missing.unwrap().validate().is_err());
        let config = present.unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.store.redis_url.as_deref(), Some("redis://localhost:6379"));
    }

    #[test]
    fn test_client_settings_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("NEWSWIRE__CLIENT__BASE_URL", "http://wire.local:9000");
        env::set_var("NEWSWIRE__CLIENT__FEED_ORDER", "cycle_index");
        env::set_var("NEWSWIRE__CLIENT__PAGE_SIZE", "25");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.client.base_url, "http://wire.local:9000");
        assert_eq!(config.client.feed_order, FeedOrder::CycleIndex);
        assert_eq!(config.client.page_size, 25);
    }

    #[test]
    fn test_json_log_format() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("NEWSWIRE__SERVER__LOG_FORMAT", "json");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.log_format, LogFormat::Json);
    }

    #[test]
    fn test_gating_wait_must_fit_inside_request_timeout() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("NEWSWIRE__ENGINE__CONSUMPTION_GATING", "true");
        env::set_var("NEWSWIRE__ENGINE__CONSUMPTION_WAIT_MS", "60000");
        env::set_var("NEWSWIRE__SERVER__REQUEST_TIMEOUT_SECS", "30");
        let too_long = AppConfig::load();
        env::set_var("NEWSWIRE__ENGINE__CONSUMPTION_WAIT_MS", "30000");
        let equal = AppConfig::load();
        env::set_var("NEWSWIRE__ENGINE__CONSUMPTION_WAIT_MS", "2500");
        let fits = AppConfig::load();
        env::remove_var("NEWSWIRE__ENGINE__CONSUMPTION_GATING");
        env::set_var("NEWSWIRE__ENGINE__CONSUMPTION_WAIT_MS", "60000");
        let ungated = AppConfig::load();
        clear_env();

        assert!(matches!(
            too_long.unwrap().validate(),
            Err(ValidationError::InvalidEngineSetting(_))
        ));
        assert!(equal.unwrap().validate().is_err());
        assert!(fits.unwrap().validate().is_ok());
        assert!(ungated.unwrap().validate().is_ok());
    }

    #[test]
    fn test_custom_server_port() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("NEWSWIRE__SERVER__PORT", "3000");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
    }
}
