//! Test suite for the records API
//!
//! - `common`: configuration, token and request-body fixtures
//! - `integration`: full warp filter driven with `warp::test`

pub mod common;
pub mod integration;

/// Test configuration and utilities
pub mod config {
    use crate::config::AppConfig;
    use std::sync::Once;

    static INIT: Once = Once::new();

    /// Initialize test environment
    pub fn init() {
        INIT.call_once(|| {
            let _ = tracing_subscriber::fmt()
                .with_env_filter("debug")
                .with_test_writer()
                .try_init();
        });
    }

    /// Create test configuration
    pub fn test_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.server.port = 0;
        config.server.bind_address = "127.0.0.1".parse().unwrap();
        config.server.max_request_size = 4096;
        config
    }
}

/// Test result types
pub type TestResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;
