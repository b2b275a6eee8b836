//! Logging utilities module
//!
//! This module provides centralized logging functionality and utilities.

use crate::domain::routing::HttpMethod;
use crate::shared::error::AppError;
use tracing::{info, warn};

/// Logging utilities for the application
pub struct LoggingUtils;

impl LoggingUtils {
    /// Initialize logging with the specified configuration
    ///
    /// `RUST_LOG` takes precedence over `level` when set.
    pub fn initialize(level: &str, format: &str, structured: bool) -> crate::Result<()> {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level));

        let builder = fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(false)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_file(structured)
            .with_line_number(structured)
            .with_ansi(false);

        let result = if format.eq_ignore_ascii_case("json") {
            tracing::subscriber::set_global_default(builder.json().finish())
        } else {
            tracing::subscriber::set_global_default(builder.finish())
        };

        result.map_err(|e| AppError::Internal(format!("Failed to initialize logging: {}", e)))
    }

    /// Log an incoming request
    pub fn log_request(request_id: &str, method: HttpMethod, path: &str, client_ip: &str) {
        info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            client_ip = %client_ip,
            "Processing request"
        );
    }

    /// Log a completed request
    pub fn log_success(request_id: &str, method: HttpMethod, path: &str, status: u16, duration_ms: u64) {
        info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = status,
            duration_ms = %duration_ms,
            "Request completed"
        );
    }

    /// Log a request rejected before or instead of reaching a handler
    pub fn log_rejection(request_id: &str, method: HttpMethod, path: &str, error: &AppError, duration_ms: u64) {
        warn!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = error.http_status_code().as_u16(),
            error = %error,
            duration_ms = %duration_ms,
            "Request rejected"
        );
    }

    /// Generate a unique request ID
    pub fn generate_request_id() -> String {
        format!("req_{}", uuid::Uuid::new_v4().simple())
    }
}
