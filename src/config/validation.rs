//! Configuration validation module
//!
//! Checks that go beyond the field constraints declared with `validator`.

use crate::config::AppConfig;
use crate::shared::error::AppError;

/// Secret shipped in the default configuration
const DEVELOPMENT_SECRET: &str = "change-me-development-secret-at-least-32-chars";

/// Configuration validator for additional validation logic
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the complete configuration
    pub fn validate_config(config: &AppConfig) -> crate::Result<()> {
        Self::validate_logging(&config.logging)?;
        Self::validate_security(&config.security, config)?;
        Ok(())
    }

    fn validate_logging(logging: &crate::config::app_config::LoggingConfig) -> crate::Result<()> {
        if !["json", "text"].contains(&logging.format.to_ascii_lowercase().as_str()) {
            return Err(AppError::Config(format!(
                "Invalid log format: {} (expected json or text)",
                logging.format
            )));
        }

        tracing_subscriber::EnvFilter::try_new(&logging.level)
            .map_err(|e| AppError::Config(format!("Invalid log level '{}': {}", logging.level, e)))?;

        Ok(())
    }

    fn validate_security(
        security: &crate::config::app_config::SecurityConfig,
        config: &AppConfig,
    ) -> crate::Result<()> {
        if security.jwt.secret_key == DEVELOPMENT_SECRET {
            if !config.server.bind_address.is_loopback() {
                return Err(AppError::Config(
                    "The development JWT secret may only be used on a loopback address".to_string(),
                ));
            }
            tracing::warn!("Using the development JWT secret - set RECORDS_API__SECURITY__JWT__SECRET_KEY");
        }

        if security.client_ip_header.contains(char::is_whitespace) {
            return Err(AppError::Config(format!(
                "Invalid client IP header name: {}",
                security.client_ip_header
            )));
        }

        Ok(())
    }
}
