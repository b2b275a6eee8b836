//! Application configuration structures
//!
//! This module contains the main configuration structures for the application.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use validator::Validate;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServerConfig {
    /// Server address to bind to
    pub bind_address: IpAddr,

    /// Server port
    #[validate(range(min = 1, max = 65535))]
    pub port: u16,

    /// Maximum request body size in bytes
    #[validate(range(min = 1024, max = 10485760))] // 1KB to 10MB
    pub max_request_size: usize,
}

/// JWT configuration for session tokens
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct JwtConfig {
    /// HMAC secret key
    #[validate(length(min = 32))]
    pub secret_key: String,

    /// Token lifetime in seconds
    #[validate(range(min = 60, max = 86400))] // 1 minute to 24 hours
    pub expiration_seconds: u64,

    #[validate(length(min = 1))]
    pub issuer: String,

    #[validate(length(min = 1))]
    pub audience: String,
}

/// Security configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SecurityConfig {
    pub jwt: JwtConfig,

    /// Header consulted for the client address when running behind a proxy
    #[validate(length(min = 1))]
    pub client_ip_header: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoggingConfig {
    /// Log level
    #[validate(length(min = 1))]
    pub level: String,

    /// Log format: "json" or "text"
    #[validate(length(min = 1))]
    pub format: String,

    /// Include source file and line in log lines
    pub structured: bool,
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub security: SecurityConfig,
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                bind_address: IpAddr::V4(Ipv4Addr::LOCALHOST),
                port: 8080,
                max_request_size: 1024 * 1024, // 1MB
            },
            security: SecurityConfig {
                jwt: JwtConfig {
                    secret_key: "change-me-development-secret-at-least-32-chars".to_string(),
                    expiration_seconds: 8 * 3600,
                    issuer: "records-api".to_string(),
                    audience: "records-frontend".to_string(),
                },
                client_ip_header: "x-forwarded-for".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "text".to_string(),
                structured: false,
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, `Conf.toml` and environment variables
    pub fn load() -> crate::Result<Self> {
        let defaults = config::Config::try_from(&AppConfig::default())?;
        let config = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::with_name("Conf").required(false))
            .add_source(config::Environment::with_prefix("RECORDS_API").separator("__"))
            .build()
            .map_err(|e| crate::shared::error::AppError::Config(format!("Failed to build configuration: {}", e)))?;

        let config: AppConfig = config.try_deserialize()
            .map_err(|e| crate::shared::error::AppError::Config(format!("Failed to deserialize configuration: {}", e)))?;

        config.validate_config()?;
        super::ConfigValidator::validate_config(&config)?;

        Ok(config)
    }

    /// Validate each section with its declared constraints
    pub fn validate_config(&self) -> Result<(), validator::ValidationErrors> {
        self.server.validate()?;
        self.security.validate()?;
        self.security.jwt.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Socket address the HTTP server binds to
    pub fn server_address(&self) -> SocketAddr {
        SocketAddr::new(self.server.bind_address, self.server.port)
    }
}
