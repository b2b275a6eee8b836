//! Error handling module
//!
//! This module provides centralized error handling for the application.

use crate::domain::routing::{DispatchError, RouteTableError};
use crate::domain::validation::{FieldErrors, RuleParseError};
use thiserror::Error;
use warp::http::StatusCode;

/// Application error types
#[derive(Error, Debug, Clone)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid rule declaration: {0}")]
    RuleDeclaration(#[from] RuleParseError),

    #[error("Invalid route declaration: {0}")]
    RouteDeclaration(#[from] RouteTableError),

    #[error("Los datos enviados no son válidos.")]
    Validation(FieldErrors),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Dispatch(#[from] DispatchError),

    #[error("Registro no encontrado.")]
    RecordNotFound,

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("JSON serialization error: {0}")]
    Json(String),

    #[error("Request too large: {size} bytes exceeds limit of {limit} bytes")]
    RequestTooLarge { size: usize, limit: usize },

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get HTTP status code for this error
    pub fn http_status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(_) | AppError::Json(_) => StatusCode::BAD_REQUEST,
            AppError::Dispatch(DispatchError::Unauthenticated) => StatusCode::UNAUTHORIZED,
            AppError::Dispatch(DispatchError::Forbidden { .. }) => StatusCode::FORBIDDEN,
            AppError::Dispatch(DispatchError::NotFound { .. }) => StatusCode::NOT_FOUND,
            AppError::RecordNotFound => StatusCode::NOT_FOUND,
            AppError::Authentication(_) => StatusCode::UNAUTHORIZED,
            AppError::RequestTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Config(_)
            | AppError::RuleDeclaration(_)
            | AppError::RouteDeclaration(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to API clients.
    ///
    /// Startup and internal faults are collapsed into a generic message so that
    /// configuration details never leak over the wire.
    pub fn client_message(&self) -> String {
        match self {
            AppError::Config(_)
            | AppError::RuleDeclaration(_)
            | AppError::RouteDeclaration(_)
            | AppError::Internal(_) => "Error interno del servidor.".to_string(),
            AppError::Authentication(_) => "No autenticado.".to_string(),
            AppError::Json(_) => "El cuerpo de la petición no es un JSON válido.".to_string(),
            AppError::RequestTooLarge { .. } => {
                "La petición excede el tamaño máximo permitido.".to_string()
            }
            other => other.to_string(),
        }
    }

    /// Field errors carried by a validation failure
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            AppError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Application result type
pub type AppResult<T> = Result<T, AppError>;

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Json(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        AppError::Authentication(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Config(format!("Configuration validation failed: {}", err))
    }
}
