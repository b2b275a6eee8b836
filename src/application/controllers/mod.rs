//! Route handlers backed by application services

pub mod health;
pub mod record;

pub use health::HealthController;
pub use record::{RecordAction, RecordController};

use crate::domain::routing::ResponseSink;
use crate::shared::error::AppError;

/// Commit the envelope matching an application error
pub fn respond_error(sink: &mut ResponseSink, error: &AppError) {
    match error.field_errors() {
        Some(errors) => sink.validation_errors(errors),
        None => sink.error_json(&error.client_message(), error.http_status_code().as_u16()),
    }
}
