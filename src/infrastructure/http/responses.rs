//! HTTP responses module
//!
//! Converts committed responses and application errors into warp replies.

use crate::{
    domain::routing::handler::{error_envelope, validation_envelope, Response},
    shared::error::AppError,
};
use warp::http::StatusCode;
use warp::reply::{Json, WithStatus};

/// Response formatter for HTTP responses
pub struct ResponseFormatter;

impl ResponseFormatter {
    /// Reply for a response committed by a handler
    pub fn from_response(response: &Response) -> WithStatus<Json> {
        let status =
            StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        warp::reply::with_status(warp::reply::json(&response.body), status)
    }

    /// Reply for an error raised before or around dispatch
    pub fn from_app_error(error: &AppError) -> WithStatus<Json> {
        let body = match error.field_errors() {
            Some(errors) => validation_envelope(errors),
            None => error_envelope(&error.client_message()),
        };
        warp::reply::with_status(warp::reply::json(&body), error.http_status_code())
    }
}
