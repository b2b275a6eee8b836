//! Handler contract: request context in, one terminal response out through
//! the [`ResponseSink`].

use super::method::HttpMethod;
use super::pattern::PathParams;
use super::session::RoleId;
use crate::domain::validation::FieldErrors;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::warn;

/// Message sent with every 422 response
pub const VALIDATION_FAILED_MESSAGE: &str = "Los datos enviados no son válidos.";

/// Per-request data handed to handlers
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: String,
    pub method: HttpMethod,
    pub path: String,
    pub client_ip: String,
    /// Role of the authenticated caller, if any
    pub role: Option<RoleId>,
    /// Decoded JSON body; `{}` when the request had none
    pub body: Map<String, Value>,
    pub received_at: DateTime<Utc>,
}

impl RequestContext {
    pub fn new(request_id: String, method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            request_id,
            method,
            path: path.into(),
            client_ip: "unknown".to_string(),
            role: None,
            body: Map::new(),
            received_at: Utc::now(),
        }
    }

    pub fn with_client_ip(mut self, client_ip: impl Into<String>) -> Self {
        self.client_ip = client_ip.into();
        self
    }

    pub fn with_role(mut self, role: Option<RoleId>) -> Self {
        self.role = role;
        self
    }

    pub fn with_body(mut self, body: Map<String, Value>) -> Self {
        self.body = body;
        self
    }
}

/// Committed response: status code plus JSON envelope
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: Value,
}

/// Collects the single terminal response of a request
#[derive(Debug, Default)]
pub struct ResponseSink {
    committed: Option<Response>,
}

impl ResponseSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose the status for the next `json` commit
    pub fn status(&mut self, code: u16) -> StatusResponder<'_> {
        StatusResponder { sink: self, status: code }
    }

    /// Commit a 200 success envelope
    pub fn json(&mut self, payload: Value, message: Option<&str>) {
        self.status(200).json(payload, message);
    }

    /// Commit an error envelope with `code`
    pub fn error_json(&mut self, message: &str, code: u16) {
        self.commit(code, error_envelope(message));
    }

    /// Commit a 422 carrying every field violation
    pub fn validation_errors(&mut self, errors: &FieldErrors) {
        self.commit(422, validation_envelope(errors));
    }

    pub fn is_committed(&self) -> bool {
        self.committed.is_some()
    }

    pub fn response(&self) -> Option<&Response> {
        self.committed.as_ref()
    }

    pub fn into_response(self) -> Option<Response> {
        self.committed
    }

    fn commit(&mut self, status: u16, body: Value) {
        if let Some(existing) = &self.committed {
            warn!(
                committed_status = existing.status,
                ignored_status = status,
                "Response already committed; ignoring second response"
            );
            return;
        }
        self.committed = Some(Response { status, body });
    }
}

/// `sink.status(code).json(payload, message)`
pub struct StatusResponder<'a> {
    sink: &'a mut ResponseSink,
    status: u16,
}

impl StatusResponder<'_> {
    pub fn json(self, payload: Value, message: Option<&str>) {
        self.sink.commit(self.status, success_envelope(payload, message));
    }
}

pub fn success_envelope(payload: Value, message: Option<&str>) -> Value {
    json!({
        "success": true,
        "message": message,
        "data": payload,
    })
}

pub fn error_envelope(message: &str) -> Value {
    json!({
        "success": false,
        "message": message,
    })
}

pub fn validation_envelope(errors: &FieldErrors) -> Value {
    json!({
        "success": false,
        "message": VALIDATION_FAILED_MESSAGE,
        "errors": errors,
    })
}

/// Route handler.
///
/// Handlers report outcomes only through the sink; the dispatcher does not
/// inspect anything a handler returns.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, ctx: &RequestContext, sink: &mut ResponseSink, params: &PathParams);
}

/// Adapter turning a synchronous closure into a [`Handler`]
pub struct FnHandler<F>(F);

#[async_trait]
impl<F> Handler for FnHandler<F>
where
    F: Fn(&RequestContext, &mut ResponseSink, &PathParams) + Send + Sync,
{
    async fn handle(&self, ctx: &RequestContext, sink: &mut ResponseSink, params: &PathParams) {
        (self.0)(ctx, sink, params)
    }
}

pub fn handler_fn<F>(f: F) -> Arc<dyn Handler>
where
    F: Fn(&RequestContext, &mut ResponseSink, &PathParams) + Send + Sync + 'static,
{
    Arc::new(FnHandler(f))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_json_commits_envelope() {
        let mut sink = ResponseSink::new();
        sink.status(201).json(json!({"id": 1}), Some("Registro creado."));
        let response = sink.into_response().unwrap();
        assert_eq!(response.status, 201);
        assert_eq!(
            response.body,
            json!({"success": true, "message": "Registro creado.", "data": {"id": 1}})
        );
    }

    #[test]
    fn test_second_commit_is_ignored() {
        let mut sink = ResponseSink::new();
        sink.error_json("Registro no encontrado.", 404);
        sink.json(json!([]), None);
        let response = sink.into_response().unwrap();
        assert_eq!(response.status, 404);
        assert_eq!(response.body["success"], json!(false));
    }

    #[test]
    fn test_validation_errors_envelope() {
        let mut errors = FieldErrors::new();
        errors.push("nombre", "El campo nombre es obligatorio.");
        let mut sink = ResponseSink::new();
        sink.validation_errors(&errors);
        let response = sink.response().unwrap();
        assert_eq!(response.status, 422);
        assert_eq!(
            response.body["errors"],
            json!({"nombre": ["El campo nombre es obligatorio."]})
        );
    }

    #[tokio::test]
    async fn test_fn_handler_runs_closure() {
        let handler = handler_fn(|_ctx, sink, params| {
            sink.json(json!({"id": params.get("id")}), None);
        });
        let ctx = RequestContext::new("req_test".to_string(), HttpMethod::Get, "/x/1");
        let mut params = PathParams::new();
        params.push("id", "1");
        let mut sink = ResponseSink::new();
        handler.handle(&ctx, &mut sink, &params).await;
        assert_eq!(sink.response().unwrap().body["data"], json!({"id": "1"}));
    }
}
