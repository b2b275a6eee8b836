//! CRUD handlers for record resources

use super::respond_error;
use crate::application::services::RecordService;
use crate::domain::records::RecordId;
use crate::domain::routing::{Handler, PathParams, RequestContext, ResponseSink};
use crate::shared::error::{AppError, AppResult};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

/// Operation bound to a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordAction {
    List,
    Show,
    Create,
    Update,
    Delete,
}

pub struct RecordController {
    service: Arc<RecordService>,
    action: RecordAction,
}

impl RecordController {
    pub fn new(service: Arc<RecordService>, action: RecordAction) -> Arc<dyn Handler> {
        Arc::new(Self { service, action })
    }

    async fn run(&self, ctx: &RequestContext, sink: &mut ResponseSink, params: &PathParams) -> AppResult<()> {
        match self.action {
            RecordAction::List => {
                let records = self.service.list().await?;
                sink.json(serde_json::to_value(records)?, None);
            }
            RecordAction::Show => {
                let record = self.service.find(record_id(params)?).await?;
                sink.json(serde_json::to_value(record)?, None);
            }
            RecordAction::Create => {
                let record = self.service.create(&ctx.body).await?;
                sink.status(201)
                    .json(serde_json::to_value(record)?, Some("Registro creado correctamente."));
            }
            RecordAction::Update => {
                let id = record_id(params)?;
                let record = self.service.update(id, &ctx.body).await?;
                sink.json(
                    serde_json::to_value(record)?,
                    Some("Registro actualizado correctamente."),
                );
            }
            RecordAction::Delete => {
                let id = record_id(params)?;
                self.service.delete(id).await?;
                sink.json(json!({ "id": id }), Some("Registro eliminado correctamente."));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl Handler for RecordController {
    async fn handle(&self, ctx: &RequestContext, sink: &mut ResponseSink, params: &PathParams) {
        if let Err(e) = self.run(ctx, sink, params).await {
            respond_error(sink, &e);
        }
    }
}

fn record_id(params: &PathParams) -> AppResult<RecordId> {
    params
        .get("id")
        .and_then(|raw| raw.parse::<RecordId>().ok())
        .ok_or_else(|| AppError::BadRequest("Identificador no válido.".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::catalog::default_resources;
    use crate::domain::routing::HttpMethod;
    use crate::infrastructure::adapters::InMemoryRecordStore;
    use serde_json::Value;

    fn service() -> Arc<RecordService> {
        let definition = default_resources()
            .unwrap()
            .into_iter()
            .find(|r| r.name == "carnets")
            .unwrap();
        Arc::new(RecordService::new(definition, Arc::new(InMemoryRecordStore::new())))
    }

    fn ctx(method: HttpMethod, body: Value) -> RequestContext {
        RequestContext::new("req_test".to_string(), method, "/carnets")
            .with_body(body.as_object().cloned().unwrap())
    }

    fn id_param(id: &str) -> PathParams {
        let mut params = PathParams::new();
        params.push("id", id);
        params
    }

    async fn call(
        service: &Arc<RecordService>,
        action: RecordAction,
        ctx: &RequestContext,
        params: &PathParams,
    ) -> crate::domain::routing::Response {
        let mut sink = ResponseSink::new();
        RecordController::new(service.clone(), action)
            .handle(ctx, &mut sink, params)
            .await;
        sink.into_response().unwrap()
    }

    #[tokio::test]
    async fn test_create_then_show() {
        let service = service();
        let body = json!({
            "personal_id": 7,
            "tipo": "C1",
            "numero": "X-1234",
            "fecha_expedicion": "2020-01-15",
            "fecha_caducidad": "2030-01-15"
        });
        let created = call(&service, RecordAction::Create, &ctx(HttpMethod::Post, body), &PathParams::new()).await;
        assert_eq!(created.status, 201);
        assert_eq!(created.body["message"], json!("Registro creado correctamente."));
        assert_eq!(created.body["data"]["id"], json!(1));

        let shown = call(&service, RecordAction::Show, &ctx(HttpMethod::Get, json!({})), &id_param("1")).await;
        assert_eq!(shown.status, 200);
        assert_eq!(shown.body["data"]["tipo"], json!("C1"));
    }

    #[tokio::test]
    async fn test_invalid_body_yields_422() {
        let service = service();
        let response = call(
            &service,
            RecordAction::Create,
            &ctx(HttpMethod::Post, json!({"tipo": "Z"})),
            &PathParams::new(),
        )
        .await;
        assert_eq!(response.status, 422);
        assert_eq!(response.body["message"], json!("Los datos enviados no son válidos."));
        assert!(response.body["errors"]["tipo"].is_array());
        assert!(response.body["errors"]["personal_id"].is_array());
    }

    #[tokio::test]
    async fn test_bad_and_unknown_ids() {
        let service = service();
        let empty = ctx(HttpMethod::Get, json!({}));

        let bad = call(&service, RecordAction::Show, &empty, &id_param("abc")).await;
        assert_eq!(bad.status, 400);
        assert_eq!(bad.body, json!({"success": false, "message": "Identificador no válido."}));

        let missing = call(&service, RecordAction::Delete, &empty, &id_param("41")).await;
        assert_eq!(missing.status, 404);
        assert_eq!(missing.body["message"], json!("Registro no encontrado."));
    }
}
