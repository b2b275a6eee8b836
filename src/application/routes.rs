//! Route table for the records API.
//!
//! `GET /health` is public; every resource gets the five CRUD routes, gated
//! by the roles its definition declares.

use crate::application::catalog::default_resources;
use crate::application::controllers::{HealthController, RecordAction, RecordController};
use crate::application::services::RecordService;
use crate::application::use_cases::HealthCheckUseCase;
use crate::domain::records::RecordStore;
use crate::domain::routing::{HttpMethod, RoleId, RouteTable};
use crate::shared::error::AppResult;
use std::sync::Arc;
use tracing::info;

pub fn build_route_table(store: Arc<dyn RecordStore>) -> AppResult<RouteTable> {
    let resources = default_resources()?;
    let mut builder = RouteTable::builder();

    let health = Arc::new(HealthCheckUseCase::new(store.clone(), resources.len()));
    builder.route(
        HttpMethod::Get,
        "/health",
        HealthController::new(health),
        Vec::<RoleId>::new(),
    )?;

    for definition in resources {
        let collection = format!("/{}", definition.name);
        let member = format!("/{}/{{id}}", definition.name);
        let read = definition.read_roles.clone();
        let write = definition.write_roles.clone();
        let delete = definition.delete_roles.clone();
        let service = Arc::new(RecordService::new(definition, store.clone()));

        builder
            .route(
                HttpMethod::Get,
                &collection,
                RecordController::new(service.clone(), RecordAction::List),
                read.clone(),
            )?
            .route(
                HttpMethod::Get,
                &member,
                RecordController::new(service.clone(), RecordAction::Show),
                read,
            )?
            .route(
                HttpMethod::Post,
                &collection,
                RecordController::new(service.clone(), RecordAction::Create),
                write.clone(),
            )?
            .route(
                HttpMethod::Put,
                &member,
                RecordController::new(service.clone(), RecordAction::Update),
                write,
            )?
            .route(
                HttpMethod::Delete,
                &member,
                RecordController::new(service, RecordAction::Delete),
                delete,
            )?;
    }

    let table = builder.build();
    info!(routes = table.len(), "Route table built");
    Ok(table)
}
