//! Application layer - Resource catalog, services and route handlers
//!
//! This module wires the validation engine and the dispatcher to the
//! record resources exposed by the API.

pub mod catalog;
pub mod controllers;
pub mod roles;
pub mod routes;
pub mod services;
pub mod use_cases;

pub use catalog::{default_resources, ResourceDefinition};
pub use routes::build_route_table;
pub use services::RecordService;
pub use use_cases::HealthCheckUseCase;
