//! Records API Server - REST backend for staff, vehicle, emergency,
//! maintenance and driving-permit records
//!
//! Incoming bodies are checked by a declarative rule validator and every
//! request goes through a role-gated dispatcher before reaching a handler.
//!
//! Layers:
//! - `domain`: validation engine, route dispatcher, record model
//! - `application`: resource catalog, record services and handlers
//! - `infrastructure`: token sessions, storage adapter and warp transport
//! - `shared`: error taxonomy and logging helpers
//!
//! ```
//! use records_api::domain::validation::{FieldRules, ValidationOutcome};
//! use serde_json::json;
//!
//! let rules = FieldRules::parse([
//!     ("nombre", "required|string|max:100"),
//!     ("plazas", "int|min:1"),
//! ])
//! .unwrap();
//!
//! let input = json!({"nombre": "  Ana ", "plazas": "3"});
//! match rules.validate(input.as_object().unwrap()) {
//!     ValidationOutcome::Clean(record) => {
//!         assert_eq!(record["nombre"], json!("Ana"));
//!         assert_eq!(record["plazas"], json!(3));
//!     }
//!     ValidationOutcome::Invalid(errors) => panic!("{:?}", errors),
//! }
//! ```
//!
//! Records are persisted through the [`domain::records::RecordStore`] port:
//!
//! ```
//! # tokio_test::block_on(async {
//! use records_api::{domain::records::RecordStore, InMemoryRecordStore};
//!
//! let store = InMemoryRecordStore::new();
//! let record = store.insert("vehiculos", serde_json::Map::new()).await.unwrap();
//! assert_eq!(record.id, 1);
//! # });
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;

#[cfg(test)]
mod tests;

pub use config::AppConfig;
pub use infrastructure::{HttpServer, InMemoryRecordStore};
pub use shared::error::{AppError, AppResult};

/// Application result type
pub type Result<T> = std::result::Result<T, shared::error::AppError>;
