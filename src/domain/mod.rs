//! Domain layer - Core rules independent of HTTP and storage
//!
//! This module contains the validation engine, the protected route
//! dispatcher, the record model and health reporting.

pub mod health;
pub mod records;
pub mod routing;
pub mod validation;

pub use health::{HealthReport, HealthStatus};
pub use records::{RecordId, RecordStore, StoredRecord};
pub use routing::{
    DispatchError, Dispatcher, Handler, HttpMethod, PathParams, RequestContext, ResponseSink,
    RoleId, RouteTable, Session,
};
pub use validation::{FieldErrors, FieldRules, Rule, RuleSet, ValidationOutcome};
