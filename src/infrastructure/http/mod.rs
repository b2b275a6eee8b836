//! HTTP infrastructure module
//!
//! This module contains the warp transport: server wiring, the catch-all
//! route filter, request handling and response formatting.

pub mod body;
pub mod handlers;
pub mod responses;
pub mod routes;
pub mod server;
pub mod utils;

pub use body::{bounded_body, RequestBody};
pub use handlers::{handle_rejection, handle_request, parse_body};
pub use responses::ResponseFormatter;
pub use routes::ApiRoutes;
pub use server::{AppState, HttpServer};
