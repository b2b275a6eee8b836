//! Infrastructure layer - External concerns and adapters
//!
//! This module contains the token and storage adapters and the HTTP
//! transport.

pub mod adapters;
pub mod http;

pub use adapters::{AuthenticationAdapter, InMemoryRecordStore, TokenSession};
pub use http::HttpServer;
