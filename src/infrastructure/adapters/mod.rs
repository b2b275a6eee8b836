//! Infrastructure adapters module
//!
//! This module contains the token and storage adapters.

pub mod authentication;
pub mod memory_store;

pub use authentication::{AuthenticationAdapter, SessionClaims, TokenSession};
pub use memory_store::InMemoryRecordStore;
