//! HTTP utilities - Common helper functions
//!
//! Header extraction and state injection shared by the route filters.

use crate::infrastructure::http::server::AppState;
use std::net::IpAddr;
use std::sync::Arc;
use warp::http::header::{HeaderMap, AUTHORIZATION};
use warp::Filter;

/// Client IP from the configured proxy header.
///
/// Takes the first entry of a comma-separated list; anything that does not
/// parse as an IP address is reported as `unknown`.
pub fn extract_client_ip(headers: &HeaderMap, header_name: &str) -> String {
    headers
        .get(header_name)
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| raw.split(',').next())
        .and_then(|first| first.trim().parse::<IpAddr>().ok())
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Raw `Authorization` header value
pub fn extract_authorization(headers: &HeaderMap) -> Option<&str> {
    headers.get(AUTHORIZATION).and_then(|value| value.to_str().ok())
}

/// Helper function to inject the shared state into a route
pub fn with_state(
    state: Arc<AppState>,
) -> impl Filter<Extract = (Arc<AppState>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || state.clone())
}
