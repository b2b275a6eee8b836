//! Route filter module
//!
//! A single catch-all filter hands every request to the dispatcher, which
//! owns route matching and authorization.

use crate::infrastructure::http::{
    body::bounded_body,
    handlers::{handle_rejection, handle_request},
    server::AppState,
    utils::with_state,
};
use std::convert::Infallible;
use std::sync::Arc;
use warp::Filter;

/// API routes configuration
pub struct ApiRoutes;

impl ApiRoutes {
    pub fn create(
        state: Arc<AppState>,
    ) -> impl Filter<Extract = impl warp::Reply, Error = Infallible> + Clone {
        let limit = state.config.server.max_request_size;
        warp::method()
            .and(warp::path::full())
            .and(warp::header::headers_cloned())
            .and(bounded_body(limit))
            .and(with_state(state))
            .and_then(handle_request)
            .recover(handle_rejection)
    }
}
