//! HTTP server implementation
//!
//! Wires configuration, the route table, the dispatcher and the token adapter
//! into the shared state served by warp. TLS and CORS are left to the reverse
//! proxy in front of the service.

use crate::{
    application::build_route_table,
    config::AppConfig,
    domain::{records::RecordStore, routing::Dispatcher},
    infrastructure::{adapters::AuthenticationAdapter, http::routes::ApiRoutes},
    shared::error::AppResult,
};
use std::convert::Infallible;
use std::sync::Arc;
use tracing::{info, instrument};
use warp::{Filter, Reply};

/// State shared by every request
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub dispatcher: Dispatcher,
    pub auth: AuthenticationAdapter,
}

/// HTTP server for the records API
pub struct HttpServer {
    config: Arc<AppConfig>,
    state: Arc<AppState>,
}

impl HttpServer {
    /// Build the route table and the shared state
    pub fn new(config: AppConfig, store: Arc<dyn RecordStore>) -> AppResult<Self> {
        let config = Arc::new(config);
        let table = build_route_table(store)?;
        let dispatcher = Dispatcher::new(Arc::new(table));
        let auth = AuthenticationAdapter::new(config.security.jwt.clone());

        let state = Arc::new(AppState {
            config: config.clone(),
            dispatcher,
            auth,
        });

        Ok(Self { config, state })
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the shared request state
    pub fn state(&self) -> Arc<AppState> {
        self.state.clone()
    }

    /// Create the application routes
    pub fn routes(&self) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
        ApiRoutes::create(self.state.clone())
    }

    /// Run the HTTP server
    #[instrument(skip(self))]
    pub async fn run(self) -> AppResult<()> {
        let addr = self.config.server_address();
        info!(
            routes = self.state.dispatcher.table().len(),
            "Starting HTTP server on {}", addr
        );

        warp::serve(self.routes()).run(addr).await;

        Ok(())
    }
}
