//! Role-gated request dispatch
//!
//! Routes are tried in registration order and the first one whose method and
//! pattern match wins, even when a later route has a more specific literal
//! segment. Authorization is decided once, before the handler runs.

use super::handler::{RequestContext, ResponseSink};
use super::method::HttpMethod;
use super::pattern::PathParams;
use super::session::{RoleId, Session};
use super::table::{Route, RouteTable};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Reasons a request never reaches a handler
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DispatchError {
    #[error("No autenticado.")]
    Unauthenticated,

    #[error("No tiene permisos para acceder a este recurso.")]
    Forbidden { role: RoleId },

    #[error("Ruta no encontrada.")]
    NotFound { method: HttpMethod, path: String },
}

/// A matched route the caller may invoke
#[derive(Debug)]
pub struct Authorized<'a> {
    pub route: &'a Route,
    pub params: PathParams,
}

/// Dispatches requests over an immutable route table
#[derive(Debug, Clone)]
pub struct Dispatcher {
    table: Arc<RouteTable>,
}

impl Dispatcher {
    pub fn new(table: Arc<RouteTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Match and authorize without invoking the handler
    pub fn resolve(
        &self,
        method: HttpMethod,
        path: &str,
        session: &dyn Session,
    ) -> Result<Authorized<'_>, DispatchError> {
        let (route, params) = self
            .table
            .routes()
            .iter()
            .filter(|route| route.method() == method)
            .find_map(|route| route.pattern().matches(path).map(|params| (route, params)))
            .ok_or_else(|| DispatchError::NotFound {
                method,
                path: path.to_string(),
            })?;

        if !route.is_public() {
            let role = session.current_role().ok_or(DispatchError::Unauthenticated)?;
            if !route.authorized_roles().contains(&role) {
                return Err(DispatchError::Forbidden { role });
            }
        }

        debug!(
            method = %method,
            path = %path,
            pattern = %route.pattern(),
            "Route matched"
        );
        Ok(Authorized { route, params })
    }

    /// Resolve the route and invoke its handler exactly once
    pub async fn dispatch(
        &self,
        ctx: &RequestContext,
        session: &dyn Session,
        sink: &mut ResponseSink,
    ) -> Result<(), DispatchError> {
        let authorized = self.resolve(ctx.method, &ctx.path, session)?;
        authorized
            .route
            .handler()
            .handle(ctx, sink, &authorized.params)
            .await;
        Ok(())
    }
}
