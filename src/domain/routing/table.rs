//! Route registration
//!
//! Routes are registered once at startup through [`RouteTableBuilder`]; the
//! resulting [`RouteTable`] is immutable and keeps registration order.

use super::handler::Handler;
use super::method::HttpMethod;
use super::pattern::{RoutePattern, RoutePatternError};
use super::session::RoleId;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors raised while registering routes
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouteTableError {
    #[error("unknown HTTP method `{0}`")]
    UnknownMethod(String),

    #[error("invalid route pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: RoutePatternError,
    },
}

/// A registered route
#[derive(Clone)]
pub struct Route {
    method: HttpMethod,
    pattern: RoutePattern,
    handler: Arc<dyn Handler>,
    authorized_roles: Vec<RoleId>,
}

impl Route {
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    /// Roles allowed to invoke the route; empty means public
    pub fn authorized_roles(&self) -> &[RoleId] {
        &self.authorized_roles
    }

    pub fn is_public(&self) -> bool {
        self.authorized_roles.is_empty()
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("pattern", &self.pattern.as_str())
            .field("authorized_roles", &self.authorized_roles)
            .finish()
    }
}

/// Immutable, ordered route table
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::default()
    }

    /// Routes in registration order
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Startup-time route registration
#[derive(Default)]
pub struct RouteTableBuilder {
    routes: Vec<Route>,
}

impl RouteTableBuilder {
    /// Register a route from its textual method and pattern
    pub fn register<I>(
        &mut self,
        method: &str,
        pattern: &str,
        handler: Arc<dyn Handler>,
        roles: I,
    ) -> Result<&mut Self, RouteTableError>
    where
        I: IntoIterator,
        I::Item: Into<RoleId>,
    {
        let method = method
            .parse::<HttpMethod>()
            .map_err(RouteTableError::UnknownMethod)?;
        self.route(method, pattern, handler, roles)
    }

    /// Register a route with a typed method
    pub fn route<I>(
        &mut self,
        method: HttpMethod,
        pattern: &str,
        handler: Arc<dyn Handler>,
        roles: I,
    ) -> Result<&mut Self, RouteTableError>
    where
        I: IntoIterator,
        I::Item: Into<RoleId>,
    {
        let parsed = RoutePattern::parse(pattern).map_err(|source| RouteTableError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        let authorized_roles: Vec<RoleId> = roles.into_iter().map(Into::into).collect();

        debug!(
            method = %method,
            pattern = %pattern,
            roles = ?authorized_roles,
            "Registered route"
        );

        self.routes.push(Route {
            method,
            pattern: parsed,
            handler,
            authorized_roles,
        });
        Ok(self)
    }

    pub fn build(self) -> RouteTable {
        RouteTable { routes: self.routes }
    }
}
