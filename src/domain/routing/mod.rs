//! Protected route dispatch
//!
//! An ordered, immutable [`RouteTable`] is built at startup and handed to a
//! [`Dispatcher`], which matches each request, checks the caller's role and
//! invokes the bound [`Handler`].

pub mod dispatcher;
pub mod handler;
pub mod method;
pub mod pattern;
pub mod session;
pub mod table;

pub use dispatcher::{Authorized, DispatchError, Dispatcher};
pub use handler::{
    handler_fn, FnHandler, Handler, RequestContext, Response, ResponseSink, StatusResponder,
};
pub use method::HttpMethod;
pub use pattern::{PathParams, PathSegment, RoutePattern, RoutePatternError};
pub use session::{AnonymousSession, RoleId, RoleSession, Session};
pub use table::{Route, RouteTable, RouteTableBuilder, RouteTableError};
