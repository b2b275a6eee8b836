use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric role identifier carried by an authenticated session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(pub u32);

impl From<u32> for RoleId {
    fn from(id: u32) -> Self {
        RoleId(id)
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Request-scoped view of the caller's authentication state.
///
/// The dispatcher only reads the current role; it never mutates a session.
pub trait Session: Send + Sync {
    fn current_role(&self) -> Option<RoleId>;
}

/// Guest caller: no role
#[derive(Debug, Clone, Copy, Default)]
pub struct AnonymousSession;

impl Session for AnonymousSession {
    fn current_role(&self) -> Option<RoleId> {
        None
    }
}

/// Caller with a known role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleSession(pub RoleId);

impl Session for RoleSession {
    fn current_role(&self) -> Option<RoleId> {
        Some(self.0)
    }
}
