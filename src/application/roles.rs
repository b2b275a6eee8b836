//! Role identifiers assigned to staff accounts.

use crate::domain::routing::RoleId;

pub const ADMINISTRADOR: RoleId = RoleId(1);
pub const SUPERVISOR: RoleId = RoleId(2);
pub const OPERADOR: RoleId = RoleId(3);
pub const MECANICO: RoleId = RoleId(4);
pub const CONDUCTOR: RoleId = RoleId(5);

/// Every authenticated role
pub const ALL: [RoleId; 5] = [ADMINISTRADOR, SUPERVISOR, OPERADOR, MECANICO, CONDUCTOR];

pub fn name(role: RoleId) -> Option<&'static str> {
    match role {
        ADMINISTRADOR => Some("administrador"),
        SUPERVISOR => Some("supervisor"),
        OPERADOR => Some("operador"),
        MECANICO => Some("mecanico"),
        CONDUCTOR => Some("conductor"),
        _ => None,
    }
}
