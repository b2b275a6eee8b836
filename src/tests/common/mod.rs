//! Common test fixtures and assertions

use crate::{
    config::AppConfig,
    domain::routing::RoleId,
    infrastructure::{adapters::AuthenticationAdapter, InMemoryRecordStore},
    infrastructure::http::HttpServer,
    tests::config,
};
use serde_json::Value;
use std::sync::Arc;

/// Server over a fresh in-memory store
pub fn test_server() -> HttpServer {
    config::init();
    HttpServer::new(config::test_config(), Arc::new(InMemoryRecordStore::new()))
        .expect("route table must build")
}

/// `Authorization` header value for an account holding `role`
pub fn bearer_for(role: RoleId) -> String {
    bearer_with(&config::test_config(), role)
}

pub fn bearer_with(config: &AppConfig, role: RoleId) -> String {
    let token = AuthenticationAdapter::new(config.security.jwt.clone())
        .issue_token(&format!("cuenta-{}", role), role)
        .expect("token issuance");
    format!("Bearer {}", token)
}

/// Request bodies that satisfy the resource rules
pub mod fixtures {
    use serde_json::{json, Value};

    pub fn vehiculo() -> Value {
        json!({
            "matricula": "1234BCD",
            "marca": "Iveco",
            "modelo": "Daily",
            "anio": "2019",
            "plazas": 3,
            "estado": "OPERATIVO"
        })
    }

    pub fn personal() -> Value {
        json!({
            "nombre": "Lucía",
            "apellidos": "García Pérez",
            "dni": "12345678Z",
            "usuario": "lgarcia",
            "email": "lucia@example.com",
            "telefono": "+34 600 123 456",
            "fecha_nacimiento": "1990-02-28",
            "rol": 3,
            "activo": true
        })
    }

    pub fn mantenimiento() -> Value {
        json!({
            "vehiculo_id": 1,
            "fecha": "2024-03-10",
            "tipo": "ITV",
            "descripcion": "Revisión anual",
            "kilometraje": "120500",
            "coste": "89.90",
            "finalizado": "false"
        })
    }
}

/// Assertions over response envelopes
pub mod assertions {
    use serde_json::Value;

    pub fn assert_success(body: &Value) {
        assert_eq!(body["success"], Value::Bool(true), "unexpected envelope: {}", body);
        assert!(body.get("data").is_some());
    }

    pub fn assert_error(body: &Value, message: &str) {
        assert_eq!(body["success"], Value::Bool(false), "unexpected envelope: {}", body);
        assert_eq!(body["message"], Value::String(message.to_string()));
    }
}

/// Decode a reply body as JSON
pub fn json_body(body: &[u8]) -> Value {
    serde_json::from_slice(body).expect("response body must be JSON")
}
