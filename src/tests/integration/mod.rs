//! Integration tests for the records API
//!
//! Every test drives the full warp filter: bearer token decoding, body
//! parsing, dispatch, validation and the in-memory store.

use crate::{
    application::roles::{ADMINISTRADOR, CONDUCTOR, MECANICO, OPERADOR, SUPERVISOR},
    domain::routing::RoleId,
    infrastructure::http::HttpServer,
    tests::common::{assertions, bearer_for, bearer_with, fixtures, json_body, test_server},
};
use serde_json::{json, Value};
use warp::http::StatusCode;
use warp::test::request;

async fn send(
    server: &HttpServer,
    method: &str,
    path: &str,
    role: Option<RoleId>,
    body: Option<&Value>,
) -> (StatusCode, Value) {
    let mut req = request().method(method).path(path);
    if let Some(role) = role {
        req = req.header("authorization", bearer_for(role));
    }
    if let Some(body) = body {
        req = req.json(body);
    }
    let response = req.reply(&server.routes()).await;
    (response.status(), json_body(response.body()))
}

#[tokio::test]
async fn test_health_is_public() {
    let server = test_server();
    let (status, body) = send(&server, "GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assertions::assert_success(&body);
    assert_eq!(body["data"]["status"], json!("healthy"));
    assert_eq!(body["data"]["resources"], json!(5));
}

#[tokio::test]
async fn test_protected_route_without_token_is_401() {
    let server = test_server();
    let (status, body) = send(&server, "GET", "/vehiculos", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assertions::assert_error(&body, "No autenticado.");
}

#[tokio::test]
async fn test_token_from_other_issuer_is_anonymous() {
    let server = test_server();
    let mut foreign = crate::tests::config::test_config();
    foreign.security.jwt.issuer = "otra-app".to_string();

    let response = request()
        .method("GET")
        .path("/vehiculos")
        .header("authorization", bearer_with(&foreign, ADMINISTRADOR))
        .reply(&server.routes())
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_wrong_role_is_403() {
    let server = test_server();
    let (status, body) = send(
        &server,
        "POST",
        "/vehiculos",
        Some(CONDUCTOR),
        Some(&fixtures::vehiculo()),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assertions::assert_error(&body, "No tiene permisos para acceder a este recurso.");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let server = test_server();
    let (status, body) = send(&server, "GET", "/facturas", Some(ADMINISTRADOR), None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assertions::assert_error(&body, "Ruta no encontrada.");

    let (status, _) = send(&server, "PATCH", "/vehiculos/1", Some(ADMINISTRADOR), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_list_show_flow() {
    let server = test_server();
    let (status, created) = send(
        &server,
        "POST",
        "/vehiculos",
        Some(SUPERVISOR),
        Some(&fixtures::vehiculo()),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["message"], json!("Registro creado correctamente."));
    assert_eq!(created["data"]["id"], json!(1));
    assert_eq!(created["data"]["anio"], json!(2019));

    let (status, listed) = send(&server, "GET", "/vehiculos", Some(CONDUCTOR), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(listed["message"], Value::Null);

    let (status, shown) = send(&server, "GET", "/vehiculos/1", Some(MECANICO), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(shown["data"]["matricula"], json!("1234BCD"));
}

#[tokio::test]
async fn test_invalid_body_is_422_with_every_field() {
    let server = test_server();
    let (status, body) = send(
        &server,
        "POST",
        "/personal",
        Some(ADMINISTRADOR),
        Some(&json!({
            "nombre": "A",
            "dni": "12345678A",
            "usuario": "ab",
            "email": "no-es-correo",
            "rol": 9
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assertions::assert_error(&body, "Los datos enviados no son válidos.");
    let errors = body["errors"].as_object().unwrap();
    for field in ["nombre", "apellidos", "dni", "usuario", "email", "rol"] {
        assert!(errors.contains_key(field), "missing error for {}", field);
    }
    assert_eq!(
        body["errors"]["apellidos"],
        json!(["El campo apellidos es obligatorio."])
    );
    assert_eq!(
        body["errors"]["nombre"],
        json!(["El campo nombre debe tener mínimo 2 caracteres."])
    );
}

#[tokio::test]
async fn test_valid_personal_is_coerced_and_stored() {
    let server = test_server();
    let (status, body) = send(
        &server,
        "POST",
        "/personal",
        Some(ADMINISTRADOR),
        Some(&fixtures::personal()),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["data"]["rol"], json!(3));
    assert_eq!(body["data"]["activo"], json!(true));
}

#[tokio::test]
async fn test_mecanico_can_register_maintenance() {
    let server = test_server();
    let (status, body) = send(
        &server,
        "POST",
        "/mantenimientos",
        Some(MECANICO),
        Some(&fixtures::mantenimiento()),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["data"]["kilometraje"], json!(120500));
    assert_eq!(body["data"]["coste"], json!(89.9));
    assert_eq!(body["data"]["finalizado"], json!(false));

    let (status, _) = send(&server, "POST", "/emergencias", Some(MECANICO), Some(&json!({}))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_operador_validation_on_emergencias() {
    let server = test_server();
    let (status, body) = send(
        &server,
        "POST",
        "/emergencias",
        Some(OPERADOR),
        Some(&json!({
            "titulo": "Incendio",
            "direccion": "Calle Mayor 1",
            "fecha_hora": "2024-02-30 10:00:00",
            "prioridad": "7",
            "estado": "ABIERTA"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let errors = body["errors"].as_object().unwrap();
    assert_eq!(
        errors.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["fecha_hora", "prioridad"]
    );
}

#[tokio::test]
async fn test_update_and_delete_flow() {
    let server = test_server();
    send(&server, "POST", "/vehiculos", Some(ADMINISTRADOR), Some(&fixtures::vehiculo())).await;

    let mut replacement = fixtures::vehiculo();
    replacement["estado"] = json!("TALLER");
    let (status, updated) = send(
        &server,
        "PUT",
        "/vehiculos/1",
        Some(SUPERVISOR),
        Some(&replacement),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["message"], json!("Registro actualizado correctamente."));
    assert_eq!(updated["data"]["estado"], json!("TALLER"));

    let (status, _) = send(&server, "DELETE", "/vehiculos/1", Some(SUPERVISOR), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, deleted) = send(&server, "DELETE", "/vehiculos/1", Some(ADMINISTRADOR), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["data"], json!({"id": 1}));

    let (status, body) = send(&server, "GET", "/vehiculos/1", Some(ADMINISTRADOR), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assertions::assert_error(&body, "Registro no encontrado.");
}

#[tokio::test]
async fn test_non_numeric_id_is_400() {
    let server = test_server();
    let (status, body) = send(&server, "GET", "/carnets/abc", Some(CONDUCTOR), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assertions::assert_error(&body, "Identificador no válido.");
}

#[tokio::test]
async fn test_malformed_and_non_object_bodies_are_400() {
    let server = test_server();
    let response = request()
        .method("POST")
        .path("/vehiculos")
        .header("authorization", bearer_for(ADMINISTRADOR))
        .body("{\"matricula\": ")
        .reply(&server.routes())
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assertions::assert_error(
        &json_body(response.body()),
        "El cuerpo de la petición no es un JSON válido.",
    );

    let (status, body) = send(
        &server,
        "POST",
        "/vehiculos",
        Some(ADMINISTRADOR),
        Some(&json!(["no", "objeto"])),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assertions::assert_error(&body, "El cuerpo de la petición debe ser un objeto JSON.");
}

#[tokio::test]
async fn test_auth_rejection_wins_over_bad_body() {
    let server = test_server();
    let response = request()
        .method("POST")
        .path("/vehiculos")
        .body("not json")
        .reply(&server.routes())
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_oversized_body_is_413() {
    let server = test_server();
    let big = json!({ "descripcion": "x".repeat(8192) });
    let (status, _) = send(&server, "POST", "/vehiculos", Some(ADMINISTRADOR), Some(&big)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_declared_length_over_limit_is_413_without_reading() {
    let server = test_server();
    let response = request()
        .method("POST")
        .path("/vehiculos")
        .header("authorization", bearer_for(ADMINISTRADOR))
        .body("{}")
        .header("content-length", "10485760")
        .reply(&server.routes())
        .await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assertions::assert_error(
        &json_body(response.body()),
        "La petición excede el tamaño máximo permitido.",
    );
}

#[tokio::test]
async fn test_invalid_content_length_is_400() {
    let server = test_server();
    let response = request()
        .method("POST")
        .path("/vehiculos")
        .header("authorization", bearer_for(ADMINISTRADOR))
        .body("{}")
        .header("content-length", "mucho")
        .reply(&server.routes())
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assertions::assert_error(&json_body(response.body()), "Cabecera no válida.");
}

#[tokio::test]
async fn test_percent_encoded_id_is_decoded() {
    let server = test_server();
    send(&server, "POST", "/vehiculos", Some(ADMINISTRADOR), Some(&fixtures::vehiculo())).await;

    let (status, body) = send(&server, "GET", "/vehiculos/%31", Some(CONDUCTOR), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], json!(1));
}

#[tokio::test]
async fn test_empty_post_body_reports_required_fields() {
    let server = test_server();
    let response = request()
        .method("POST")
        .path("/carnets")
        .header("authorization", bearer_for(SUPERVISOR))
        .reply(&server.routes())
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response.body());
    assert_eq!(body["errors"].as_object().map(|e| e.len()), Some(5));
}
