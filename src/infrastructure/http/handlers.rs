//! Request handler module
//!
//! Turns a raw warp request into a dispatch: builds the session and the
//! request context, runs the dispatcher and converts the outcome into a reply.

use crate::{
    domain::routing::{HttpMethod, RequestContext, Response, ResponseSink, Session},
    infrastructure::http::{
        body::{BodyReadFailed, RequestBody},
        responses::ResponseFormatter,
        server::AppState,
        utils::{extract_authorization, extract_client_ip},
    },
    shared::{
        error::{AppError, AppResult},
        logging::LoggingUtils,
    },
};
use serde_json::{Map, Value};
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, warn};
use warp::http::{HeaderMap, Method};
use warp::path::FullPath;
use warp::reply::{Json, WithStatus};

/// Handle every API request
pub async fn handle_request(
    method: Method,
    path: FullPath,
    headers: HeaderMap,
    body: RequestBody,
    state: Arc<AppState>,
) -> Result<WithStatus<Json>, warp::reject::Rejection> {
    let started = Instant::now();
    let request_id = LoggingUtils::generate_request_id();

    let Ok(method) = method.as_str().parse::<HttpMethod>() else {
        warn!(request_id = %request_id, method = %method, "Unsupported HTTP method");
        return Ok(ResponseFormatter::from_app_error(&AppError::BadRequest(
            "Método HTTP no soportado.".to_string(),
        )));
    };
    let path = path.as_str().to_string();
    let client_ip = extract_client_ip(&headers, &state.config.security.client_ip_header);
    LoggingUtils::log_request(&request_id, method, &path, &client_ip);

    let session = state.auth.session_from_header(extract_authorization(&headers));
    let ctx = RequestContext::new(request_id.clone(), method, path.clone())
        .with_client_ip(client_ip)
        .with_role(session.current_role());

    let outcome = dispatch(&state, ctx, &session, &body).await;
    let duration_ms = started.elapsed().as_millis() as u64;

    match outcome {
        Ok(response) => {
            LoggingUtils::log_success(&request_id, method, &path, response.status, duration_ms);
            Ok(ResponseFormatter::from_response(&response))
        }
        Err(e) => {
            if e.http_status_code().is_server_error() {
                error!(request_id = %request_id, error = %e, "Request failed");
            }
            LoggingUtils::log_rejection(&request_id, method, &path, &e, duration_ms);
            Ok(ResponseFormatter::from_app_error(&e))
        }
    }
}

async fn dispatch(
    state: &AppState,
    ctx: RequestContext,
    session: &dyn Session,
    raw_body: &RequestBody,
) -> AppResult<Response> {
    let limit = state.config.server.max_request_size;
    let parsed = match raw_body {
        RequestBody::Complete(raw) => parse_body(raw, limit),
        RequestBody::Oversized { received } => Err(AppError::RequestTooLarge {
            size: *received,
            limit,
        }),
    };

    // Routing and authorization failures take precedence over body errors.
    let body = match parsed {
        Ok(body) => body,
        Err(e) => {
            state.dispatcher.resolve(ctx.method, &ctx.path, session)?;
            return Err(e);
        }
    };

    let ctx = ctx.with_body(body);
    let mut sink = ResponseSink::new();
    state.dispatcher.dispatch(&ctx, session, &mut sink).await?;
    sink.into_response()
        .ok_or_else(|| AppError::Internal(format!("No response committed for {} {}", ctx.method, ctx.path)))
}

/// Envelope for requests rejected by the filter chain itself
pub async fn handle_rejection(rejection: warp::Rejection) -> Result<WithStatus<Json>, Infallible> {
    let error = if rejection.find::<BodyReadFailed>().is_some() {
        AppError::BadRequest("No se pudo leer el cuerpo de la petición.".to_string())
    } else if let Some(invalid) = rejection.find::<warp::reject::InvalidHeader>() {
        warn!("{}", invalid);
        AppError::BadRequest("Cabecera no válida.".to_string())
    } else {
        AppError::Internal(format!("Unhandled rejection: {:?}", rejection))
    };

    if error.http_status_code().is_server_error() {
        error!(error = %error, "Request rejected by filter");
    } else {
        warn!(error = %error, "Request rejected by filter");
    }
    Ok(ResponseFormatter::from_app_error(&error))
}

/// Decode the request body into a JSON object; an empty body is `{}`
pub fn parse_body(raw: &[u8], limit: usize) -> AppResult<Map<String, Value>> {
    if raw.len() > limit {
        return Err(AppError::RequestTooLarge {
            size: raw.len(),
            limit,
        });
    }
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    match serde_json::from_slice::<Value>(raw)? {
        Value::Object(map) => Ok(map),
        _ => Err(AppError::BadRequest(
            "El cuerpo de la petición debe ser un objeto JSON.".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_filter_rejections_become_envelopes() {
        use warp::Reply;

        let reply = handle_rejection(warp::reject::custom(BodyReadFailed)).await.unwrap();
        assert_eq!(reply.into_response().status(), warp::http::StatusCode::BAD_REQUEST);

        let reply = handle_rejection(warp::reject::reject()).await.unwrap();
        assert_eq!(
            reply.into_response().status(),
            warp::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_parse_body_variants() {
        assert!(parse_body(b"", 64).unwrap().is_empty());
        assert!(parse_body(b"  \n", 64).unwrap().is_empty());
        assert_eq!(parse_body(br#"{"a":1}"#, 64).unwrap()["a"], json!(1));
        assert!(matches!(parse_body(b"[1,2]", 64), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_body(b"{oops", 64), Err(AppError::Json(_))));
        assert!(matches!(
            parse_body(br#"{"a":"long"}"#, 4),
            Err(AppError::RequestTooLarge { size: 12, limit: 4 })
        ));
    }
}
