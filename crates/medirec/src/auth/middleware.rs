use std::sync::Arc;

use axum::body::Body;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use super::token::TokenService;

/// Require a valid bearer token on every request passing through.
///
/// Reads the `TokenService` from request extensions (injected by an
/// Extension layer) and, on success, makes the verified claims available
/// to downstream handlers the same way.
pub async fn require_bearer(req: Request<Body>, next: Next) -> Response {
    match require_bearer_inner(req, next).await {
        Ok(response) => response,
        Err(status) => {
            let payload = json!({ "error": "missing or invalid bearer token" });
            (status, axum::Json(payload)).into_response()
        }
    }
}

async fn require_bearer_inner(
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let tokens = req
        .extensions()
        .get::<Arc<TokenService>>()
        .cloned()
        .ok_or(StatusCode::INTERNAL_SERVER_ERROR)?;

    let token = req
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(StatusCode::UNAUTHORIZED)?
        .to_string();

    let claims = tokens
        .verify(&token)
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
