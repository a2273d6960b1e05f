use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::service::{AuthService, LoginRequest};
use super::token::AuthError;
use super::users::UserDirectory;

/// Router builder exposing the sign-in endpoint.
pub fn auth_router<U>(service: Arc<AuthService<U>>) -> Router
where
    U: UserDirectory + 'static,
{
    Router::new()
        .route("/api/v1/auth/login", post(login_handler::<U>))
        .with_state(service)
}

pub(crate) async fn login_handler<U>(
    State(service): State<Arc<AuthService<U>>>,
    axum::Json(request): axum::Json<LoginRequest>,
) -> Response
where
    U: UserDirectory + 'static,
{
    match service.login(request) {
        Ok(response) => (StatusCode::OK, axum::Json(response)).into_response(),
        Err(AuthError::InvalidCredentials) => {
            let payload = json!({ "error": AuthError::InvalidCredentials.to_string() });
            (StatusCode::UNAUTHORIZED, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
