use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;

use super::domain::PatientDraft;
use super::repository::{PatientRepository, RepositoryError};
use super::service::{PatientService, PatientServiceError};

/// Router builder exposing the patient registry CRUD endpoints.
pub fn patients_router<R>(service: Arc<PatientService<R>>) -> Router
where
    R: PatientRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/patients",
            get(list_handler::<R>).post(create_handler::<R>),
        )
        .route(
            "/api/v1/patients/:patient_id",
            get(get_handler::<R>)
                .put(update_handler::<R>)
                .delete(delete_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn list_handler<R>(State(service): State<Arc<PatientService<R>>>) -> Response
where
    R: PatientRepository + 'static,
{
    match service.list() {
        Ok(records) => {
            let views: Vec<_> = records.iter().map(|record| record.view()).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn get_handler<R>(
    State(service): State<Arc<PatientService<R>>>,
    Path(patient_id): Path<i32>,
) -> Response
where
    R: PatientRepository + 'static,
{
    match service.get(patient_id) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<PatientService<R>>>,
    axum::Json(draft): axum::Json<PatientDraft>,
) -> Response
where
    R: PatientRepository + 'static,
{
    match service.create(draft) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record.view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_handler<R>(
    State(service): State<Arc<PatientService<R>>>,
    Path(patient_id): Path<i32>,
    axum::Json(draft): axum::Json<PatientDraft>,
) -> Response
where
    R: PatientRepository + 'static,
{
    match service.update(patient_id, draft) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<PatientService<R>>>,
    Path(patient_id): Path<i32>,
) -> Response
where
    R: PatientRepository + 'static,
{
    match service.delete(patient_id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: PatientServiceError) -> Response {
    let payload = json!({ "error": err.to_string() });
    let status = match err {
        PatientServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        PatientServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        PatientServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        PatientServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, axum::Json(payload)).into_response()
}
