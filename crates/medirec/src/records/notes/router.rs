use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{NoteDraft, NoteId};
use super::repository::{NoteRepository, RepositoryError};
use super::service::{NoteService, NoteServiceError};
use crate::records::assessment::collaborators::PatientDirectory;

/// Router builder exposing the clinical note endpoints.
pub fn notes_router<N, D>(service: Arc<NoteService<N, D>>) -> Router
where
    N: NoteRepository + 'static,
    D: PatientDirectory + 'static,
{
    Router::new()
        .route("/api/v1/notes", post(create_handler::<N, D>))
        .route(
            "/api/v1/notes/:note_id",
            get(get_handler::<N, D>)
                .put(update_handler::<N, D>)
                .delete(delete_handler::<N, D>),
        )
        .route(
            "/api/v1/notes/patient/:patient_id",
            get(for_patient_handler::<N, D>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdateNoteRequest {
    pub(crate) content: String,
}

pub(crate) async fn create_handler<N, D>(
    State(service): State<Arc<NoteService<N, D>>>,
    axum::Json(draft): axum::Json<NoteDraft>,
) -> Response
where
    N: NoteRepository + 'static,
    D: PatientDirectory + 'static,
{
    match service.create(draft).await {
        Ok(note) => (StatusCode::CREATED, axum::Json(note)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn get_handler<N, D>(
    State(service): State<Arc<NoteService<N, D>>>,
    Path(note_id): Path<String>,
) -> Response
where
    N: NoteRepository + 'static,
    D: PatientDirectory + 'static,
{
    match service.get(&NoteId(note_id)) {
        Ok(note) => (StatusCode::OK, axum::Json(note)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn for_patient_handler<N, D>(
    State(service): State<Arc<NoteService<N, D>>>,
    Path(patient_id): Path<i32>,
) -> Response
where
    N: NoteRepository + 'static,
    D: PatientDirectory + 'static,
{
    match service.for_patient(patient_id) {
        Ok(notes) => (StatusCode::OK, axum::Json(notes)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_handler<N, D>(
    State(service): State<Arc<NoteService<N, D>>>,
    Path(note_id): Path<String>,
    axum::Json(request): axum::Json<UpdateNoteRequest>,
) -> Response
where
    N: NoteRepository + 'static,
    D: PatientDirectory + 'static,
{
    match service.update(&NoteId(note_id), request.content) {
        Ok(note) => (StatusCode::OK, axum::Json(note)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn delete_handler<N, D>(
    State(service): State<Arc<NoteService<N, D>>>,
    Path(note_id): Path<String>,
) -> Response
where
    N: NoteRepository + 'static,
    D: PatientDirectory + 'static,
{
    match service.delete(&NoteId(note_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: NoteServiceError) -> Response {
    let payload = json!({ "error": err.to_string() });
    let status = match err {
        NoteServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        NoteServiceError::UnknownPatient(_) => StatusCode::NOT_FOUND,
        NoteServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        NoteServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        NoteServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, axum::Json(payload)).into_response()
}
