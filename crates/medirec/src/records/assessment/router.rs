use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::Local;
use serde_json::json;

use super::collaborators::{NoteArchive, PatientDirectory};
use super::service::DiabetesRiskService;

/// Router builder exposing the assessment endpoint.
pub fn assessment_router<P, N>(service: Arc<DiabetesRiskService<P, N>>) -> Router
where
    P: PatientDirectory + 'static,
    N: NoteArchive + 'static,
{
    Router::new()
        .route(
            "/api/v1/assessments/diabetes/:patient_id",
            get(diabetes_risk_handler::<P, N>),
        )
        .with_state(service)
}

pub(crate) async fn diabetes_risk_handler<P, N>(
    State(service): State<Arc<DiabetesRiskService<P, N>>>,
    Path(patient_id): Path<i32>,
) -> Response
where
    P: PatientDirectory + 'static,
    N: NoteArchive + 'static,
{
    let today = Local::now().date_naive();
    match service.assess(patient_id, today).await {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
    }
}
