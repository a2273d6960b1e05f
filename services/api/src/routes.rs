use crate::infra::{AppState, InMemoryNoteStore, InMemoryPatientStore, InMemoryUserDirectory, RecordsDirectory};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;

use medirec::auth::{auth_router, require_bearer, AuthService, TokenService};
use medirec::records::assessment::{assessment_router, DiabetesRiskService};
use medirec::records::notes::{notes_router, NoteService};
use medirec::records::patients::{patients_router, PatientService};

/// The fully wired service set for one deployment.
pub(crate) struct Services {
    pub(crate) auth: Arc<AuthService<InMemoryUserDirectory>>,
    pub(crate) patients: Arc<PatientService<InMemoryPatientStore>>,
    pub(crate) notes: Arc<NoteService<InMemoryNoteStore, RecordsDirectory>>,
    pub(crate) assessments: Arc<DiabetesRiskService<RecordsDirectory, RecordsDirectory>>,
    pub(crate) tokens: Arc<TokenService>,
}

/// Compose the HTTP surface: sign-in and operational endpoints stay open,
/// every record-keeping route sits behind the bearer guard.
pub(crate) fn app_router(services: Services) -> axum::Router {
    let protected = patients_router(services.patients)
        .merge(notes_router(services.notes))
        .merge(assessment_router(services.assessments))
        .layer(axum::middleware::from_fn(require_bearer));

    auth_router(services.auth)
        .merge(protected)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .layer(Extension(services.tokens))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{seed_records, InMemoryNoteStore, InMemoryPatientStore, RecordsDirectory};
    use chrono::NaiveDate;
    use medirec::records::assessment::{DiabetesRiskLevel, DiabetesRiskService, Gender};

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body.get("status").and_then(|v| v.as_str()), Some("ok"));
    }

    #[tokio::test]
    async fn seeded_records_drive_the_assessment_pipeline() {
        let patients = Arc::new(InMemoryPatientStore::default());
        let notes = Arc::new(InMemoryNoteStore::default());
        seed_records(&patients, &notes);

        let directory = Arc::new(RecordsDirectory::new(patients, notes));
        let service = DiabetesRiskService::new(directory.clone(), directory);

        let today = NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date");
        let result = service.assess(2, today).await.expect("assessment");

        assert_eq!(result.risk_level, DiabetesRiskLevel::Borderline);
        assert_eq!(result.trigger_count, 2);
        assert_eq!(result.age, 79);
        assert_eq!(result.gender, Gender::Male);
    }

    #[tokio::test]
    async fn seeded_records_fail_fast_for_unknown_patients() {
        let patients = Arc::new(InMemoryPatientStore::default());
        let notes = Arc::new(InMemoryNoteStore::default());
        seed_records(&patients, &notes);

        let directory = Arc::new(RecordsDirectory::new(patients, notes));
        let service = DiabetesRiskService::new(directory.clone(), directory);

        let today = NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date");
        let err = service.assess(999, today).await.expect_err("must fail");
        assert_eq!(err.to_string(), "Patient not found");
    }
}
