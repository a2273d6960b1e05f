use crate::cli::ServeArgs;
use crate::infra::{
    seed_records, seed_users, AppState, InMemoryNoteStore, InMemoryPatientStore,
    InMemoryUserDirectory, RecordsDirectory,
};
use crate::routes::{app_router, Services};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

use medirec::auth::{AuthService, TokenService};
use medirec::config::AppConfig;
use medirec::error::AppError;
use medirec::records::assessment::DiabetesRiskService;
use medirec::records::notes::NoteService;
use medirec::records::patients::PatientService;
use medirec::telemetry;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let patient_store = Arc::new(InMemoryPatientStore::default());
    let note_store = Arc::new(InMemoryNoteStore::default());
    seed_records(&patient_store, &note_store);

    let users = InMemoryUserDirectory::default();
    seed_users(&users).map_err(|err| {
        AppError::Io(std::io::Error::other(format!(
            "failed to seed demo accounts: {err}"
        )))
    })?;

    let directory = Arc::new(RecordsDirectory::new(
        patient_store.clone(),
        note_store.clone(),
    ));
    let tokens = Arc::new(TokenService::new(
        &config.auth.jwt_secret,
        config.auth.token_ttl_minutes,
    ));

    let services = Services {
        auth: Arc::new(AuthService::new(Arc::new(users), tokens.clone())),
        patients: Arc::new(PatientService::new(patient_store)),
        notes: Arc::new(NoteService::new(note_store, directory.clone())),
        assessments: Arc::new(DiabetesRiskService::new(directory.clone(), directory)),
        tokens,
    };

    let app = app_router(services)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "clinical records service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
