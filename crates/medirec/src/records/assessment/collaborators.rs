use async_trait::async_trait;
use chrono::NaiveDate;

/// The slice of a patient record the assessment pipeline reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientSnapshot {
    pub id: i32,
    pub birth_date: NaiveDate,
    pub gender_code: i32,
}

/// The slice of a clinical note the assessment pipeline reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteSnapshot {
    pub content: String,
}

/// Read access to the patient registry, wherever it is hosted.
#[async_trait]
pub trait PatientDirectory: Send + Sync {
    async fn patient(&self, patient_id: i32) -> Result<PatientSnapshot, LookupError>;
}

/// Read access to a patient's clinical notes, wherever they are hosted.
#[async_trait]
pub trait NoteArchive: Send + Sync {
    async fn patient_notes(&self, patient_id: i32) -> Result<Vec<NoteSnapshot>, LookupError>;
}

/// Failure reported by a collaborator fetch. The message travels through
/// the pipeline unchanged, so callers see exactly what the collaborator
/// reported.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct LookupError(pub String);

impl LookupError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
