use super::domain::{ClinicalNote, NoteId};

/// Storage abstraction for clinical notes.
///
/// `insert` assigns a `note-NNNNNN` identifier when the note carries an
/// empty id; a non-empty id is honored as-is (seed fixtures) and conflicts
/// if taken. `remove` is a soft delete, as for patients.
pub trait NoteRepository: Send + Sync {
    fn insert(&self, note: ClinicalNote) -> Result<ClinicalNote, RepositoryError>;
    fn update(&self, note: ClinicalNote) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &NoteId) -> Result<Option<ClinicalNote>, RepositoryError>;
    fn for_patient(&self, patient_id: i32) -> Result<Vec<ClinicalNote>, RepositoryError>;
    fn remove(&self, id: &NoteId) -> Result<(), RepositoryError>;
}

/// Error enumeration for note storage failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
