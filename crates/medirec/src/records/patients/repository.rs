use super::domain::PatientRecord;

/// Storage abstraction so the service module can be exercised in isolation.
///
/// `insert` assigns the identifier when the record carries id 0; a non-zero
/// id is honored as-is (used by seed fixtures) and conflicts if taken.
/// `remove` is a soft delete: removed ids stay tombstoned so later fetches
/// report the record as absent rather than reusable.
pub trait PatientRepository: Send + Sync {
    fn insert(&self, record: PatientRecord) -> Result<PatientRecord, RepositoryError>;
    fn update(&self, record: PatientRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: i32) -> Result<Option<PatientRecord>, RepositoryError>;
    fn list(&self) -> Result<Vec<PatientRecord>, RepositoryError>;
    fn remove(&self, id: i32) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
