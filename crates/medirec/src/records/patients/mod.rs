//! Patient demographics: the registry the rest of the platform keys on.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{GenderCategory, PatientDraft, PatientRecord, PatientView};
pub use repository::{PatientRepository, RepositoryError};
pub use router::patients_router;
pub use service::{PatientService, PatientServiceError};
