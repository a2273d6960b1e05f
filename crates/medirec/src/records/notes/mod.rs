//! Free-text clinical notes attached to registered patients.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{ClinicalNote, NoteDraft, NoteId};
pub use repository::{NoteRepository, RepositoryError};
pub use router::notes_router;
pub use service::{NoteService, NoteServiceError};
