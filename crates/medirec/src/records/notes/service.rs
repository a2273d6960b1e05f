use std::sync::Arc;

use chrono::Utc;

use super::domain::{ClinicalNote, NoteDraft, NoteId};
use super::repository::{NoteRepository, RepositoryError};
use crate::records::assessment::collaborators::{LookupError, PatientDirectory};

/// Service composing note validation, patient existence checks, and the
/// note repository. Writes are gated on the patient registry; reads are
/// not, so an unknown patient simply lists no notes.
pub struct NoteService<N, D> {
    repository: Arc<N>,
    patients: Arc<D>,
}

impl<N, D> NoteService<N, D>
where
    N: NoteRepository + 'static,
    D: PatientDirectory + 'static,
{
    pub fn new(repository: Arc<N>, patients: Arc<D>) -> Self {
        Self {
            repository,
            patients,
        }
    }

    /// Attach a new note to a registered patient.
    pub async fn create(&self, draft: NoteDraft) -> Result<ClinicalNote, NoteServiceError> {
        validate_content(&draft.content)?;
        self.patients.patient(draft.patient_id).await?;

        let note = ClinicalNote {
            id: NoteId(String::new()),
            patient_id: draft.patient_id,
            content: draft.content,
            created_at: Utc::now(),
            updated_at: None,
        };
        let stored = self.repository.insert(note)?;
        Ok(stored)
    }

    pub fn get(&self, id: &NoteId) -> Result<ClinicalNote, NoteServiceError> {
        let note = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(note)
    }

    pub fn for_patient(&self, patient_id: i32) -> Result<Vec<ClinicalNote>, NoteServiceError> {
        Ok(self.repository.for_patient(patient_id)?)
    }

    /// Replace a note's content, stamping the update time.
    pub fn update(&self, id: &NoteId, content: String) -> Result<ClinicalNote, NoteServiceError> {
        validate_content(&content)?;
        let mut note = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        note.content = content;
        note.updated_at = Some(Utc::now());
        self.repository.update(note.clone())?;
        Ok(note)
    }

    pub fn delete(&self, id: &NoteId) -> Result<(), NoteServiceError> {
        if self.repository.fetch(id)?.is_none() {
            return Err(RepositoryError::NotFound.into());
        }
        self.repository.remove(id)?;
        Ok(())
    }
}

fn validate_content(content: &str) -> Result<(), NoteServiceError> {
    if content.trim().is_empty() {
        return Err(NoteServiceError::Validation(
            "note content must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Error raised by the note service.
#[derive(Debug, thiserror::Error)]
pub enum NoteServiceError {
    #[error("invalid note payload: {0}")]
    Validation(String),
    #[error("{0}")]
    UnknownPatient(#[from] LookupError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::assessment::collaborators::{PatientDirectory, PatientSnapshot};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryNotes {
        inner: Mutex<Store>,
    }

    #[derive(Default)]
    struct Store {
        notes: HashMap<NoteId, ClinicalNote>,
        tombstones: Vec<NoteId>,
        sequence: u64,
    }

    impl NoteRepository for MemoryNotes {
        fn insert(&self, mut note: ClinicalNote) -> Result<ClinicalNote, RepositoryError> {
            let mut store = self.inner.lock().expect("notes mutex poisoned");
            if note.id.0.is_empty() {
                store.sequence += 1;
                note.id = NoteId(format!("note-{:06}", store.sequence));
            } else if store.notes.contains_key(&note.id) || store.tombstones.contains(&note.id) {
                return Err(RepositoryError::Conflict);
            }
            store.notes.insert(note.id.clone(), note.clone());
            Ok(note)
        }

        fn update(&self, note: ClinicalNote) -> Result<(), RepositoryError> {
            let mut store = self.inner.lock().expect("notes mutex poisoned");
            if !store.notes.contains_key(&note.id) {
                return Err(RepositoryError::NotFound);
            }
            store.notes.insert(note.id.clone(), note);
            Ok(())
        }

        fn fetch(&self, id: &NoteId) -> Result<Option<ClinicalNote>, RepositoryError> {
            let store = self.inner.lock().expect("notes mutex poisoned");
            Ok(store.notes.get(id).cloned())
        }

        fn for_patient(&self, patient_id: i32) -> Result<Vec<ClinicalNote>, RepositoryError> {
            let store = self.inner.lock().expect("notes mutex poisoned");
            let mut notes: Vec<_> = store
                .notes
                .values()
                .filter(|note| note.patient_id == patient_id)
                .cloned()
                .collect();
            notes.sort_by(|a, b| a.created_at.cmp(&b.created_at));
            Ok(notes)
        }

        fn remove(&self, id: &NoteId) -> Result<(), RepositoryError> {
            let mut store = self.inner.lock().expect("notes mutex poisoned");
            if store.notes.remove(id).is_none() {
                return Err(RepositoryError::NotFound);
            }
            store.tombstones.push(id.clone());
            Ok(())
        }
    }

    struct KnownPatients;

    #[async_trait]
    impl PatientDirectory for KnownPatients {
        async fn patient(&self, patient_id: i32) -> Result<PatientSnapshot, LookupError> {
            if patient_id == 7 {
                Ok(PatientSnapshot {
                    id: 7,
                    birth_date: NaiveDate::from_ymd_opt(1980, 1, 1).expect("valid date"),
                    gender_code: 1,
                })
            } else {
                Err(LookupError::new("Patient not found"))
            }
        }
    }

    fn service() -> NoteService<MemoryNotes, KnownPatients> {
        NoteService::new(Arc::new(MemoryNotes::default()), Arc::new(KnownPatients))
    }

    fn draft(patient_id: i32, content: &str) -> NoteDraft {
        NoteDraft {
            patient_id,
            content: content.to_string(),
        }
    }

    #[tokio::test]
    async fn create_assigns_note_ids() {
        let service = service();
        let note = service
            .create(draft(7, "Poids stable."))
            .await
            .expect("create");
        assert_eq!(note.id.0, "note-000001");
        assert!(note.updated_at.is_none());
    }

    #[tokio::test]
    async fn create_rejects_unknown_patients_with_the_lookup_message() {
        let service = service();
        match service.create(draft(99, "Poids stable.")).await {
            Err(NoteServiceError::UnknownPatient(err)) => {
                assert_eq!(err.to_string(), "Patient not found");
            }
            other => panic!("expected unknown patient, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_rejects_blank_content() {
        let service = service();
        match service.create(draft(7, "   ")).await {
            Err(NoteServiceError::Validation(message)) => {
                assert!(message.contains("content"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn listing_filters_by_patient() {
        let service = service();
        service.create(draft(7, "Premier suivi.")).await.expect("create");
        service.create(draft(7, "Deuxième suivi.")).await.expect("create");

        let notes = service.for_patient(7).expect("list");
        assert_eq!(notes.len(), 2);
        assert!(service.for_patient(8).expect("list").is_empty());
    }

    #[tokio::test]
    async fn update_stamps_the_revision_time() {
        let service = service();
        let note = service
            .create(draft(7, "Premier suivi."))
            .await
            .expect("create");

        let updated = service
            .update(&note.id, "Premier suivi, corrigé.".to_string())
            .expect("update");
        assert_eq!(updated.content, "Premier suivi, corrigé.");
        assert!(updated.updated_at.is_some());
    }

    #[tokio::test]
    async fn delete_hides_the_note() {
        let service = service();
        let note = service
            .create(draft(7, "Premier suivi."))
            .await
            .expect("create");
        service.delete(&note.id).expect("delete");

        match service.get(&note.id) {
            Err(NoteServiceError::Repository(RepositoryError::NotFound)) => {}
            other => panic!("expected not found, got {other:?}"),
        }
    }
}
