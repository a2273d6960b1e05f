use std::sync::Arc;

use super::domain::{PatientDraft, PatientRecord};
use super::repository::{PatientRepository, RepositoryError};

/// Service composing draft validation with the patient repository.
pub struct PatientService<R> {
    repository: Arc<R>,
}

impl<R> PatientService<R>
where
    R: PatientRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn list(&self) -> Result<Vec<PatientRecord>, PatientServiceError> {
        Ok(self.repository.list()?)
    }

    pub fn get(&self, id: i32) -> Result<PatientRecord, PatientServiceError> {
        let record = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Register a new patient; the store assigns the identifier.
    pub fn create(&self, draft: PatientDraft) -> Result<PatientRecord, PatientServiceError> {
        validate_draft(&draft)?;
        let stored = self.repository.insert(draft.into_record(0))?;
        Ok(stored)
    }

    /// Replace the demographics of an existing patient.
    pub fn update(&self, id: i32, draft: PatientDraft) -> Result<PatientRecord, PatientServiceError> {
        validate_draft(&draft)?;
        if self.repository.fetch(id)?.is_none() {
            return Err(RepositoryError::NotFound.into());
        }
        let record = draft.into_record(id);
        self.repository.update(record.clone())?;
        Ok(record)
    }

    pub fn delete(&self, id: i32) -> Result<(), PatientServiceError> {
        if self.repository.fetch(id)?.is_none() {
            return Err(RepositoryError::NotFound.into());
        }
        self.repository.remove(id)?;
        Ok(())
    }
}

fn validate_draft(draft: &PatientDraft) -> Result<(), PatientServiceError> {
    if draft.first_name.trim().is_empty() {
        return Err(PatientServiceError::Validation(
            "first name must not be empty".to_string(),
        ));
    }
    if draft.last_name.trim().is_empty() {
        return Err(PatientServiceError::Validation(
            "last name must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Error raised by the patient service.
#[derive(Debug, thiserror::Error)]
pub enum PatientServiceError {
    #[error("invalid patient payload: {0}")]
    Validation(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::patients::domain::GenderCategory;
    use chrono::NaiveDate;
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryPatients {
        inner: Mutex<Store>,
    }

    #[derive(Default)]
    struct Store {
        records: HashMap<i32, PatientRecord>,
        tombstones: HashSet<i32>,
    }

    impl PatientRepository for MemoryPatients {
        fn insert(&self, mut record: PatientRecord) -> Result<PatientRecord, RepositoryError> {
            let mut store = self.inner.lock().expect("patients mutex poisoned");
            if record.id == 0 {
                let next = store
                    .records
                    .keys()
                    .chain(store.tombstones.iter())
                    .max()
                    .copied()
                    .unwrap_or(0)
                    + 1;
                record.id = next;
            } else if store.records.contains_key(&record.id)
                || store.tombstones.contains(&record.id)
            {
                return Err(RepositoryError::Conflict);
            }
            store.records.insert(record.id, record.clone());
            Ok(record)
        }

        fn update(&self, record: PatientRecord) -> Result<(), RepositoryError> {
            let mut store = self.inner.lock().expect("patients mutex poisoned");
            if !store.records.contains_key(&record.id) {
                return Err(RepositoryError::NotFound);
            }
            store.records.insert(record.id, record);
            Ok(())
        }

        fn fetch(&self, id: i32) -> Result<Option<PatientRecord>, RepositoryError> {
            let store = self.inner.lock().expect("patients mutex poisoned");
            Ok(store.records.get(&id).cloned())
        }

        fn list(&self) -> Result<Vec<PatientRecord>, RepositoryError> {
            let store = self.inner.lock().expect("patients mutex poisoned");
            let mut records: Vec<_> = store.records.values().cloned().collect();
            records.sort_by_key(|record| record.id);
            Ok(records)
        }

        fn remove(&self, id: i32) -> Result<(), RepositoryError> {
            let mut store = self.inner.lock().expect("patients mutex poisoned");
            if store.records.remove(&id).is_none() {
                return Err(RepositoryError::NotFound);
            }
            store.tombstones.insert(id);
            Ok(())
        }
    }

    fn draft(first: &str, last: &str) -> PatientDraft {
        PatientDraft {
            first_name: first.to_string(),
            last_name: last.to_string(),
            birth_date: NaiveDate::from_ymd_opt(1980, 5, 12).expect("valid date"),
            gender: GenderCategory::Female,
            address: Some("12 Rue des Lilas".to_string()),
            phone: None,
        }
    }

    fn service() -> PatientService<MemoryPatients> {
        PatientService::new(Arc::new(MemoryPatients::default()))
    }

    #[test]
    fn create_assigns_sequential_ids() {
        let service = service();
        let first = service.create(draft("Ada", "Martin")).expect("create");
        let second = service.create(draft("Jean", "Roux")).expect("create");
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn create_rejects_blank_names() {
        let service = service();
        match service.create(draft("  ", "Martin")) {
            Err(PatientServiceError::Validation(message)) => {
                assert!(message.contains("first name"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn update_missing_patient_is_not_found() {
        let service = service();
        match service.update(42, draft("Ada", "Martin")) {
            Err(PatientServiceError::Repository(RepositoryError::NotFound)) => {}
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[test]
    fn delete_hides_record_and_keeps_id_reserved() {
        let service = service();
        let record = service.create(draft("Ada", "Martin")).expect("create");
        service.delete(record.id).expect("delete");

        match service.get(record.id) {
            Err(PatientServiceError::Repository(RepositoryError::NotFound)) => {}
            other => panic!("expected not found after delete, got {other:?}"),
        }

        let next = service.create(draft("Jean", "Roux")).expect("create");
        assert!(next.id > record.id, "tombstoned id must not be reused");
    }

    #[test]
    fn update_replaces_demographics() {
        let service = service();
        let record = service.create(draft("Ada", "Martin")).expect("create");
        let mut replacement = draft("Ada", "Bernard");
        replacement.phone = Some("04 11 22 33 44".to_string());

        let updated = service.update(record.id, replacement).expect("update");
        assert_eq!(updated.last_name, "Bernard");
        assert_eq!(
            service.get(record.id).expect("fetch").phone.as_deref(),
            Some("04 11 22 33 44")
        );
    }
}
