use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use medirec::auth::{DirectoryError, UserAccount, UserDirectory};
use medirec::records::assessment::{
    LookupError, NoteArchive, NoteSnapshot, PatientDirectory, PatientSnapshot,
};
use medirec::records::notes::{self, ClinicalNote, NoteId, NoteRepository};
use medirec::records::patients::{self, GenderCategory, PatientRecord, PatientRepository};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryPatientStore {
    inner: Arc<Mutex<PatientStoreInner>>,
}

#[derive(Default)]
struct PatientStoreInner {
    records: HashMap<i32, PatientRecord>,
    tombstones: HashSet<i32>,
}

impl PatientRepository for InMemoryPatientStore {
    fn insert(&self, mut record: PatientRecord) -> Result<PatientRecord, patients::RepositoryError> {
        let mut store = self.inner.lock().expect("patient store mutex poisoned");
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
        } else if store.records.contains_key(&record.id) || store.tombstones.contains(&record.id) {
            return Err(patients::RepositoryError::Conflict);
        }
        store.records.insert(record.id, record.clone());
        Ok(record)
    }

    fn update(&self, record: PatientRecord) -> Result<(), patients::RepositoryError> {
        let mut store = self.inner.lock().expect("patient store mutex poisoned");
        if !store.records.contains_key(&record.id) {
            return Err(patients::RepositoryError::NotFound);
        }
        store.records.insert(record.id, record);
        Ok(())
    }

    fn fetch(&self, id: i32) -> Result<Option<PatientRecord>, patients::RepositoryError> {
        let store = self.inner.lock().expect("patient store mutex poisoned");
        Ok(store.records.get(&id).cloned())
    }

    fn list(&self) -> Result<Vec<PatientRecord>, patients::RepositoryError> {
        let store = self.inner.lock().expect("patient store mutex poisoned");
        let mut records: Vec<_> = store.records.values().cloned().collect();
        records.sort_by_key(|record| record.id);
        Ok(records)
    }

    fn remove(&self, id: i32) -> Result<(), patients::RepositoryError> {
        let mut store = self.inner.lock().expect("patient store mutex poisoned");
        if store.records.remove(&id).is_none() {
            return Err(patients::RepositoryError::NotFound);
        }
        store.tombstones.insert(id);
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryNoteStore {
    inner: Arc<Mutex<NoteStoreInner>>,
}

#[derive(Default)]
struct NoteStoreInner {
    notes: HashMap<NoteId, ClinicalNote>,
    tombstones: HashSet<NoteId>,
    sequence: u64,
}

impl NoteRepository for InMemoryNoteStore {
    fn insert(&self, mut note: ClinicalNote) -> Result<ClinicalNote, notes::RepositoryError> {
        let mut store = self.inner.lock().expect("note store mutex poisoned");
        if note.id.0.is_empty() {
            store.sequence += 1;
            note.id = NoteId(format!("note-{:06}", store.sequence));
        } else if store.notes.contains_key(&note.id) || store.tombstones.contains(&note.id) {
            return Err(notes::RepositoryError::Conflict);
        }
        store.notes.insert(note.id.clone(), note.clone());
        Ok(note)
    }

    fn update(&self, note: ClinicalNote) -> Result<(), notes::RepositoryError> {
        let mut store = self.inner.lock().expect("note store mutex poisoned");
        if !store.notes.contains_key(&note.id) {
            return Err(notes::RepositoryError::NotFound);
        }
        store.notes.insert(note.id.clone(), note);
        Ok(())
    }

    fn fetch(&self, id: &NoteId) -> Result<Option<ClinicalNote>, notes::RepositoryError> {
        let store = self.inner.lock().expect("note store mutex poisoned");
        Ok(store.notes.get(id).cloned())
    }

    fn for_patient(&self, patient_id: i32) -> Result<Vec<ClinicalNote>, notes::RepositoryError> {
        let store = self.inner.lock().expect("note store mutex poisoned");
        let mut result: Vec<_> = store
            .notes
            .values()
            .filter(|note| note.patient_id == patient_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(result)
    }

    fn remove(&self, id: &NoteId) -> Result<(), notes::RepositoryError> {
        let mut store = self.inner.lock().expect("note store mutex poisoned");
        if store.notes.remove(id).is_none() {
            return Err(notes::RepositoryError::NotFound);
        }
        store.tombstones.insert(id.clone());
        Ok(())
    }
}

/// Collaborator facade over the in-process stores, so the assessment
/// pipeline and the note service consume the same read contracts a remote
/// deployment would.
#[derive(Clone)]
pub(crate) struct RecordsDirectory {
    patients: Arc<InMemoryPatientStore>,
    notes: Arc<InMemoryNoteStore>,
}

impl RecordsDirectory {
    pub(crate) fn new(patients: Arc<InMemoryPatientStore>, notes: Arc<InMemoryNoteStore>) -> Self {
        Self { patients, notes }
    }
}

#[async_trait]
impl PatientDirectory for RecordsDirectory {
    async fn patient(&self, patient_id: i32) -> Result<PatientSnapshot, LookupError> {
        match self.patients.fetch(patient_id) {
            Ok(Some(record)) => Ok(PatientSnapshot {
                id: record.id,
                birth_date: record.birth_date,
                gender_code: record.gender.code(),
            }),
            Ok(None) => Err(LookupError::new("Patient not found")),
            Err(err) => Err(LookupError::new(format!("Patients service unavailable: {err}"))),
        }
    }
}

#[async_trait]
impl NoteArchive for RecordsDirectory {
    async fn patient_notes(&self, patient_id: i32) -> Result<Vec<NoteSnapshot>, LookupError> {
        match self.notes.for_patient(patient_id) {
            Ok(notes) => Ok(notes
                .into_iter()
                .map(|note| NoteSnapshot {
                    content: note.content,
                })
                .collect()),
            Err(err) => Err(LookupError::new(format!("Notes service unavailable: {err}"))),
        }
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryUserDirectory {
    accounts: Arc<Mutex<HashMap<String, UserAccount>>>,
}

impl InMemoryUserDirectory {
    pub(crate) fn register(&self, account: UserAccount) {
        self.accounts
            .lock()
            .expect("user directory mutex poisoned")
            .insert(account.username.clone(), account);
    }
}

impl UserDirectory for InMemoryUserDirectory {
    fn find(&self, username: &str) -> Result<Option<UserAccount>, DirectoryError> {
        let accounts = self.accounts.lock().expect("user directory mutex poisoned");
        Ok(accounts.get(username).cloned())
    }
}

/// Demo practitioner credentials for the seeded deployment.
pub(crate) const DEMO_USERNAME: &str = "demo";
pub(crate) const DEMO_PASSWORD: &str = "demo-password";

pub(crate) fn seed_users(directory: &InMemoryUserDirectory) -> Result<(), DirectoryError> {
    let account = UserAccount::with_password(
        DEMO_USERNAME,
        "Demo Practitioner",
        "practitioner",
        DEMO_PASSWORD,
    )?;
    directory.register(account);
    Ok(())
}

/// Seed the reference records: four patients whose notes collectively
/// exercise every risk band.
pub(crate) fn seed_records(patients: &InMemoryPatientStore, notes: &InMemoryNoteStore) {
    let seeds = [
        (
            patient_seed(
                1,
                "TestNone",
                1966,
                12,
                31,
                GenderCategory::Female,
                "1 Brookside St",
                "100-222-3333",
            ),
            vec!["Patient en bonne santé générale."],
        ),
        (
            patient_seed(
                2,
                "TestBorderline",
                1945,
                6,
                24,
                GenderCategory::Male,
                "2 High St",
                "200-333-4444",
            ),
            vec!["Patient fumeur depuis 20 ans. Hémoglobine A1C légèrement élevée."],
        ),
        (
            patient_seed(
                3,
                "TestInDanger",
                2004,
                6,
                18,
                GenderCategory::Male,
                "3 Club Road",
                "300-444-5555",
            ),
            vec!["Patient fumeur. Taille et poids à surveiller attentivement."],
        ),
        (
            patient_seed(
                4,
                "TestEarlyOnset",
                2002,
                6,
                28,
                GenderCategory::Female,
                "4 Valley Dr",
                "400-555-6666",
            ),
            vec![
                "Anticorps élevés. Réaction anormale.",
                "Fumeuse. Hémoglobine A1C très élevée.",
                "Taille et poids normaux. Cholestérol anormal. Vertiges.",
            ],
        ),
    ];

    for (record, contents) in seeds {
        let patient_id = record.id;
        patients
            .insert(record)
            .expect("seed patient ids are unique");
        for (index, content) in contents.iter().enumerate() {
            let created_at = Utc
                .with_ymd_and_hms(2025, 5, 1 + index as u32, 9, 0, 0)
                .single()
                .expect("valid seed timestamp");
            notes
                .insert(ClinicalNote {
                    id: NoteId(format!("note-seed-{patient_id}-{index}")),
                    patient_id,
                    content: content.to_string(),
                    created_at,
                    updated_at: None,
                })
                .expect("seed note ids are unique");
        }
    }
}

fn patient_seed(
    id: i32,
    last_name: &str,
    year: i32,
    month: u32,
    day: u32,
    gender: GenderCategory,
    address: &str,
    phone: &str,
) -> PatientRecord {
    PatientRecord {
        id,
        first_name: "Test".to_string(),
        last_name: last_name.to_string(),
        birth_date: NaiveDate::from_ymd_opt(year, month, day).expect("valid seed birth date"),
        gender,
        address: Some(address.to_string()),
        phone: Some(phone.to_string()),
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
