use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::records::assessment::collaborators::{
    LookupError, NoteArchive, NoteSnapshot, PatientDirectory, PatientSnapshot,
};
use crate::records::assessment::DiabetesRiskService;

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Reference evaluation date shared by the scenario tests.
pub(super) fn evaluation_date() -> NaiveDate {
    date(2025, 6, 15)
}

#[derive(Default)]
pub(super) struct StubDirectory {
    patients: HashMap<i32, PatientSnapshot>,
}

impl StubDirectory {
    pub(super) fn with_patient(mut self, id: i32, birth_date: NaiveDate, gender_code: i32) -> Self {
        self.patients.insert(
            id,
            PatientSnapshot {
                id,
                birth_date,
                gender_code,
            },
        );
        self
    }
}

#[async_trait]
impl PatientDirectory for StubDirectory {
    async fn patient(&self, patient_id: i32) -> Result<PatientSnapshot, LookupError> {
        self.patients
            .get(&patient_id)
            .cloned()
            .ok_or_else(|| LookupError::new("Patient not found"))
    }
}

#[derive(Default)]
pub(super) struct StubArchive {
    notes: HashMap<i32, Vec<NoteSnapshot>>,
    pub(super) calls: AtomicUsize,
}

impl StubArchive {
    pub(super) fn with_notes(mut self, patient_id: i32, contents: &[&str]) -> Self {
        self.notes.insert(
            patient_id,
            contents
                .iter()
                .map(|content| NoteSnapshot {
                    content: content.to_string(),
                })
                .collect(),
        );
        self
    }
}

#[async_trait]
impl NoteArchive for StubArchive {
    async fn patient_notes(&self, patient_id: i32) -> Result<Vec<NoteSnapshot>, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.notes.get(&patient_id).cloned().unwrap_or_default())
    }
}

/// Archive whose every lookup fails with a fixed message.
pub(super) struct BrokenArchive(pub(super) &'static str);

#[async_trait]
impl NoteArchive for BrokenArchive {
    async fn patient_notes(&self, _patient_id: i32) -> Result<Vec<NoteSnapshot>, LookupError> {
        Err(LookupError::new(self.0))
    }
}

/// Seed data mirroring the four demo patients and their notes.
pub(super) fn seeded_directory() -> StubDirectory {
    StubDirectory::default()
        .with_patient(1, date(1966, 12, 31), 2)
        .with_patient(2, date(1945, 6, 24), 1)
        .with_patient(3, date(2004, 6, 18), 1)
        .with_patient(4, date(2002, 6, 28), 2)
}

pub(super) fn seeded_archive() -> StubArchive {
    StubArchive::default()
        .with_notes(1, &["Patient en bonne santé générale."])
        .with_notes(
            2,
            &["Patient fumeur depuis 20 ans. Hémoglobine A1C légèrement élevée."],
        )
        .with_notes(
            3,
            &["Patient fumeur. Taille et poids à surveiller attentivement."],
        )
        .with_notes(
            4,
            &[
                "Anticorps élevés. Réaction anormale.",
                "Fumeuse. Hémoglobine A1C très élevée.",
                "Taille et poids normaux. Cholestérol anormal. Vertiges.",
            ],
        )
}

pub(super) fn seeded_service() -> DiabetesRiskService<StubDirectory, StubArchive> {
    DiabetesRiskService::new(Arc::new(seeded_directory()), Arc::new(seeded_archive()))
}
