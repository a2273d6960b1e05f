use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use super::age::age_on;
use super::collaborators::{LookupError, NoteArchive, PatientDirectory};
use super::domain::{AssessmentResult, Gender, RiskInput};
use super::risk::classify;
use super::triggers::TriggerScanner;

/// Orchestrates one assessment: fetch the patient, fetch the notes, then
/// run the three pure calculators and compose the result.
pub struct DiabetesRiskService<P, N> {
    patients: Arc<P>,
    notes: Arc<N>,
    scanner: TriggerScanner,
}

impl<P, N> DiabetesRiskService<P, N>
where
    P: PatientDirectory + 'static,
    N: NoteArchive + 'static,
{
    pub fn new(patients: Arc<P>, notes: Arc<N>) -> Self {
        Self {
            patients,
            notes,
            scanner: TriggerScanner::new(),
        }
    }

    /// Assess a patient's diabetes risk as of `today`.
    ///
    /// The two collaborator fetches run strictly in sequence: the notes
    /// archive is never consulted when the patient lookup fails. Either
    /// failure terminates the run with the collaborator's message intact.
    pub async fn assess(
        &self,
        patient_id: i32,
        today: NaiveDate,
    ) -> Result<AssessmentResult, LookupError> {
        info!(patient_id, "assessing diabetes risk");

        let patient = match self.patients.patient(patient_id).await {
            Ok(patient) => patient,
            Err(err) => {
                warn!(patient_id, error = %err, "patient lookup failed");
                return Err(err);
            }
        };

        let notes = match self.notes.patient_notes(patient_id).await {
            Ok(notes) => notes,
            Err(err) => {
                warn!(patient_id, error = %err, "notes lookup failed");
                return Err(err);
            }
        };

        let age = age_on(patient.birth_date, today);

        let contents: Vec<&str> = notes.iter().map(|note| note.content.as_str()).collect();
        let trigger_count = self.scanner.count_distinct(&contents);

        let gender = Gender::from_code(patient.gender_code);
        let risk_level = classify(&RiskInput {
            age,
            gender,
            trigger_count,
        });

        info!(
            patient_id,
            risk_level = risk_level.label(),
            age,
            trigger_count,
            "diabetes risk assessed"
        );

        Ok(AssessmentResult {
            patient_id,
            risk_level,
            trigger_count,
            age,
            gender,
        })
    }
}
