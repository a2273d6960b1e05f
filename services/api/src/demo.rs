use crate::infra::{seed_records, InMemoryNoteStore, InMemoryPatientStore, RecordsDirectory};
use chrono::{Local, NaiveDate};
use clap::Args;
use std::sync::Arc;

use medirec::error::AppError;
use medirec::records::assessment::DiabetesRiskService;
use medirec::records::notes::NoteRepository;
use medirec::records::patients::PatientRepository;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Identifier of the seeded patient to assess (1-4)
    #[arg(long)]
    pub(crate) patient_id: i32,
    /// Evaluation date for the assessment (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

/// Run one assessment against the seeded demo records and print the
/// composed report, the same pipeline the HTTP endpoint drives.
pub(crate) async fn run_assessment(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs { patient_id, today } = args;
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    let patients = Arc::new(InMemoryPatientStore::default());
    let notes = Arc::new(InMemoryNoteStore::default());
    seed_records(&patients, &notes);

    let directory = Arc::new(RecordsDirectory::new(patients.clone(), notes.clone()));
    let service = DiabetesRiskService::new(directory.clone(), directory);

    println!("Diabetes risk assessment demo (evaluated {today})");

    match patients.fetch(patient_id) {
        Ok(Some(record)) => {
            println!(
                "Patient {}: {} {} (born {}, {})",
                record.id,
                record.first_name,
                record.last_name,
                record.birth_date,
                record.gender.label()
            );
        }
        Ok(None) => println!("Patient {patient_id}: not in the seeded registry"),
        Err(err) => println!("Patient registry unavailable: {err}"),
    }

    match notes.for_patient(patient_id) {
        Ok(patient_notes) if patient_notes.is_empty() => {
            println!("Notes on file: none");
        }
        Ok(patient_notes) => {
            println!("Notes on file:");
            for note in patient_notes {
                println!("  - [{}] {}", note.id.0, note.content);
            }
        }
        Err(err) => println!("Note archive unavailable: {err}"),
    }

    match service.assess(patient_id, today).await {
        Ok(result) => {
            println!(
                "Risk level: {} (age {}, {} distinct trigger term(s))",
                result.risk_level.label(),
                result.age,
                result.trigger_count
            );
        }
        Err(err) => {
            println!("Assessment unavailable: {err}");
        }
    }

    Ok(())
}
