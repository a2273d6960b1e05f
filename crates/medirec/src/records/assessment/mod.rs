//! Diabetes risk assessment: derives a four-band risk level from a
//! patient's age, gender, and the distinct clinical trigger terms found
//! across that patient's free-text notes.

pub mod age;
pub mod collaborators;
pub mod domain;
pub mod risk;
pub mod router;
pub mod service;
pub mod triggers;

#[cfg(test)]
mod tests;

pub use age::age_on;
pub use collaborators::{LookupError, NoteArchive, NoteSnapshot, PatientDirectory, PatientSnapshot};
pub use domain::{AssessmentResult, Gender, RiskInput};
pub use risk::{classify, DiabetesRiskLevel};
pub use router::assessment_router;
pub use service::DiabetesRiskService;
pub use triggers::{TriggerScanner, TRIGGER_TERMS};
