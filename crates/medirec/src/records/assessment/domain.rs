use serde::{Deserialize, Serialize};

use super::risk::DiabetesRiskLevel;

/// Two-valued gender used by the risk tables.
///
/// The registry stores three categories; the assessment input folds
/// external code 1 to `Male` and every other code to `Female`. The fold
/// is fixed: the decision tables only branch on these two values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const fn from_code(code: i32) -> Self {
        if code == 1 {
            Gender::Male
        } else {
            Gender::Female
        }
    }
}

/// Inputs to the risk classifier, assembled fresh for every assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskInput {
    pub age: i32,
    pub gender: Gender,
    pub trigger_count: usize,
}

/// Composed outcome of one assessment run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub patient_id: i32,
    pub risk_level: DiabetesRiskLevel,
    pub trigger_count: usize,
    pub age: i32,
    pub gender: Gender,
}
