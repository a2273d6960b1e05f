use serde::{Deserialize, Serialize};

use super::domain::{Gender, RiskInput};

/// Risk bands in ascending severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DiabetesRiskLevel {
    None,
    Borderline,
    InDanger,
    EarlyOnset,
}

impl DiabetesRiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            DiabetesRiskLevel::None => "none",
            DiabetesRiskLevel::Borderline => "borderline",
            DiabetesRiskLevel::InDanger => "in_danger",
            DiabetesRiskLevel::EarlyOnset => "early_onset",
        }
    }
}

/// Band tables: ordered `(inclusive trigger-count bound, level)` pairs,
/// first hit wins, anything past the last bound is `EarlyOnset`. Patients
/// under 30 have no borderline tier.
const UNDER_THIRTY_MALE: &[(usize, DiabetesRiskLevel)] = &[
    (2, DiabetesRiskLevel::None),
    (4, DiabetesRiskLevel::InDanger),
];

const UNDER_THIRTY_FEMALE: &[(usize, DiabetesRiskLevel)] = &[
    (3, DiabetesRiskLevel::None),
    (6, DiabetesRiskLevel::InDanger),
];

const THIRTY_AND_OVER: &[(usize, DiabetesRiskLevel)] = &[
    (1, DiabetesRiskLevel::None),
    (5, DiabetesRiskLevel::Borderline),
    (7, DiabetesRiskLevel::InDanger),
];

/// Map the assembled input to a risk band. Total over every trigger count;
/// age 30 itself uses the thirty-and-over table for either gender.
pub fn classify(input: &RiskInput) -> DiabetesRiskLevel {
    let bands = if input.age < 30 {
        match input.gender {
            Gender::Male => UNDER_THIRTY_MALE,
            Gender::Female => UNDER_THIRTY_FEMALE,
        }
    } else {
        THIRTY_AND_OVER
    };

    bands
        .iter()
        .find(|(bound, _)| input.trigger_count <= *bound)
        .map(|(_, level)| *level)
        .unwrap_or(DiabetesRiskLevel::EarlyOnset)
}
