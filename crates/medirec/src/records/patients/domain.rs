use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Administrative gender category as stored in the patient registry.
///
/// Three categories exist at the registry level; the assessment pipeline
/// folds these down to a two-valued input (see the assessment module).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenderCategory {
    Male,
    Female,
    Other,
}

impl GenderCategory {
    /// Numeric code used on the wire and by downstream consumers.
    pub const fn code(self) -> i32 {
        match self {
            GenderCategory::Male => 1,
            GenderCategory::Female => 2,
            GenderCategory::Other => 3,
        }
    }

    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(GenderCategory::Male),
            2 => Some(GenderCategory::Female),
            3 => Some(GenderCategory::Other),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            GenderCategory::Male => "male",
            GenderCategory::Female => "female",
            GenderCategory::Other => "other",
        }
    }
}

/// A registered patient. Identifiers are assigned by the backing store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub gender: GenderCategory,
    pub address: Option<String>,
    pub phone: Option<String>,
}

impl PatientRecord {
    pub fn view(&self) -> PatientView {
        PatientView {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            full_name: format!("{} {}", self.first_name, self.last_name),
            birth_date: self.birth_date,
            gender: self.gender,
            gender_label: self.gender.label(),
            address: self.address.clone(),
            phone: self.phone.clone(),
        }
    }
}

/// Inbound payload for creating or replacing a patient record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientDraft {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub gender: GenderCategory,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl PatientDraft {
    pub(crate) fn into_record(self, id: i32) -> PatientRecord {
        PatientRecord {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            birth_date: self.birth_date,
            gender: self.gender,
            address: self.address,
            phone: self.phone,
        }
    }
}

/// Sanitized representation returned by the HTTP endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct PatientView {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub gender: GenderCategory,
    pub gender_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}
