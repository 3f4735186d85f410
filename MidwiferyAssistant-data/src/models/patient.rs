use serde::{Deserialize, Serialize};

/// Storage model for a patient followed by a midwife
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientRecord {
    /// Unique identifier for the patient
    pub id: String,

    /// Midwife who owns the record
    pub midwife_id: String,

    pub first_name: String,

    pub last_name: String,

    /// Date of birth (YYYY-MM-DD)
    pub date_of_birth: Option<String>,

    /// First day of the last menstrual period (YYYY-MM-DD)
    pub last_period_date: Option<String>,

    /// Usual cycle length in days
    pub cycle_length: i32,

    pub notes: Option<String>,

    /// When the record was created (RFC 3339)
    pub created_at: String,
}
