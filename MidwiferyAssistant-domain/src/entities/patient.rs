use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

use super::gestational_age::GestationalAgeResult;

/// Cycle length assumed when none is recorded
pub const DEFAULT_CYCLE_LENGTH: i32 = 28;

/// A patient followed by a midwife
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct Patient {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub last_period_date: Option<NaiveDate>,
    pub cycle_length: i32,
    pub notes: Option<String>,
    pub created_at: String,
}

impl Patient {
    /// "LAST First" form used in listings
    pub fn display_name(&self) -> String {
        format!("{} {}", self.last_name, self.first_name)
    }
}

/// A patient with her current term, when a last period is recorded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct PatientDetail {
    pub patient: Patient,
    pub gestational_age: Option<GestationalAgeResult>,
}

/// Request payload for creating a patient
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePatientRequest {
    #[validate(length(min = 1, max = 100, message = "First name must be between 1 and 100 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100, message = "Last name must be between 1 and 100 characters"))]
    pub last_name: String,

    pub date_of_birth: Option<NaiveDate>,

    pub last_period_date: Option<NaiveDate>,

    #[validate(range(min = 20, max = 45, message = "Cycle length must be between 20 and 45 days"))]
    pub cycle_length: Option<i32>,

    #[validate(length(max = 2000, message = "Notes cannot exceed 2000 characters"))]
    pub notes: Option<String>,
}
