use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use midwifery_assistant_domain::entities::Patient;

/// Request payload for creating a patient
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreatePatientRequest {
    #[validate(length(min = 1, max = 100, message = "First name must be between 1 and 100 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100, message = "Last name must be between 1 and 100 characters"))]
    pub last_name: String,

    pub date_of_birth: Option<NaiveDate>,

    /// First day of the last menstrual period
    pub last_period_date: Option<NaiveDate>,

    /// Defaults to 28 days
    #[validate(range(min = 20, max = 45, message = "Cycle length must be between 20 and 45 days"))]
    pub cycle_length: Option<i32>,

    #[validate(length(max = 2000, message = "Notes cannot exceed 2000 characters"))]
    pub notes: Option<String>,
}

impl From<CreatePatientRequest> for midwifery_assistant_domain::entities::CreatePatientRequest {
    fn from(request: CreatePatientRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            date_of_birth: request.date_of_birth,
            last_period_date: request.last_period_date,
            cycle_length: request.cycle_length,
            notes: request.notes,
        }
    }
}

/// Patients of the midwife
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PatientListResponse {
    pub patients: Vec<Patient>,
}
