use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// Who a postnatal checkup is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub enum CheckupType {
    Mother,
    Baby,
}

impl CheckupType {
    pub fn as_str(self) -> &'static str {
        match self {
            CheckupType::Mother => "mother",
            CheckupType::Baby => "baby",
        }
    }
}

impl fmt::Display for CheckupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request to record a delivery
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecordDeliveryRequest {
    pub patient_id: String,
    pub delivery_date: NaiveDateTime,
    #[validate(length(min = 1, max = 50, message = "Delivery type must be between 1 and 50 characters"))]
    pub delivery_type: String,
    #[validate(length(max = 200, message = "Delivery location cannot exceed 200 characters"))]
    pub delivery_location: Option<String>,
    pub complications: Option<String>,
}

/// A recorded delivery with the mother's name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct Delivery {
    pub id: String,
    pub patient_id: String,
    pub patient_name: Option<String>,
    pub delivery_date: String,
    pub delivery_type: String,
    pub delivery_location: Option<String>,
    pub complications: Option<String>,
}

/// Request to register a newborn
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterBabyRequest {
    pub mother_id: String,
    #[validate(length(min = 1, max = 100, message = "First name must be between 1 and 100 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "Last name must be between 1 and 100 characters"))]
    pub last_name: String,
    pub birth_date: NaiveDate,
}

/// A newborn with the mother's name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct Baby {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: String,
    pub mother_id: String,
    pub mother_name: Option<String>,
}

/// Request to record a postnatal checkup of the mother or the baby
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PostnatalCheckupRequest {
    pub checkup_type: CheckupType,
    /// Required for a mother checkup
    pub patient_id: Option<String>,
    /// Required for a baby checkup
    pub baby_id: Option<String>,
    pub checkup_date: NaiveDateTime,
    #[validate(range(min = 30.0, max = 45.0, message = "Temperature must be between 30 and 45 °C"))]
    pub temperature: Option<f64>,
    #[validate(range(min = 20, max = 250, message = "Heart rate must be between 20 and 250"))]
    pub heart_rate: Option<i32>,
    pub blood_pressure_systolic: Option<i32>,
    pub blood_pressure_diastolic: Option<i32>,
    #[validate(range(min = 5, max = 120, message = "Respiratory rate must be between 5 and 120"))]
    pub respiratory_rate: Option<i32>,
    #[validate(range(min = 0.0, message = "Weight cannot be negative"))]
    pub weight: Option<f64>,
    pub symptoms: Option<String>,
    pub physical_exam: Option<String>,
    pub recommendations: Option<String>,
    pub medications: Option<String>,
    pub notes: Option<String>,
    /// When set, a care reminder is scheduled for that day
    pub next_checkup_date: Option<NaiveDate>,
}

/// A stored checkup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct PostnatalCheckup {
    pub id: String,
    pub checkup_type: CheckupType,
    pub patient_id: Option<String>,
    pub baby_id: Option<String>,
    pub checkup_date: String,
    pub next_checkup_date: Option<String>,
    /// Reminder created for the next checkup
    pub reminder_id: Option<String>,
}

/// Request to record a vaccination
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VaccinationRequest {
    pub baby_id: String,
    #[validate(length(min = 1, max = 100, message = "Vaccine name must be between 1 and 100 characters"))]
    pub vaccine_name: String,
    pub date_administered: NaiveDateTime,
    pub dose: Option<String>,
    pub route: Option<String>,
    pub site: Option<String>,
    pub lot_number: Option<String>,
    pub expiration_date: Option<NaiveDate>,
    pub reaction: Option<String>,
    pub notes: Option<String>,
}

/// A stored vaccination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct Vaccination {
    pub id: String,
    pub baby_id: String,
    pub vaccine_name: String,
    pub date_administered: String,
}

/// Request to record a breastfeeding observation
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BreastfeedingRequest {
    pub baby_id: String,
    pub mother_id: String,
    pub feeding_date: NaiveDateTime,
    #[validate(length(min = 1, max = 50, message = "Feeding type must be between 1 and 50 characters"))]
    pub feeding_type: String,
    /// Minutes
    #[validate(range(min = 0, max = 600, message = "Duration must be between 0 and 600 minutes"))]
    pub duration: Option<i32>,
    pub issues: Option<String>,
    pub notes: Option<String>,
}

/// A stored breastfeeding observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct BreastfeedingObservation {
    pub id: String,
    pub baby_id: String,
    pub mother_id: String,
    pub feeding_date: String,
    pub feeding_type: String,
    pub duration: Option<i32>,
}

/// A scheduled follow-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct CareReminder {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub reminder_date: String,
    pub reminder_type: String,
    pub priority: String,
    pub patient_id: Option<String>,
    pub baby_id: Option<String>,
    pub completed: bool,
}
