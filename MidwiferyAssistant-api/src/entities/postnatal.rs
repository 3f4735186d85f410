use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use midwifery_assistant_domain::entities::conversions::{parse_date, parse_datetime};
use midwifery_assistant_domain::entities::postnatal::{
    BreastfeedingRequest as DomainBreastfeedingRequest, PostnatalCheckupRequest,
    RecordDeliveryRequest, RegisterBabyRequest, VaccinationRequest as DomainVaccinationRequest,
};
use midwifery_assistant_domain::entities::{Baby, CareReminder, CheckupType, Delivery};

use super::common::ErrorResponse;

fn datetime_field(field: &str, value: &str) -> Result<NaiveDateTime, ErrorResponse> {
    parse_datetime(value.trim()).map_err(|e| ErrorResponse::bad_request(&format!("{}: {}", field, e)))
}

fn date_field(field: &str, value: &str) -> Result<NaiveDate, ErrorResponse> {
    parse_date(value.trim()).map_err(|e| ErrorResponse::bad_request(&format!("{}: {}", field, e)))
}

/// Form fields may arrive as empty strings
fn optional_date_field(field: &str, value: Option<&str>) -> Result<Option<NaiveDate>, ErrorResponse> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => date_field(field, v).map(Some),
        _ => Ok(None),
    }
}

/// Request payload for recording a delivery
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct DeliveryRequest {
    pub patient_id: String,

    /// YYYY-MM-DDTHH:MM
    pub delivery_date: String,

    #[validate(length(min = 1, max = 50, message = "Delivery type must be between 1 and 50 characters"))]
    pub delivery_type: String,

    #[validate(length(max = 200, message = "Delivery location cannot exceed 200 characters"))]
    pub delivery_location: Option<String>,

    pub complications: Option<String>,
}

impl TryFrom<DeliveryRequest> for RecordDeliveryRequest {
    type Error = ErrorResponse;

    fn try_from(request: DeliveryRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            delivery_date: datetime_field("delivery_date", &request.delivery_date)?,
            patient_id: request.patient_id,
            delivery_type: request.delivery_type,
            delivery_location: request.delivery_location,
            complications: request.complications,
        })
    }
}

/// Request payload for registering a newborn
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct BabyRequest {
    pub mother_id: String,

    #[validate(length(min = 1, max = 100, message = "First name must be between 1 and 100 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100, message = "Last name must be between 1 and 100 characters"))]
    pub last_name: String,

    /// YYYY-MM-DD
    pub birth_date: String,
}

impl TryFrom<BabyRequest> for RegisterBabyRequest {
    type Error = ErrorResponse;

    fn try_from(request: BabyRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            birth_date: date_field("birth_date", &request.birth_date)?,
            mother_id: request.mother_id,
            first_name: request.first_name,
            last_name: request.last_name,
        })
    }
}

/// Request payload for a postnatal checkup of the mother or the baby
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CheckupRequest {
    pub checkup_type: CheckupType,

    /// Required for a mother checkup
    pub patient_id: Option<String>,

    /// Required for a baby checkup
    pub baby_id: Option<String>,

    /// YYYY-MM-DDTHH:MM
    pub checkup_date: String,

    /// Body temperature in °C
    #[validate(range(min = 30.0, max = 45.0, message = "Temperature must be between 30 and 45 °C"))]
    pub temperature: Option<f64>,

    #[validate(range(min = 20, max = 250, message = "Heart rate must be between 20 and 250"))]
    pub heart_rate: Option<i32>,

    pub blood_pressure_systolic: Option<i32>,
    pub blood_pressure_diastolic: Option<i32>,

    #[validate(range(min = 5, max = 120, message = "Respiratory rate must be between 5 and 120"))]
    pub respiratory_rate: Option<i32>,

    /// Weight in kg
    #[validate(range(min = 0.0, message = "Weight cannot be negative"))]
    pub weight: Option<f64>,

    pub symptoms: Option<String>,
    pub physical_exam: Option<String>,
    pub recommendations: Option<String>,
    pub medications: Option<String>,
    pub notes: Option<String>,

    /// YYYY-MM-DD; schedules a care reminder when set
    pub next_checkup_date: Option<String>,
}

impl TryFrom<CheckupRequest> for PostnatalCheckupRequest {
    type Error = ErrorResponse;

    fn try_from(request: CheckupRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            checkup_date: datetime_field("checkup_date", &request.checkup_date)?,
            next_checkup_date: optional_date_field("next_checkup_date", request.next_checkup_date.as_deref())?,
            checkup_type: request.checkup_type,
            patient_id: request.patient_id.filter(|id| !id.is_empty()),
            baby_id: request.baby_id.filter(|id| !id.is_empty()),
            temperature: request.temperature,
            heart_rate: request.heart_rate,
            blood_pressure_systolic: request.blood_pressure_systolic,
            blood_pressure_diastolic: request.blood_pressure_diastolic,
            respiratory_rate: request.respiratory_rate,
            weight: request.weight,
            symptoms: request.symptoms,
            physical_exam: request.physical_exam,
            recommendations: request.recommendations,
            medications: request.medications,
            notes: request.notes,
        })
    }
}

/// Request payload for a vaccination
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct VaccinationRequest {
    pub baby_id: String,

    #[validate(length(min = 1, max = 100, message = "Vaccine name must be between 1 and 100 characters"))]
    pub vaccine_name: String,

    /// YYYY-MM-DDTHH:MM
    pub date_administered: String,

    pub dose: Option<String>,
    pub route: Option<String>,
    pub site: Option<String>,
    pub lot_number: Option<String>,

    /// YYYY-MM-DD
    pub expiration_date: Option<String>,

    pub reaction: Option<String>,
    pub notes: Option<String>,
}

impl TryFrom<VaccinationRequest> for DomainVaccinationRequest {
    type Error = ErrorResponse;

    fn try_from(request: VaccinationRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            date_administered: datetime_field("date_administered", &request.date_administered)?,
            expiration_date: optional_date_field("expiration_date", request.expiration_date.as_deref())?,
            baby_id: request.baby_id,
            vaccine_name: request.vaccine_name,
            dose: request.dose,
            route: request.route,
            site: request.site,
            lot_number: request.lot_number,
            reaction: request.reaction,
            notes: request.notes,
        })
    }
}

/// Request payload for a breastfeeding observation
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct BreastfeedingRequest {
    pub baby_id: String,
    pub mother_id: String,

    /// YYYY-MM-DDTHH:MM
    pub feeding_date: String,

    #[validate(length(min = 1, max = 50, message = "Feeding type must be between 1 and 50 characters"))]
    pub feeding_type: String,

    /// Minutes
    #[validate(range(min = 0, max = 600, message = "Duration must be between 0 and 600 minutes"))]
    pub duration: Option<i32>,

    pub issues: Option<String>,
    pub notes: Option<String>,
}

impl TryFrom<BreastfeedingRequest> for DomainBreastfeedingRequest {
    type Error = ErrorResponse;

    fn try_from(request: BreastfeedingRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            feeding_date: datetime_field("feeding_date", &request.feeding_date)?,
            baby_id: request.baby_id,
            mother_id: request.mother_id,
            feeding_type: request.feeding_type,
            duration: request.duration,
            issues: request.issues,
            notes: request.notes,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeliveryListResponse {
    pub deliveries: Vec<Delivery>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BabyListResponse {
    pub babies: Vec<Baby>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReminderListResponse {
    pub reminders: Vec<CareReminder>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkup(next_checkup_date: Option<&str>) -> CheckupRequest {
        CheckupRequest {
            checkup_type: CheckupType::Mother,
            patient_id: Some("p1".to_string()),
            baby_id: Some(String::new()),
            checkup_date: "2024-03-01T09:30".to_string(),
            temperature: None,
            heart_rate: None,
            blood_pressure_systolic: None,
            blood_pressure_diastolic: None,
            respiratory_rate: None,
            weight: None,
            symptoms: None,
            physical_exam: None,
            recommendations: None,
            medications: None,
            notes: None,
            next_checkup_date: next_checkup_date.map(str::to_string),
        }
    }

    #[test]
    fn test_checkup_form_fields_are_parsed() {
        let request = PostnatalCheckupRequest::try_from(checkup(Some("2024-03-08"))).unwrap();

        assert_eq!(request.checkup_date.format("%H:%M").to_string(), "09:30");
        assert_eq!(request.next_checkup_date, NaiveDate::from_ymd_opt(2024, 3, 8));
        assert!(request.baby_id.is_none());
    }

    #[test]
    fn test_empty_next_checkup_date_is_none() {
        let request = PostnatalCheckupRequest::try_from(checkup(Some(""))).unwrap();

        assert!(request.next_checkup_date.is_none());
    }

    #[test]
    fn test_malformed_datetime_is_bad_request() {
        let mut request = checkup(None);
        request.checkup_date = "01/03/2024".to_string();

        let err = PostnatalCheckupRequest::try_from(request).unwrap_err();
        assert_eq!(err.error, "bad_request");
        assert!(err.message.starts_with("checkup_date"));
    }
}
