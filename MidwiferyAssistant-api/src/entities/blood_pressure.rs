use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use midwifery_assistant_domain::entities::blood_pressure::RecordBloodPressureRequest;
use midwifery_assistant_domain::entities::{BloodPressureCategory, BloodPressureReading, DashboardSummary};

/// Request payload for classifying a blood pressure measurement
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BloodPressureRequest {
    /// Systolic blood pressure in mmHg
    #[validate(range(max = 400, message = "Systolic cannot exceed 400"))]
    pub systolic: i32,

    /// Diastolic blood pressure in mmHg
    #[validate(range(max = 300, message = "Diastolic cannot exceed 300"))]
    pub diastolic: i32,

    /// Heart rate in beats per minute
    #[validate(range(min = 20, max = 250, message = "Heart rate must be between 20 and 250"))]
    pub heart_rate: Option<i32>,

    /// Patient to record the measurement for
    pub patient_id: Option<String>,

    #[validate(length(max = 1000, message = "Notes cannot exceed 1000 characters"))]
    pub notes: Option<String>,
}

impl From<BloodPressureRequest> for RecordBloodPressureRequest {
    fn from(request: BloodPressureRequest) -> Self {
        Self {
            patient_id: request.patient_id.filter(|id| !id.trim().is_empty()),
            systolic: request.systolic,
            diastolic: request.diastolic,
            heart_rate: request.heart_rate,
            notes: request.notes,
        }
    }
}

/// Public blood pressure status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum BloodPressureStatus {
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "elevated")]
    Elevated,
    #[serde(rename = "hypertension_stage_1")]
    HypertensionStage1,
    #[serde(rename = "hypertension_stage_2")]
    HypertensionStage2,
    #[serde(rename = "hypertensive_crisis")]
    HypertensiveCrisis,
}

impl From<BloodPressureCategory> for BloodPressureStatus {
    fn from(category: BloodPressureCategory) -> Self {
        match category {
            BloodPressureCategory::Normal => BloodPressureStatus::Normal,
            BloodPressureCategory::Elevated => BloodPressureStatus::Elevated,
            BloodPressureCategory::Hypertension1 => BloodPressureStatus::HypertensionStage1,
            BloodPressureCategory::Hypertension2 => BloodPressureStatus::HypertensionStage2,
            BloodPressureCategory::HypertensiveCrisis => BloodPressureStatus::HypertensiveCrisis,
        }
    }
}

/// Classification of a measurement
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BloodPressureResponse {
    pub status: BloodPressureStatus,

    /// Advice shown to the midwife
    pub message: String,

    /// Whether the measurement was recorded for a patient
    pub saved: bool,
}

/// Public representation of a stored measurement
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BloodPressureReadingResponse {
    pub id: String,
    pub patient_id: String,
    pub systolic: i32,
    pub diastolic: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub recorded_at: String,
    pub status: BloodPressureStatus,
}

/// Convert domain reading to public reading
pub fn convert_to_public_reading(reading: BloodPressureReading) -> BloodPressureReadingResponse {
    BloodPressureReadingResponse {
        id: reading.id,
        patient_id: reading.patient_id,
        systolic: reading.systolic,
        diastolic: reading.diastolic,
        heart_rate: reading.heart_rate,
        notes: reading.notes,
        recorded_at: reading.recorded_at,
        status: reading.status.into(),
    }
}

/// Dashboard counters
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardResponse {
    pub patient_count: usize,
    pub recent_blood_pressure: Vec<BloodPressureReadingResponse>,
}

impl From<DashboardSummary> for DashboardResponse {
    fn from(summary: DashboardSummary) -> Self {
        Self {
            patient_count: summary.patient_count,
            recent_blood_pressure: summary
                .recent_blood_pressure
                .into_iter()
                .map(convert_to_public_reading)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        let json = serde_json::to_value(BloodPressureStatus::from(BloodPressureCategory::Hypertension1)).unwrap();
        assert_eq!(json, "hypertension_stage_1");

        let json = serde_json::to_value(BloodPressureStatus::from(BloodPressureCategory::HypertensiveCrisis)).unwrap();
        assert_eq!(json, "hypertensive_crisis");
    }

    #[test]
    fn test_blank_patient_id_is_dropped() {
        let request = BloodPressureRequest {
            systolic: 120,
            diastolic: 80,
            heart_rate: None,
            patient_id: Some("  ".to_string()),
            notes: None,
        };

        let domain: RecordBloodPressureRequest = request.into();
        assert!(domain.patient_id.is_none());
    }

    #[test]
    fn test_request_uses_camel_case() {
        let request: BloodPressureRequest =
            serde_json::from_str(r#"{"systolic": 150, "diastolic": 95, "heartRate": 80, "patientId": "p1"}"#)
                .unwrap();

        assert_eq!(request.heart_rate, Some(80));
        assert_eq!(request.patient_id.as_deref(), Some("p1"));
    }
}
