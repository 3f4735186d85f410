use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use midwifery_assistant_domain::entities::blood_panel::AnalyzeBloodPanelRequest;
use midwifery_assistant_domain::entities::{BloodPanelInput, BloodPanelRecord, BloodPanelResult};

/// Blood panel values to interpret
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BiomedicalRequest {
    /// Hemoglobin in g/dL
    pub hemoglobin: f64,
    /// Platelets per µL
    pub platelets: i64,
    /// Ferritin in ng/mL
    pub ferritin: Option<f64>,
    /// Hematocrit in %
    pub hematocrit: Option<f64>,
    /// Lactate dehydrogenase in U/L
    pub ldh: Option<f64>,
    /// Alanine aminotransferase in U/L
    pub alt: Option<f64>,
    /// Aspartate aminotransferase in U/L
    pub ast: Option<f64>,

    /// Patient to store the panel for
    pub patient_id: Option<String>,

    #[validate(length(max = 1000, message = "Notes cannot exceed 1000 characters"))]
    pub notes: Option<String>,
}

impl From<BiomedicalRequest> for AnalyzeBloodPanelRequest {
    fn from(request: BiomedicalRequest) -> Self {
        Self {
            patient_id: request.patient_id.filter(|id| !id.trim().is_empty()),
            notes: request.notes,
            panel: BloodPanelInput {
                hemoglobin: request.hemoglobin,
                platelets: request.platelets,
                ferritin: request.ferritin,
                hematocrit: request.hematocrit,
                ldh: request.ldh,
                alt: request.alt,
                ast: request.ast,
            },
        }
    }
}

/// Interpretation of a panel
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BiomedicalResponse {
    #[serde(flatten)]
    pub result: BloodPanelResult,

    /// Whether the panel was stored for a patient
    pub saved: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
}

/// Stored panels of a patient, newest first
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BiomedicalRecordsResponse {
    pub records: Vec<BloodPanelRecord>,
}
