use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

use midwifery_assistant_data::models::{BiomedicalRecord, BloodPressureRecord};
use midwifery_assistant_data::repository::{
    ClinicalRecordRepository, ClinicalRecordRepositoryTrait, PatientRepository,
    PatientRepositoryTrait, StorageBackend,
};

use crate::audit::{log_audit_event, AuditAction, AuditEvent};
use crate::entities::blood_panel::{AnalyzeBloodPanelRequest, BloodPanelRecord, BloodPanelResult};
use crate::entities::blood_pressure::{
    BloodPressureInput, BloodPressureReading, BloodPressureResult, DashboardSummary,
    RecordBloodPressureRequest,
};
use crate::entities::conversions::{convert_to_domain_blood_panel, convert_to_domain_reading};
use crate::entities::MidwifeId;
use crate::services::calculator::{analyze_blood_panel, classify_blood_pressure, evaluate_blood_pressure};
use crate::services::errors::{map_repo_error, ServiceError};

/// Number of readings shown on the dashboard
pub const RECENT_READINGS_LIMIT: usize = 5;

/// Outcome of a blood pressure evaluation
#[derive(Debug, Clone)]
pub struct BloodPressureOutcome {
    pub result: BloodPressureResult,
    /// Stored reading, when a patient was given
    pub reading: Option<BloodPressureReading>,
}

/// Outcome of a blood panel analysis
#[derive(Debug, Clone)]
pub struct BloodPanelOutcome {
    pub result: BloodPanelResult,
    /// Stored panel, when a patient was given
    pub record: Option<BloodPanelRecord>,
}

/// Trait for clinical measurement operations
#[async_trait]
pub trait ClinicalServiceTrait {
    /// Classify a measurement and record it when a patient is given
    async fn evaluate_blood_pressure(
        &self,
        midwife: &MidwifeId,
        request: RecordBloodPressureRequest,
    ) -> Result<BloodPressureOutcome, ServiceError>;

    /// Latest measurements taken by the midwife
    async fn recent_blood_pressure(&self, midwife: &MidwifeId) -> Result<Vec<BloodPressureReading>, ServiceError>;

    /// Interpret a blood panel and store it when a patient is given
    async fn analyze_blood_panel(
        &self,
        midwife: &MidwifeId,
        request: AnalyzeBloodPanelRequest,
    ) -> Result<BloodPanelOutcome, ServiceError>;

    /// Stored panels of one of the midwife's patients, newest first
    async fn list_blood_panels(&self, midwife: &MidwifeId, patient_id: &str)
        -> Result<Vec<BloodPanelRecord>, ServiceError>;

    /// Patient count and latest measurements
    async fn dashboard(&self, midwife: &MidwifeId) -> Result<DashboardSummary, ServiceError>;
}

/// Clinical measurement service
pub struct ClinicalService<P: PatientRepositoryTrait, C: ClinicalRecordRepositoryTrait> {
    patients: P,
    records: C,
}

impl<P, C> ClinicalService<P, C>
where
    P: PatientRepositoryTrait + Send + Sync,
    C: ClinicalRecordRepositoryTrait + Send + Sync,
{
    /// Create a new clinical service
    pub fn new(patients: P, records: C) -> Self {
        Self { patients, records }
    }

    /// Fail with NotFound unless the patient belongs to the midwife
    async fn ensure_patient(&self, midwife: &MidwifeId, patient_id: &str) -> Result<(), ServiceError> {
        self.patients
            .get_by_id(midwife.as_str(), patient_id)
            .await
            .map_err(map_repo_error)?
            .map(|_| ())
            .ok_or_else(|| ServiceError::NotFound(format!("Patient {}", patient_id)))
    }

    fn to_reading(record: BloodPressureRecord) -> BloodPressureReading {
        let status = classify_blood_pressure(record.systolic, record.diastolic);
        convert_to_domain_reading(record, status)
    }
}

#[async_trait]
impl<P, C> ClinicalServiceTrait for ClinicalService<P, C>
where
    P: PatientRepositoryTrait + Send + Sync,
    C: ClinicalRecordRepositoryTrait + Send + Sync,
{
    async fn evaluate_blood_pressure(
        &self,
        midwife: &MidwifeId,
        request: RecordBloodPressureRequest,
    ) -> Result<BloodPressureOutcome, ServiceError> {
        request.validate()?;

        let result = evaluate_blood_pressure(&BloodPressureInput {
            systolic: request.systolic,
            diastolic: request.diastolic,
        })?;
        debug!("Blood pressure {}/{} classified as {}", request.systolic, request.diastolic, result.status);

        let Some(patient_id) = request.patient_id else {
            return Ok(BloodPressureOutcome { result, reading: None });
        };

        self.ensure_patient(midwife, &patient_id).await?;

        let record = BloodPressureRecord {
            id: Uuid::new_v4().to_string(),
            patient_id,
            midwife_id: midwife.to_string(),
            systolic: request.systolic,
            diastolic: request.diastolic,
            heart_rate: request.heart_rate,
            notes: request.notes,
            recorded_at: Utc::now().to_rfc3339(),
        };
        let record = self
            .records
            .create_blood_pressure(record)
            .await
            .map_err(map_repo_error)?;

        info!("Recorded blood pressure {} for patient {}", record.id, record.patient_id);
        log_audit_event(
            AuditEvent::new(AuditAction::BloodPressureRecorded, midwife)
                .with_resource(record.patient_id.as_str())
                .with_details(format!("BP: {}/{}", record.systolic, record.diastolic)),
        );

        Ok(BloodPressureOutcome {
            result,
            reading: Some(Self::to_reading(record)),
        })
    }

    async fn recent_blood_pressure(&self, midwife: &MidwifeId) -> Result<Vec<BloodPressureReading>, ServiceError> {
        let records = self
            .records
            .recent_blood_pressure(midwife.as_str(), RECENT_READINGS_LIMIT)
            .await
            .map_err(map_repo_error)?;

        Ok(records.into_iter().map(Self::to_reading).collect())
    }

    async fn analyze_blood_panel(
        &self,
        midwife: &MidwifeId,
        request: AnalyzeBloodPanelRequest,
    ) -> Result<BloodPanelOutcome, ServiceError> {
        request.validate()?;

        let result = analyze_blood_panel(&request.panel)?;

        let Some(patient_id) = request.patient_id else {
            return Ok(BloodPanelOutcome { result, record: None });
        };

        self.ensure_patient(midwife, &patient_id).await?;

        let panel = request.panel;
        let record = BiomedicalRecord {
            id: Uuid::new_v4().to_string(),
            patient_id,
            midwife_id: midwife.to_string(),
            hemoglobin: panel.hemoglobin,
            platelets: panel.platelets,
            ferritin: panel.ferritin,
            hematocrit: panel.hematocrit,
            ldh: panel.ldh,
            alt: panel.alt,
            ast: panel.ast,
            notes: request.notes,
            recorded_at: Utc::now().to_rfc3339(),
        };
        let record = self.records.create_biomedical(record).await.map_err(map_repo_error)?;

        info!("Recorded blood panel {} for patient {}", record.id, record.patient_id);
        log_audit_event(
            AuditEvent::new(AuditAction::BiomedicalRecorded, midwife)
                .with_resource(record.patient_id.as_str())
                .with_details(format!("Overall: {:?}", result.overall)),
        );

        Ok(BloodPanelOutcome {
            result,
            record: Some(convert_to_domain_blood_panel(record)),
        })
    }

    async fn list_blood_panels(
        &self,
        midwife: &MidwifeId,
        patient_id: &str,
    ) -> Result<Vec<BloodPanelRecord>, ServiceError> {
        self.ensure_patient(midwife, patient_id).await?;

        let records = self.records.list_biomedical(patient_id).await.map_err(map_repo_error)?;
        Ok(records.into_iter().map(convert_to_domain_blood_panel).collect())
    }

    async fn dashboard(&self, midwife: &MidwifeId) -> Result<DashboardSummary, ServiceError> {
        let patient_count = self.patients.count(midwife.as_str()).await.map_err(map_repo_error)?;
        let recent_blood_pressure = self.recent_blood_pressure(midwife).await?;

        Ok(DashboardSummary {
            patient_count,
            recent_blood_pressure,
        })
    }
}

/// Create a clinical service on the given storage
pub fn create_clinical_service(backend: StorageBackend) -> impl ClinicalServiceTrait + Send + Sync {
    ClinicalService::new(
        PatientRepository::new(backend.clone()),
        ClinicalRecordRepository::new(backend),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::blood_panel::BloodPanelInput;
    use crate::entities::blood_pressure::BloodPressureCategory;
    use crate::entities::patient::CreatePatientRequest;
    use crate::services::patient::{create_patient_service, PatientServiceTrait};

    async fn setup() -> (impl ClinicalServiceTrait, MidwifeId, String) {
        let backend = StorageBackend::in_memory();
        let midwife = MidwifeId::new("m1");
        let patient = create_patient_service(backend.clone())
            .create_patient(
                &midwife,
                CreatePatientRequest {
                    first_name: "Claire".to_string(),
                    last_name: "Martin".to_string(),
                    date_of_birth: None,
                    last_period_date: None,
                    cycle_length: None,
                    notes: None,
                },
            )
            .await
            .unwrap();

        (create_clinical_service(backend), midwife, patient.id)
    }

    fn bp_request(patient_id: Option<String>, systolic: i32, diastolic: i32) -> RecordBloodPressureRequest {
        RecordBloodPressureRequest {
            patient_id,
            systolic,
            diastolic,
            heart_rate: Some(82),
            notes: None,
        }
    }

    fn panel_request(patient_id: Option<String>) -> AnalyzeBloodPanelRequest {
        AnalyzeBloodPanelRequest {
            patient_id,
            notes: Some("Third trimester check".to_string()),
            panel: BloodPanelInput {
                hemoglobin: 10.1,
                platelets: 210_000,
                ferritin: Some(18.0),
                hematocrit: None,
                ldh: None,
                alt: None,
                ast: None,
            },
        }
    }

    #[tokio::test]
    async fn test_blood_pressure_without_patient_is_not_saved() {
        let (service, midwife, _) = setup().await;

        let outcome = service
            .evaluate_blood_pressure(&midwife, bp_request(None, 185, 95))
            .await
            .unwrap();

        assert_eq!(outcome.result.status, BloodPressureCategory::HypertensiveCrisis);
        assert!(outcome.reading.is_none());
        assert!(service.recent_blood_pressure(&midwife).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blood_pressure_with_patient_is_saved() {
        let (service, midwife, patient_id) = setup().await;

        let outcome = service
            .evaluate_blood_pressure(&midwife, bp_request(Some(patient_id.clone()), 142, 88))
            .await
            .unwrap();

        let reading = outcome.reading.unwrap();
        assert_eq!(reading.patient_id, patient_id);
        assert_eq!(reading.status, BloodPressureCategory::Hypertension2);

        let dashboard = service.dashboard(&midwife).await.unwrap();
        assert_eq!(dashboard.patient_count, 1);
        assert_eq!(dashboard.recent_blood_pressure, vec![reading]);
    }

    #[tokio::test]
    async fn test_blood_pressure_for_foreign_patient_is_not_found() {
        let (service, _, patient_id) = setup().await;

        let result = service
            .evaluate_blood_pressure(&MidwifeId::new("m2"), bp_request(Some(patient_id), 120, 80))
            .await;

        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_invalid_blood_pressure_is_invalid_input() {
        let (service, midwife, _) = setup().await;

        let result = service.evaluate_blood_pressure(&midwife, bp_request(None, 80, 95)).await;

        assert!(matches!(result, Err(ServiceError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_recent_blood_pressure_is_limited() {
        let (service, midwife, patient_id) = setup().await;

        for systolic in 110..118 {
            service
                .evaluate_blood_pressure(&midwife, bp_request(Some(patient_id.clone()), systolic, 70))
                .await
                .unwrap();
        }

        let recent = service.recent_blood_pressure(&midwife).await.unwrap();
        assert_eq!(recent.len(), RECENT_READINGS_LIMIT);
    }

    #[tokio::test]
    async fn test_blood_panel_is_saved_for_patient() {
        let (service, midwife, patient_id) = setup().await;

        let outcome = service
            .analyze_blood_panel(&midwife, panel_request(Some(patient_id.clone())))
            .await
            .unwrap();
        assert!(outcome.record.is_some());
        assert!(outcome.result.findings.iter().any(|f| f.starts_with("Anemia")));

        let panels = service.list_blood_panels(&midwife, &patient_id).await.unwrap();
        assert_eq!(panels.len(), 1);
        assert_eq!(panels[0].panel.ferritin, Some(18.0));
        assert_eq!(panels[0].notes.as_deref(), Some("Third trimester check"));
    }

    #[tokio::test]
    async fn test_blood_panels_of_foreign_patient_are_hidden() {
        let (service, _, patient_id) = setup().await;

        let result = service.list_blood_panels(&MidwifeId::new("m2"), &patient_id).await;

        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }
}
