use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use midwifery_assistant_data::models::PatientRecord;
use midwifery_assistant_data::repository::{PatientRepository, PatientRepositoryTrait, StorageBackend};

use crate::audit::{log_audit_event, AuditAction, AuditEvent};
use crate::entities::conversions::{convert_to_domain_patient, format_date};
use crate::entities::gestational_age::GestationalAgeInput;
use crate::entities::patient::{CreatePatientRequest, Patient, PatientDetail, DEFAULT_CYCLE_LENGTH};
use crate::entities::MidwifeId;
use crate::services::calculator::calculate_gestational_age;
use crate::services::errors::{map_repo_error, ServiceError};

/// Trait for patient service operations
#[async_trait]
pub trait PatientServiceTrait {
    /// Create a patient for the midwife
    async fn create_patient(&self, midwife: &MidwifeId, request: CreatePatientRequest)
        -> Result<Patient, ServiceError>;

    /// Get a patient with her gestational age at `today`
    async fn get_patient(&self, midwife: &MidwifeId, id: &str, today: NaiveDate)
        -> Result<PatientDetail, ServiceError>;

    /// All patients of the midwife, by last name then first name
    async fn list_patients(&self, midwife: &MidwifeId) -> Result<Vec<Patient>, ServiceError>;
}

/// Patient service for domain logic
pub struct PatientService<R: PatientRepositoryTrait> {
    repository: R,
}

impl<R: PatientRepositoryTrait> PatientService<R> {
    /// Create a new patient service
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: PatientRepositoryTrait + Send + Sync> PatientServiceTrait for PatientService<R> {
    async fn create_patient(
        &self,
        midwife: &MidwifeId,
        request: CreatePatientRequest,
    ) -> Result<Patient, ServiceError> {
        request.validate()?;

        let record = PatientRecord {
            id: Uuid::new_v4().to_string(),
            midwife_id: midwife.to_string(),
            first_name: request.first_name.trim().to_string(),
            last_name: request.last_name.trim().to_string(),
            date_of_birth: request.date_of_birth.map(format_date),
            last_period_date: request.last_period_date.map(format_date),
            cycle_length: request.cycle_length.unwrap_or(DEFAULT_CYCLE_LENGTH),
            notes: request.notes,
            created_at: Utc::now().to_rfc3339(),
        };

        let record = self.repository.create(record).await.map_err(map_repo_error)?;
        info!("Created patient {} for midwife {}", record.id, midwife);

        log_audit_event(
            AuditEvent::new(AuditAction::PatientCreated, midwife)
                .with_resource(record.id.as_str())
                .with_details(format!("Patient: {} {}", record.first_name, record.last_name)),
        );

        Ok(convert_to_domain_patient(record))
    }

    async fn get_patient(
        &self,
        midwife: &MidwifeId,
        id: &str,
        today: NaiveDate,
    ) -> Result<PatientDetail, ServiceError> {
        let record = self
            .repository
            .get_by_id(midwife.as_str(), id)
            .await
            .map_err(map_repo_error)?
            .ok_or_else(|| ServiceError::NotFound(format!("Patient {}", id)))?;

        let patient = convert_to_domain_patient(record);

        let gestational_age = patient.last_period_date.and_then(|last_period_date| {
            let input = GestationalAgeInput {
                last_period_date,
                cycle_length: patient.cycle_length,
            };
            calculate_gestational_age(&input, today)
                .map_err(|e| warn!("No gestational age for patient {}: {}", patient.id, e))
                .ok()
        });

        Ok(PatientDetail { patient, gestational_age })
    }

    async fn list_patients(&self, midwife: &MidwifeId) -> Result<Vec<Patient>, ServiceError> {
        let records = self.repository.list(midwife.as_str()).await.map_err(map_repo_error)?;
        Ok(records.into_iter().map(convert_to_domain_patient).collect())
    }
}

/// Create a patient service on the given storage
pub fn create_patient_service(backend: StorageBackend) -> impl PatientServiceTrait + Send + Sync {
    PatientService::new(PatientRepository::new(backend))
}
