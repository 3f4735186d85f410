use std::collections::HashMap;

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use midwifery_assistant_data::models::{
    BabyRecord, BreastfeedingRecord, CareReminderRecord, DeliveryRecord, PostnatalCheckupRecord,
    VaccinationRecord,
};
use midwifery_assistant_data::repository::{
    PatientRepository, PatientRepositoryTrait, PostnatalRepository, PostnatalRepositoryTrait,
    StorageBackend,
};

use crate::audit::{log_audit_event, AuditAction, AuditEvent};
use crate::entities::conversions::{
    convert_to_domain_baby, convert_to_domain_breastfeeding, convert_to_domain_checkup,
    convert_to_domain_delivery, convert_to_domain_reminder, convert_to_domain_vaccination,
    format_date, format_datetime,
};
use crate::entities::postnatal::{
    Baby, BreastfeedingObservation, BreastfeedingRequest, CareReminder, CheckupType, Delivery,
    PostnatalCheckup, PostnatalCheckupRequest, RecordDeliveryRequest, RegisterBabyRequest,
    Vaccination, VaccinationRequest,
};
use crate::entities::MidwifeId;
use crate::services::errors::{map_repo_error, ServiceError};

/// Priority given to reminders created from a checkup
const DEFAULT_REMINDER_PRIORITY: &str = "normal";

/// Trait for postnatal follow-up operations
#[async_trait]
pub trait PostnatalServiceTrait {
    /// Record a delivery for one of the midwife's patients
    async fn record_delivery(&self, midwife: &MidwifeId, request: RecordDeliveryRequest)
        -> Result<Delivery, ServiceError>;

    /// Deliveries, newest first
    async fn list_deliveries(&self, midwife: &MidwifeId) -> Result<Vec<Delivery>, ServiceError>;

    /// Register a newborn of one of the midwife's patients
    async fn register_baby(&self, midwife: &MidwifeId, request: RegisterBabyRequest)
        -> Result<Baby, ServiceError>;

    /// Newborns with their mother's name
    async fn list_babies(&self, midwife: &MidwifeId) -> Result<Vec<Baby>, ServiceError>;

    /// Record a checkup and schedule the next one when a date is given
    async fn record_checkup(&self, midwife: &MidwifeId, request: PostnatalCheckupRequest)
        -> Result<PostnatalCheckup, ServiceError>;

    /// Record a vaccination for one of the midwife's babies
    async fn record_vaccination(&self, midwife: &MidwifeId, request: VaccinationRequest)
        -> Result<Vaccination, ServiceError>;

    /// Record a breastfeeding observation
    async fn record_breastfeeding(&self, midwife: &MidwifeId, request: BreastfeedingRequest)
        -> Result<BreastfeedingObservation, ServiceError>;

    /// Reminders not yet completed, soonest first
    async fn pending_reminders(&self, midwife: &MidwifeId) -> Result<Vec<CareReminder>, ServiceError>;
}

/// Postnatal follow-up service
pub struct PostnatalService<P: PatientRepositoryTrait, R: PostnatalRepositoryTrait> {
    patients: P,
    records: R,
}

impl<P, R> PostnatalService<P, R>
where
    P: PatientRepositoryTrait + Send + Sync,
    R: PostnatalRepositoryTrait + Send + Sync,
{
    /// Create a new postnatal service
    pub fn new(patients: P, records: R) -> Self {
        Self { patients, records }
    }

    /// Display name of the midwife's patient, NotFound otherwise
    async fn patient_name(&self, midwife: &MidwifeId, patient_id: &str) -> Result<String, ServiceError> {
        self.patients
            .get_by_id(midwife.as_str(), patient_id)
            .await
            .map_err(map_repo_error)?
            .map(|p| format!("{} {}", p.last_name, p.first_name))
            .ok_or_else(|| ServiceError::NotFound(format!("Patient {}", patient_id)))
    }

    async fn ensure_baby(&self, midwife: &MidwifeId, baby_id: &str) -> Result<BabyRecord, ServiceError> {
        self.records
            .get_baby(midwife.as_str(), baby_id)
            .await
            .map_err(map_repo_error)?
            .ok_or_else(|| ServiceError::NotFound(format!("Baby {}", baby_id)))
    }

    /// "LAST First" names of all the midwife's patients
    async fn patient_names(&self, midwife: &MidwifeId) -> Result<HashMap<String, String>, ServiceError> {
        let patients = self.patients.list(midwife.as_str()).await.map_err(map_repo_error)?;
        Ok(patients
            .into_iter()
            .map(|p| {
                let name = format!("{} {}", p.last_name, p.first_name);
                (p.id, name)
            })
            .collect())
    }
}

fn required_id(value: Option<String>, field: &str) -> Result<String, ServiceError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ServiceError::Validation(format!("{} is required", field)))
}

#[async_trait]
impl<P, R> PostnatalServiceTrait for PostnatalService<P, R>
where
    P: PatientRepositoryTrait + Send + Sync,
    R: PostnatalRepositoryTrait + Send + Sync,
{
    async fn record_delivery(
        &self,
        midwife: &MidwifeId,
        request: RecordDeliveryRequest,
    ) -> Result<Delivery, ServiceError> {
        request.validate()?;
        let patient_name = self.patient_name(midwife, &request.patient_id).await?;

        let record = DeliveryRecord {
            id: Uuid::new_v4().to_string(),
            patient_id: request.patient_id,
            midwife_id: midwife.to_string(),
            delivery_date: format_datetime(request.delivery_date),
            delivery_type: request.delivery_type,
            delivery_location: request.delivery_location,
            complications: request.complications,
        };
        let record = self.records.create_delivery(record).await.map_err(map_repo_error)?;

        info!("Recorded delivery {} for patient {}", record.id, record.patient_id);
        log_audit_event(
            AuditEvent::new(AuditAction::DeliveryRecorded, midwife)
                .with_resource(record.patient_id.as_str())
                .with_details(format!("Type: {}", record.delivery_type)),
        );

        Ok(convert_to_domain_delivery(record, Some(patient_name)))
    }

    async fn list_deliveries(&self, midwife: &MidwifeId) -> Result<Vec<Delivery>, ServiceError> {
        let names = self.patient_names(midwife).await?;
        let records = self.records.list_deliveries(midwife.as_str()).await.map_err(map_repo_error)?;

        Ok(records
            .into_iter()
            .map(|record| {
                let name = names.get(&record.patient_id).cloned();
                convert_to_domain_delivery(record, name)
            })
            .collect())
    }

    async fn register_baby(&self, midwife: &MidwifeId, request: RegisterBabyRequest) -> Result<Baby, ServiceError> {
        request.validate()?;
        let mother_name = self.patient_name(midwife, &request.mother_id).await?;

        let record = BabyRecord {
            id: Uuid::new_v4().to_string(),
            mother_id: request.mother_id,
            midwife_id: midwife.to_string(),
            first_name: request.first_name.trim().to_string(),
            last_name: request.last_name.trim().to_string(),
            birth_date: format_date(request.birth_date),
        };
        let record = self.records.create_baby(record).await.map_err(map_repo_error)?;

        info!("Registered baby {} of mother {}", record.id, record.mother_id);
        log_audit_event(
            AuditEvent::new(AuditAction::BabyRegistered, midwife)
                .with_resource(record.id.as_str())
                .with_details(format!("Mother ID: {}", record.mother_id)),
        );

        Ok(convert_to_domain_baby(record, Some(mother_name)))
    }

    async fn list_babies(&self, midwife: &MidwifeId) -> Result<Vec<Baby>, ServiceError> {
        let names = self.patient_names(midwife).await?;
        let records = self.records.list_babies(midwife.as_str()).await.map_err(map_repo_error)?;

        Ok(records
            .into_iter()
            .map(|record| {
                let name = names.get(&record.mother_id).cloned();
                convert_to_domain_baby(record, name)
            })
            .collect())
    }

    async fn record_checkup(
        &self,
        midwife: &MidwifeId,
        request: PostnatalCheckupRequest,
    ) -> Result<PostnatalCheckup, ServiceError> {
        request.validate()?;

        let (patient_id, baby_id) = match request.checkup_type {
            CheckupType::Mother => {
                let patient_id = required_id(request.patient_id, "patient_id")?;
                self.patient_name(midwife, &patient_id).await?;
                (Some(patient_id), None)
            }
            CheckupType::Baby => {
                let baby_id = required_id(request.baby_id, "baby_id")?;
                self.ensure_baby(midwife, &baby_id).await?;
                (None, Some(baby_id))
            }
        };

        let checkup_type = request.checkup_type;
        let record = PostnatalCheckupRecord {
            id: Uuid::new_v4().to_string(),
            midwife_id: midwife.to_string(),
            checkup_type: checkup_type.to_string(),
            patient_id: patient_id.clone(),
            baby_id: baby_id.clone(),
            checkup_date: format_datetime(request.checkup_date),
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
            next_checkup_date: request.next_checkup_date.map(format_date),
        };
        let record = self.records.create_checkup(record).await.map_err(map_repo_error)?;

        let subject = match checkup_type {
            CheckupType::Mother => format!("Patient ID: {}", patient_id.as_deref().unwrap_or_default()),
            CheckupType::Baby => format!("Baby ID: {}", baby_id.as_deref().unwrap_or_default()),
        };
        log_audit_event(
            AuditEvent::new(AuditAction::PostnatalCheckupRecorded, midwife)
                .with_resource(record.id.as_str())
                .with_details(format!("{} ({})", subject, checkup_type)),
        );

        let reminder_id = match &record.next_checkup_date {
            Some(next_date) => {
                let description = match checkup_type {
                    CheckupType::Mother => "Postnatal follow-up scheduled for the mother",
                    CheckupType::Baby => "Postnatal follow-up scheduled for the baby",
                };
                let reminder = CareReminderRecord {
                    id: Uuid::new_v4().to_string(),
                    midwife_id: midwife.to_string(),
                    title: format!("Next postnatal checkup ({})", checkup_type),
                    description: Some(description.to_string()),
                    reminder_date: next_date.clone(),
                    reminder_type: checkup_type.to_string(),
                    priority: DEFAULT_REMINDER_PRIORITY.to_string(),
                    patient_id,
                    baby_id,
                    completed: false,
                };
                let reminder = self.records.create_reminder(reminder).await.map_err(map_repo_error)?;
                info!("Scheduled reminder {} for {}", reminder.id, reminder.reminder_date);
                Some(reminder.id)
            }
            None => None,
        };

        Ok(convert_to_domain_checkup(record, checkup_type, reminder_id))
    }

    async fn record_vaccination(
        &self,
        midwife: &MidwifeId,
        request: VaccinationRequest,
    ) -> Result<Vaccination, ServiceError> {
        request.validate()?;
        self.ensure_baby(midwife, &request.baby_id).await?;

        let record = VaccinationRecord {
            id: Uuid::new_v4().to_string(),
            baby_id: request.baby_id,
            midwife_id: midwife.to_string(),
            vaccine_name: request.vaccine_name,
            date_administered: format_datetime(request.date_administered),
            dose: request.dose,
            route: request.route,
            site: request.site,
            lot_number: request.lot_number,
            expiration_date: request.expiration_date.map(format_date),
            reaction: request.reaction,
            notes: request.notes,
        };
        let record = self.records.create_vaccination(record).await.map_err(map_repo_error)?;

        log_audit_event(
            AuditEvent::new(AuditAction::VaccinationRecorded, midwife)
                .with_resource(record.baby_id.as_str())
                .with_details(format!("Vaccine: {}", record.vaccine_name)),
        );

        Ok(convert_to_domain_vaccination(record))
    }

    async fn record_breastfeeding(
        &self,
        midwife: &MidwifeId,
        request: BreastfeedingRequest,
    ) -> Result<BreastfeedingObservation, ServiceError> {
        request.validate()?;
        self.ensure_baby(midwife, &request.baby_id).await?;
        self.patient_name(midwife, &request.mother_id).await?;

        let record = BreastfeedingRecord {
            id: Uuid::new_v4().to_string(),
            mother_id: request.mother_id,
            baby_id: request.baby_id,
            midwife_id: midwife.to_string(),
            feeding_date: format_datetime(request.feeding_date),
            feeding_type: request.feeding_type,
            duration: request.duration,
            issues: request.issues,
            notes: request.notes,
        };
        let record = self.records.create_breastfeeding(record).await.map_err(map_repo_error)?;

        log_audit_event(
            AuditEvent::new(AuditAction::BreastfeedingRecorded, midwife)
                .with_resource(record.baby_id.as_str())
                .with_details(format!("Type: {}", record.feeding_type)),
        );

        Ok(convert_to_domain_breastfeeding(record))
    }

    async fn pending_reminders(&self, midwife: &MidwifeId) -> Result<Vec<CareReminder>, ServiceError> {
        let records = self
            .records
            .list_reminders(midwife.as_str(), false)
            .await
            .map_err(map_repo_error)?;

        Ok(records.into_iter().map(convert_to_domain_reminder).collect())
    }
}

/// Create a postnatal service on the given storage
pub fn create_postnatal_service(backend: StorageBackend) -> impl PostnatalServiceTrait + Send + Sync {
    PostnatalService::new(
        PatientRepository::new(backend.clone()),
        PostnatalRepository::new(backend),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use crate::entities::patient::CreatePatientRequest;
    use crate::services::patient::{create_patient_service, PatientServiceTrait};

    struct Fixture {
        service: Box<dyn PostnatalServiceTrait + Send + Sync>,
        midwife: MidwifeId,
        mother_id: String,
        baby_id: String,
    }

    fn datetime(value: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").unwrap()
    }

    async fn setup() -> Fixture {
        let backend = StorageBackend::in_memory();
        let midwife = MidwifeId::new("m1");
        let mother = create_patient_service(backend.clone())
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

        let service = create_postnatal_service(backend);
        let baby = service
            .register_baby(
                &midwife,
                RegisterBabyRequest {
                    mother_id: mother.id.clone(),
                    first_name: "Léo".to_string(),
                    last_name: "Martin".to_string(),
                    birth_date: NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
                },
            )
            .await
            .unwrap();

        Fixture {
            service: Box::new(service),
            midwife,
            mother_id: mother.id,
            baby_id: baby.id,
        }
    }

    fn checkup(checkup_type: CheckupType, patient_id: Option<String>, baby_id: Option<String>) -> PostnatalCheckupRequest {
        PostnatalCheckupRequest {
            checkup_type,
            patient_id,
            baby_id,
            checkup_date: datetime("2024-06-05T10:30"),
            temperature: Some(37.1),
            heart_rate: Some(78),
            blood_pressure_systolic: Some(118),
            blood_pressure_diastolic: Some(76),
            respiratory_rate: None,
            weight: None,
            symptoms: None,
            physical_exam: None,
            recommendations: None,
            medications: None,
            notes: None,
            next_checkup_date: None,
        }
    }

    #[tokio::test]
    async fn test_babies_carry_mother_name() {
        let fx = setup().await;

        let babies = fx.service.list_babies(&fx.midwife).await.unwrap();
        assert_eq!(babies.len(), 1);
        assert_eq!(babies[0].mother_name.as_deref(), Some("Martin Claire"));
        assert_eq!(babies[0].birth_date, "2024-06-02");

        assert!(fx.service.list_babies(&MidwifeId::new("m2")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_checkup_with_next_date_creates_reminder() {
        let fx = setup().await;
        let mut request = checkup(CheckupType::Mother, Some(fx.mother_id.clone()), None);
        request.next_checkup_date = NaiveDate::from_ymd_opt(2024, 6, 12);

        let stored = fx.service.record_checkup(&fx.midwife, request).await.unwrap();
        assert_eq!(stored.checkup_date, "2024-06-05T10:30");
        assert!(stored.reminder_id.is_some());

        let reminders = fx.service.pending_reminders(&fx.midwife).await.unwrap();
        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0].reminder_date, "2024-06-12");
        assert_eq!(reminders[0].reminder_type, "mother");
        assert_eq!(reminders[0].patient_id.as_deref(), Some(fx.mother_id.as_str()));
        assert_eq!(reminders[0].priority, "normal");
    }

    #[tokio::test]
    async fn test_checkup_without_next_date_creates_no_reminder() {
        let fx = setup().await;
        let request = checkup(CheckupType::Baby, None, Some(fx.baby_id.clone()));

        let stored = fx.service.record_checkup(&fx.midwife, request).await.unwrap();
        assert!(stored.reminder_id.is_none());
        assert!(fx.service.pending_reminders(&fx.midwife).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_checkup_for_foreign_baby_is_not_found() {
        let fx = setup().await;
        let request = checkup(CheckupType::Baby, None, Some(fx.baby_id.clone()));

        let result = fx.service.record_checkup(&MidwifeId::new("m2"), request).await;
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_mother_checkup_requires_patient() {
        let fx = setup().await;
        let request = checkup(CheckupType::Mother, None, Some(fx.baby_id.clone()));

        let result = fx.service.record_checkup(&fx.midwife, request).await;
        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn test_breastfeeding_checks_both_owners() {
        let fx = setup().await;
        let request = BreastfeedingRequest {
            baby_id: fx.baby_id.clone(),
            mother_id: "unknown".to_string(),
            feeding_date: datetime("2024-06-05T08:00"),
            feeding_type: "exclusive".to_string(),
            duration: Some(20),
            issues: None,
            notes: None,
        };

        let result = fx.service.record_breastfeeding(&fx.midwife, request.clone()).await;
        assert!(matches!(result, Err(ServiceError::NotFound(msg)) if msg.contains("Patient")));

        let request = BreastfeedingRequest { mother_id: fx.mother_id.clone(), ..request };
        let stored = fx.service.record_breastfeeding(&fx.midwife, request).await.unwrap();
        assert_eq!(stored.duration, Some(20));
    }

    #[tokio::test]
    async fn test_vaccination_for_unknown_baby_is_not_found() {
        let fx = setup().await;
        let request = VaccinationRequest {
            baby_id: "missing".to_string(),
            vaccine_name: "Hepatitis B".to_string(),
            date_administered: datetime("2024-06-03T09:15"),
            dose: Some("1".to_string()),
            route: None,
            site: None,
            lot_number: None,
            expiration_date: None,
            reaction: None,
            notes: None,
        };

        let result = fx.service.record_vaccination(&fx.midwife, request.clone()).await;
        assert!(matches!(result, Err(ServiceError::NotFound(_))));

        let request = VaccinationRequest { baby_id: fx.baby_id.clone(), ..request };
        let stored = fx.service.record_vaccination(&fx.midwife, request).await.unwrap();
        assert_eq!(stored.date_administered, "2024-06-03T09:15");
    }

    #[tokio::test]
    async fn test_deliveries_newest_first_with_patient_name() {
        let fx = setup().await;
        for date in ["2024-01-10T04:30", "2024-03-02T22:15"] {
            fx.service
                .record_delivery(
                    &fx.midwife,
                    RecordDeliveryRequest {
                        patient_id: fx.mother_id.clone(),
                        delivery_date: datetime(date),
                        delivery_type: "vaginal".to_string(),
                        delivery_location: None,
                        complications: None,
                    },
                )
                .await
                .unwrap();
        }

        let deliveries = fx.service.list_deliveries(&fx.midwife).await.unwrap();
        assert_eq!(deliveries[0].delivery_date, "2024-03-02T22:15");
        assert_eq!(deliveries[1].delivery_date, "2024-01-10T04:30");
        assert_eq!(deliveries[0].patient_name.as_deref(), Some("Martin Claire"));
    }
}
