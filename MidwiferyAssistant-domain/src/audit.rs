use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::entities::MidwifeId;

/// Clinical actions that leave an audit trail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditAction {
    /// Patient created
    PatientCreated,
    /// Blood pressure measurement recorded
    BloodPressureRecorded,
    /// Blood panel recorded
    BiomedicalRecorded,
    /// Delivery recorded
    DeliveryRecorded,
    /// Newborn registered
    BabyRegistered,
    /// Postnatal checkup recorded
    PostnatalCheckupRecorded,
    /// Vaccination recorded
    VaccinationRecorded,
    /// Breastfeeding observation recorded
    BreastfeedingRecorded,
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuditAction::PatientCreated => write!(f, "PATIENT_CREATED"),
            AuditAction::BloodPressureRecorded => write!(f, "BLOOD_PRESSURE_RECORDED"),
            AuditAction::BiomedicalRecorded => write!(f, "BIOMEDICAL_RECORDED"),
            AuditAction::DeliveryRecorded => write!(f, "DELIVERY_RECORDED"),
            AuditAction::BabyRegistered => write!(f, "BABY_REGISTERED"),
            AuditAction::PostnatalCheckupRecorded => write!(f, "POSTNATAL_CHECKUP_RECORDED"),
            AuditAction::VaccinationRecorded => write!(f, "VACCINATION_RECORDED"),
            AuditAction::BreastfeedingRecorded => write!(f, "BREASTFEEDING_RECORDED"),
        }
    }
}

/// Audit event record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    /// What was done
    pub action: AuditAction,
    /// Midwife who did it
    pub midwife_id: String,
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    /// Record the action touched
    pub resource: Option<String>,
    /// Additional details about the event
    pub details: Option<String>,
}

impl AuditEvent {
    /// Create a new audit event
    pub fn new(action: AuditAction, midwife_id: &MidwifeId) -> Self {
        Self {
            action,
            midwife_id: midwife_id.to_string(),
            timestamp: Utc::now(),
            resource: None,
            details: None,
        }
    }

    /// Set the resource
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    /// Set the details
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Emit an audit event on the `audit` tracing target.
///
/// Events are not stored; subscribers decide where the trail goes.
pub fn log_audit_event(event: AuditEvent) {
    info!(
        target: "audit",
        action = %event.action,
        midwife_id = %event.midwife_id,
        resource = event.resource.as_deref().unwrap_or(""),
        timestamp = %event.timestamp.to_rfc3339(),
        "AUDIT [{}] [{}] {}",
        event.action,
        event.midwife_id,
        event.details.as_deref().unwrap_or("")
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_audit_event() {
        let midwife = MidwifeId::new("midwife-1");
        let event = AuditEvent::new(AuditAction::BloodPressureRecorded, &midwife)
            .with_resource("patient-42")
            .with_details("BP: 142/91");

        assert_eq!(event.action, AuditAction::BloodPressureRecorded);
        assert_eq!(event.midwife_id, "midwife-1");
        assert_eq!(event.resource.as_deref(), Some("patient-42"));
        assert_eq!(event.details.as_deref(), Some("BP: 142/91"));
    }

    #[test]
    fn test_action_display() {
        assert_eq!(AuditAction::PatientCreated.to_string(), "PATIENT_CREATED");
        assert_eq!(AuditAction::VaccinationRecorded.to_string(), "VACCINATION_RECORDED");
    }
}
