pub mod calculator;
pub mod clinical;
pub mod errors;
pub mod patient;
pub mod postnatal;

// Domain services
// This module contains business logic implementations.

// Re-export service traits and factory functions
pub use clinical::{create_clinical_service, ClinicalServiceTrait};
pub use errors::{ClinicalError, ServiceError};
pub use patient::{create_patient_service, PatientServiceTrait};
pub use postnatal::{create_postnatal_service, PostnatalServiceTrait};
