// Storage models
pub mod patient;
pub mod clinical;
pub mod postnatal;

pub use patient::PatientRecord;
pub use clinical::{BiomedicalRecord, BloodPressureRecord};
pub use postnatal::{
    BabyRecord, BreastfeedingRecord, CareReminderRecord, DeliveryRecord, PostnatalCheckupRecord,
    VaccinationRecord,
};
