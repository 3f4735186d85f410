// Domain entities and value objects
pub mod blood_panel;
pub mod blood_pressure;
pub mod conversions;
pub mod gestational_age;
pub mod patient;
pub mod postnatal;

use std::fmt;

use serde::{Deserialize, Serialize};

// Re-export common types for easier imports
pub use blood_panel::{BloodPanelInput, BloodPanelRecord, BloodPanelResult, PanelFlag, PanelItem};
pub use blood_pressure::{
    BloodPressureCategory, BloodPressureInput, BloodPressureReading, BloodPressureResult,
    DashboardSummary,
};
pub use gestational_age::{GestationalAgeInput, GestationalAgeResult};
pub use patient::{CreatePatientRequest, Patient, PatientDetail};
pub use postnatal::{
    Baby, BreastfeedingObservation, CareReminder, CheckupType, Delivery, PostnatalCheckup,
    Vaccination,
};

/// Identity of the midwife acting on a request.
///
/// Every service call takes it explicitly; records are only ever visible to
/// the midwife that owns them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MidwifeId(String);

impl MidwifeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MidwifeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
