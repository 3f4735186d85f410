use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// A blood pressure measurement to classify
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloodPressureInput {
    /// Systolic pressure in mmHg
    pub systolic: i32,

    /// Diastolic pressure in mmHg
    pub diastolic: i32,
}

/// Blood pressure category, ordered by severity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub enum BloodPressureCategory {
    /// Systolic < 120 and diastolic < 80
    Normal,

    /// Systolic 120-129 and diastolic < 80
    Elevated,

    /// Systolic 130-139 or diastolic 80-89
    Hypertension1,

    /// Systolic 140-180 or diastolic 90-120
    Hypertension2,

    /// Systolic > 180 or diastolic > 120
    HypertensiveCrisis,
}

impl fmt::Display for BloodPressureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BloodPressureCategory::Normal => "Normal",
            BloodPressureCategory::Elevated => "Elevated",
            BloodPressureCategory::Hypertension1 => "Hypertension Stage 1",
            BloodPressureCategory::Hypertension2 => "Hypertension Stage 2",
            BloodPressureCategory::HypertensiveCrisis => "Hypertensive Crisis",
        };
        f.write_str(label)
    }
}

/// Classification of a measurement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct BloodPressureResult {
    pub status: BloodPressureCategory,
    pub message: String,
}

/// Request to classify a measurement and, when a patient is given, record it
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecordBloodPressureRequest {
    /// Patient the measurement belongs to
    pub patient_id: Option<String>,

    #[validate(range(max = 400, message = "Systolic cannot exceed 400"))]
    pub systolic: i32,

    #[validate(range(max = 300, message = "Diastolic cannot exceed 300"))]
    pub diastolic: i32,

    #[validate(range(min = 20, max = 250, message = "Heart rate must be between 20 and 250"))]
    pub heart_rate: Option<i32>,

    #[validate(length(max = 1000, message = "Notes cannot exceed 1000 characters"))]
    pub notes: Option<String>,
}

/// A stored blood pressure measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct BloodPressureReading {
    pub id: String,
    pub patient_id: String,
    pub systolic: i32,
    pub diastolic: i32,
    pub heart_rate: Option<i32>,
    pub notes: Option<String>,
    pub recorded_at: String,
    /// Category of the stored values
    pub status: BloodPressureCategory,
}

/// Dashboard counters for a midwife
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct DashboardSummary {
    pub patient_count: usize,
    pub recent_blood_pressure: Vec<BloodPressureReading>,
}
