use serde::{Deserialize, Serialize};

/// Storage model for a blood pressure measurement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BloodPressureRecord {
    /// Unique identifier for the measurement
    pub id: String,

    /// Patient the measurement belongs to
    pub patient_id: String,

    /// Midwife who took the measurement
    pub midwife_id: String,

    /// Systolic pressure in mmHg
    pub systolic: i32,

    /// Diastolic pressure in mmHg
    pub diastolic: i32,

    /// Optional heart rate in beats per minute
    pub heart_rate: Option<i32>,

    pub notes: Option<String>,

    /// When the measurement was recorded (RFC 3339)
    pub recorded_at: String,
}

/// Storage model for a blood panel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BiomedicalRecord {
    pub id: String,

    pub patient_id: String,

    pub midwife_id: String,

    /// Hemoglobin in g/dL
    pub hemoglobin: f64,

    /// Platelet count per µL
    pub platelets: i64,

    pub ferritin: Option<f64>,

    pub hematocrit: Option<f64>,

    pub ldh: Option<f64>,

    pub alt: Option<f64>,

    pub ast: Option<f64>,

    pub notes: Option<String>,

    /// When the panel was recorded (RFC 3339)
    pub recorded_at: String,
}
