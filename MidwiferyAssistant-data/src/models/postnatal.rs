use serde::{Deserialize, Serialize};

/// Storage model for a delivery
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeliveryRecord {
    pub id: String,

    /// Mother (patient) who delivered
    pub patient_id: String,

    pub midwife_id: String,

    /// Date and time of delivery (YYYY-MM-DDTHH:MM)
    pub delivery_date: String,

    /// e.g. vaginal, caesarean
    pub delivery_type: String,

    pub delivery_location: Option<String>,

    pub complications: Option<String>,
}

/// Storage model for a newborn
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BabyRecord {
    pub id: String,

    /// Mother (patient) of the baby
    pub mother_id: String,

    pub midwife_id: String,

    pub first_name: String,

    pub last_name: String,

    /// Birth date (YYYY-MM-DD)
    pub birth_date: String,
}

/// Storage model for a postnatal checkup of a mother or a baby
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PostnatalCheckupRecord {
    pub id: String,

    pub midwife_id: String,

    /// "mother" or "baby"
    pub checkup_type: String,

    /// Set for mother checkups
    pub patient_id: Option<String>,

    /// Set for baby checkups
    pub baby_id: Option<String>,

    /// Date and time of the checkup (YYYY-MM-DDTHH:MM)
    pub checkup_date: String,

    pub temperature: Option<f64>,

    pub heart_rate: Option<i32>,

    pub blood_pressure_systolic: Option<i32>,

    pub blood_pressure_diastolic: Option<i32>,

    pub respiratory_rate: Option<i32>,

    pub weight: Option<f64>,

    pub symptoms: Option<String>,

    pub physical_exam: Option<String>,

    pub recommendations: Option<String>,

    pub medications: Option<String>,

    pub notes: Option<String>,

    /// Date of the next checkup (YYYY-MM-DD)
    pub next_checkup_date: Option<String>,
}

/// Storage model for a vaccine administered to a baby
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VaccinationRecord {
    pub id: String,

    pub baby_id: String,

    pub midwife_id: String,

    pub vaccine_name: String,

    /// Date and time of administration (YYYY-MM-DDTHH:MM)
    pub date_administered: String,

    pub dose: Option<String>,

    pub route: Option<String>,

    pub site: Option<String>,

    pub lot_number: Option<String>,

    /// Expiration date of the lot (YYYY-MM-DD)
    pub expiration_date: Option<String>,

    pub reaction: Option<String>,

    pub notes: Option<String>,
}

/// Storage model for a breastfeeding observation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BreastfeedingRecord {
    pub id: String,

    pub mother_id: String,

    pub baby_id: String,

    pub midwife_id: String,

    /// Date and time of the feeding (YYYY-MM-DDTHH:MM)
    pub feeding_date: String,

    pub feeding_type: String,

    /// Duration in minutes
    pub duration: Option<i32>,

    pub issues: Option<String>,

    pub notes: Option<String>,
}

/// Storage model for a postnatal care reminder
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CareReminderRecord {
    pub id: String,

    pub midwife_id: String,

    pub title: String,

    pub description: Option<String>,

    /// Date the reminder is due (YYYY-MM-DD)
    pub reminder_date: String,

    /// "mother" or "baby"
    pub reminder_type: String,

    /// e.g. normal, high
    pub priority: String,

    pub patient_id: Option<String>,

    pub baby_id: Option<String>,

    pub completed: bool,
}
