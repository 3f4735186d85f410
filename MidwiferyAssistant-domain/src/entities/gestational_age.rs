use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// Input for a gestational age calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestationalAgeInput {
    /// First day of the last menstrual period
    pub last_period_date: NaiveDate,

    /// Usual cycle length in days
    pub cycle_length: i32,
}

/// Gestational age at a reference date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct GestationalAgeResult {
    /// Completed weeks of amenorrhea
    pub weeks: u32,

    /// Remaining days, always below 7
    pub days: u32,

    /// Estimated due date
    pub due_date: NaiveDate,

    /// Care recommendations for the current term
    pub recommendations: Vec<String>,
}
