use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use midwifery_assistant_domain::entities::GestationalAgeResult;

/// Request payload for the gestational age calculator
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GestationalAgeRequest {
    /// First day of the last menstrual period (YYYY-MM-DD)
    pub last_period: NaiveDate,

    /// Usual cycle length in days; the server default applies when omitted
    pub cycle_length: Option<i32>,

    /// Day the term is computed for; today when omitted
    pub reference_date: Option<NaiveDate>,
}

/// Gestational age and due date
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GestationalAgeResponse {
    /// Completed weeks of amenorrhea
    pub weeks: u32,

    /// Extra days, 0 to 6
    pub days: u32,

    pub due_date: NaiveDate,

    pub recommendations: Vec<String>,
}

impl From<GestationalAgeResult> for GestationalAgeResponse {
    fn from(result: GestationalAgeResult) -> Self {
        Self {
            weeks: result.weeks,
            days: result.days,
            due_date: result.due_date,
            recommendations: result.recommendations,
        }
    }
}
