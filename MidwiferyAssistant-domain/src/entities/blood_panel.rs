use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// Blood panel values. Hemoglobin and platelets are always measured; the
/// other items are optional.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct BloodPanelInput {
    /// Hemoglobin in g/dL
    pub hemoglobin: f64,
    /// Platelets per µL
    pub platelets: i64,
    /// Ferritin in ng/mL
    pub ferritin: Option<f64>,
    /// Hematocrit in %
    pub hematocrit: Option<f64>,
    /// Lactate dehydrogenase in U/L
    pub ldh: Option<f64>,
    /// Alanine aminotransferase in U/L
    pub alt: Option<f64>,
    /// Aspartate aminotransferase in U/L
    pub ast: Option<f64>,
}

/// A panel item that can be flagged
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub enum PanelItem {
    Hemoglobin,
    Platelets,
    Ferritin,
    Hematocrit,
    Ldh,
    Alt,
    Ast,
}

impl fmt::Display for PanelItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PanelItem::Hemoglobin => "hemoglobin",
            PanelItem::Platelets => "platelets",
            PanelItem::Ferritin => "ferritin",
            PanelItem::Hematocrit => "hematocrit",
            PanelItem::Ldh => "LDH",
            PanelItem::Alt => "ALT",
            PanelItem::Ast => "AST",
        };
        f.write_str(label)
    }
}

/// Interpretation of a single value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub enum PanelFlag {
    Normal,
    Low,
    High,
    Critical,
}

impl PanelFlag {
    /// Severity rank: `Critical` > `Low`/`High` > `Normal`
    pub fn severity(self) -> u8 {
        match self {
            PanelFlag::Normal => 0,
            PanelFlag::Low | PanelFlag::High => 1,
            PanelFlag::Critical => 2,
        }
    }
}

/// Result of a blood panel interpretation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct BloodPanelResult {
    /// One flag per provided item
    pub flags: BTreeMap<PanelItem, PanelFlag>,
    /// Most severe flag of the panel
    pub overall: PanelFlag,
    pub summary: String,
    /// Clinical interpretations, most specific first
    pub findings: Vec<String>,
}

/// Request to interpret a panel and, when a patient is given, store it
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AnalyzeBloodPanelRequest {
    pub patient_id: Option<String>,

    #[validate(length(max = 1000, message = "Notes cannot exceed 1000 characters"))]
    pub notes: Option<String>,

    pub panel: BloodPanelInput,
}

/// A stored blood panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct BloodPanelRecord {
    pub id: String,
    pub patient_id: String,
    pub panel: BloodPanelInput,
    pub notes: Option<String>,
    pub recorded_at: String,
}
