//! Clinical calculations: gestational age, blood pressure triage and blood
//! panel interpretation.
//!
//! Every function here is pure. Thresholds live in static range tables and
//! are illustrative defaults, not medically validated values.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use chrono::{Duration, NaiveDate};

use crate::entities::blood_panel::{BloodPanelInput, BloodPanelResult, PanelFlag, PanelItem};
use crate::entities::blood_pressure::{BloodPressureCategory, BloodPressureInput, BloodPressureResult};
use crate::entities::gestational_age::{GestationalAgeInput, GestationalAgeResult};
use crate::services::errors::ClinicalError;

/// Cycle length the obstetric dating rules are expressed for
const REFERENCE_CYCLE_LENGTH: i64 = 28;

/// Days from the last period to term for a reference cycle
const TERM_DAYS: i64 = 280;

/// Ordered lower-bound table: a value maps to the last band whose lower
/// bound it reaches, or to `below` when it reaches none.
struct RangeTable<T: 'static, V: 'static> {
    below: V,
    bands: &'static [(T, V)],
}

impl<T: PartialOrd + Copy, V: Copy> RangeTable<T, V> {
    fn lookup(&self, value: T) -> V {
        self.bands
            .iter()
            .rev()
            .find(|(lower, _)| value >= *lower)
            .map_or(self.below, |(_, flag)| *flag)
    }
}

// ---------------------------------------------------------------------------
// Gestational age
// ---------------------------------------------------------------------------

static RECOMMENDATIONS: &[(RangeInclusive<u32>, &[&str])] = &[
    (
        0..=12,
        &[
            "First trimester: schedule the dating ultrasound (11-13 weeks).",
            "Offer first-trimester combined screening for chromosomal anomalies.",
            "Start or continue folic acid supplementation.",
            "Order blood group, rubella, toxoplasmosis and syphilis serologies.",
        ],
    ),
    (
        13..=27,
        &[
            "Second trimester: schedule the morphology ultrasound (20-24 weeks).",
            "Screen for gestational diabetes (OGTT between 24 and 28 weeks).",
            "Check blood pressure and urine protein at each visit.",
            "Discuss childbirth preparation sessions.",
        ],
    ),
    (
        28..=40,
        &[
            "Third trimester: schedule the growth ultrasound (30-34 weeks).",
            "Offer anti-D prophylaxis if the patient is Rh negative.",
            "Perform group B streptococcus screening (35-37 weeks).",
            "Review the birth plan and signs of labour.",
        ],
    ),
    (
        41..=42,
        &[
            "Post-term: arrange fetal monitoring every 2 days.",
            "Check amniotic fluid volume by ultrasound.",
            "Discuss induction of labour with the obstetric team.",
        ],
    ),
];

static DEFAULT_RECOMMENDATIONS: &[&str] = &[
    "Term outside the usual follow-up range: consult a specialist.",
    "Verify the last menstrual period date and cycle length.",
];

/// Care recommendations for the given number of completed weeks.
///
/// Never empty: weeks outside every band get the default set.
pub fn gestational_age_recommendations(weeks: u32) -> Vec<String> {
    RECOMMENDATIONS
        .iter()
        .find(|(range, _)| range.contains(&weeks))
        .map_or(DEFAULT_RECOMMENDATIONS, |(_, items)| *items)
        .iter()
        .map(|item| item.to_string())
        .collect()
}

fn cycle_adjustment(cycle_length: i32) -> Result<i64, ClinicalError> {
    if cycle_length <= 0 {
        return Err(ClinicalError::InvalidInput(format!(
            "Cycle length must be positive, got {}",
            cycle_length
        )));
    }
    Ok(i64::from(cycle_length) - REFERENCE_CYCLE_LENGTH)
}

/// Due date: last period + 280 days + (cycle length - 28) days
pub fn calculate_due_date(input: &GestationalAgeInput) -> Result<NaiveDate, ClinicalError> {
    let adjustment = cycle_adjustment(input.cycle_length)?;

    input
        .last_period_date
        .checked_add_signed(Duration::days(TERM_DAYS + adjustment))
        .ok_or_else(|| ClinicalError::InvalidInput("Due date is out of the supported date range".to_string()))
}

/// Gestational age at `reference_date`, normalized to a 28-day cycle.
pub fn calculate_gestational_age(
    input: &GestationalAgeInput,
    reference_date: NaiveDate,
) -> Result<GestationalAgeResult, ClinicalError> {
    let adjustment = cycle_adjustment(input.cycle_length)?;

    if input.last_period_date > reference_date {
        return Err(ClinicalError::InvalidInput(format!(
            "Last menstrual period {} is after the reference date {}",
            input.last_period_date, reference_date
        )));
    }

    let elapsed = (reference_date - input.last_period_date).num_days();
    let normalized = elapsed - adjustment;
    if normalized < 0 {
        return Err(ClinicalError::InvalidInput(format!(
            "Last menstrual period is too recent for a {}-day cycle",
            input.cycle_length
        )));
    }

    let weeks = u32::try_from(normalized / 7)
        .map_err(|_| ClinicalError::InvalidInput("Elapsed time is out of range".to_string()))?;
    let days = (normalized % 7) as u32;
    let due_date = calculate_due_date(input)?;

    Ok(GestationalAgeResult {
        weeks,
        days,
        due_date,
        recommendations: gestational_age_recommendations(weeks),
    })
}

// ---------------------------------------------------------------------------
// Blood pressure
// ---------------------------------------------------------------------------

static SYSTOLIC_BANDS: RangeTable<i32, BloodPressureCategory> = RangeTable {
    below: BloodPressureCategory::Normal,
    bands: &[
        (120, BloodPressureCategory::Elevated),
        (130, BloodPressureCategory::Hypertension1),
        (140, BloodPressureCategory::Hypertension2),
        (181, BloodPressureCategory::HypertensiveCrisis),
    ],
};

// Diastolic alone never yields Elevated
static DIASTOLIC_BANDS: RangeTable<i32, BloodPressureCategory> = RangeTable {
    below: BloodPressureCategory::Normal,
    bands: &[
        (80, BloodPressureCategory::Hypertension1),
        (90, BloodPressureCategory::Hypertension2),
        (121, BloodPressureCategory::HypertensiveCrisis),
    ],
};

fn blood_pressure_message(category: BloodPressureCategory) -> &'static str {
    match category {
        BloodPressureCategory::Normal => "Blood pressure is normal.",
        BloodPressureCategory::Elevated => "Blood pressure is elevated. Recheck at the next visit.",
        BloodPressureCategory::Hypertension1 => {
            "Stage 1 hypertension. Monitor closely and screen for preeclampsia (proteinuria, symptoms)."
        }
        BloodPressureCategory::Hypertension2 => {
            "Stage 2 hypertension. Medical consultation required and preeclampsia screening."
        }
        BloodPressureCategory::HypertensiveCrisis => {
            "Hypertensive crisis. Immediate medical care required: refer to emergency services."
        }
    }
}

/// Category of a measurement; the more severe axis wins.
pub fn classify_blood_pressure(systolic: i32, diastolic: i32) -> BloodPressureCategory {
    SYSTOLIC_BANDS.lookup(systolic).max(DIASTOLIC_BANDS.lookup(diastolic))
}

/// Classify a measurement and attach the matching care message.
pub fn evaluate_blood_pressure(input: &BloodPressureInput) -> Result<BloodPressureResult, ClinicalError> {
    if input.systolic <= 0 || input.diastolic <= 0 {
        return Err(ClinicalError::InvalidInput(format!(
            "Blood pressure values must be positive, got {}/{}",
            input.systolic, input.diastolic
        )));
    }
    if input.systolic < input.diastolic {
        return Err(ClinicalError::InvalidInput(format!(
            "Systolic pressure {} is below diastolic pressure {}",
            input.systolic, input.diastolic
        )));
    }

    let status = classify_blood_pressure(input.systolic, input.diastolic);

    Ok(BloodPressureResult {
        status,
        message: blood_pressure_message(status).to_string(),
    })
}

// ---------------------------------------------------------------------------
// Blood panel
// ---------------------------------------------------------------------------

static HEMOGLOBIN_BANDS: RangeTable<f64, PanelFlag> = RangeTable {
    below: PanelFlag::Critical,
    bands: &[(7.0, PanelFlag::Low), (11.0, PanelFlag::Normal), (16.5, PanelFlag::High)],
};

static PLATELET_BANDS: RangeTable<i64, PanelFlag> = RangeTable {
    below: PanelFlag::Critical,
    bands: &[(50_000, PanelFlag::Low), (150_000, PanelFlag::Normal), (450_000, PanelFlag::High)],
};

static FERRITIN_BANDS: RangeTable<f64, PanelFlag> = RangeTable {
    below: PanelFlag::Low,
    bands: &[(30.0, PanelFlag::Normal), (200.0, PanelFlag::High)],
};

static HEMATOCRIT_BANDS: RangeTable<f64, PanelFlag> = RangeTable {
    below: PanelFlag::Critical,
    bands: &[(25.0, PanelFlag::Low), (33.0, PanelFlag::Normal), (45.0, PanelFlag::High)],
};

static LDH_BANDS: RangeTable<f64, PanelFlag> = RangeTable {
    below: PanelFlag::Normal,
    bands: &[(250.0, PanelFlag::High), (600.0, PanelFlag::Critical)],
};

static TRANSAMINASE_BANDS: RangeTable<f64, PanelFlag> = RangeTable {
    below: PanelFlag::Normal,
    bands: &[(35.0, PanelFlag::High), (70.0, PanelFlag::Critical)],
};

const HELLP_PLATELET_LIMIT: i64 = 100_000;
const HELLP_LDH_LIMIT: f64 = 600.0;
const HELLP_TRANSAMINASE_LIMIT: f64 = 70.0;

fn check_panel_value(item: PanelItem, value: f64) -> Result<(), ClinicalError> {
    if !value.is_finite() {
        return Err(ClinicalError::InvalidInput(format!("{} must be a finite number", item)));
    }
    if value < 0.0 {
        return Err(ClinicalError::InvalidInput(format!(
            "{} cannot be negative, got {}",
            item, value
        )));
    }
    Ok(())
}

fn panel_summary(overall: PanelFlag, flags: &BTreeMap<PanelItem, PanelFlag>) -> &'static str {
    let has = |wanted: PanelFlag| flags.values().any(|flag| *flag == wanted);

    match overall {
        PanelFlag::Low | PanelFlag::High if has(PanelFlag::Low) && has(PanelFlag::High) => {
            "Some values are below and some above reference ranges. Follow-up recommended."
        }
        PanelFlag::Normal => "All analysed values are within reference ranges.",
        PanelFlag::Low => "Some values are below reference ranges. Follow-up recommended.",
        PanelFlag::High => "Some values are above reference ranges. Follow-up recommended.",
        PanelFlag::Critical => "Critical values detected. Immediate medical review required.",
    }
}

fn panel_findings(input: &BloodPanelInput, flags: &BTreeMap<PanelItem, PanelFlag>) -> Vec<String> {
    let mut findings = Vec::new();
    let flag = |item: PanelItem| flags.get(&item).copied();

    let ldh_hemolytic = input.ldh.map_or(false, |ldh| ldh >= HELLP_LDH_LIMIT);
    let transaminases_critical = input.alt.map_or(false, |v| v >= HELLP_TRANSAMINASE_LIMIT)
        || input.ast.map_or(false, |v| v >= HELLP_TRANSAMINASE_LIMIT);
    if input.platelets < HELLP_PLATELET_LIMIT && ldh_hemolytic && transaminases_critical {
        findings.push(
            "HELLP syndrome suspected (hemolysis, elevated liver enzymes, low platelets): immediate obstetric evaluation."
                .to_string(),
        );
    }

    match flag(PanelItem::Hemoglobin) {
        Some(PanelFlag::Critical) => findings.push("Severe anemia: urgent medical review.".to_string()),
        Some(PanelFlag::Low) => findings.push("Anemia: discuss iron supplementation.".to_string()),
        _ => {}
    }

    if flag(PanelItem::Ferritin) == Some(PanelFlag::Low) {
        findings.push("Depleted iron stores suggesting iron deficiency.".to_string());
    }

    match flag(PanelItem::Platelets) {
        Some(PanelFlag::Critical) => {
            findings.push("Severe thrombocytopenia: bleeding risk, urgent review.".to_string())
        }
        Some(PanelFlag::Low) => findings.push("Thrombocytopenia: monitor the platelet count.".to_string()),
        Some(PanelFlag::High) => findings.push("Thrombocytosis.".to_string()),
        _ => {}
    }

    if matches!(flag(PanelItem::Ldh), Some(PanelFlag::High | PanelFlag::Critical)) {
        findings.push("Elevated LDH: possible hemolysis.".to_string());
    }

    let liver_flags = [flag(PanelItem::Alt), flag(PanelItem::Ast)];
    if liver_flags
        .iter()
        .any(|f| matches!(f, Some(PanelFlag::High | PanelFlag::Critical)))
    {
        findings.push("Elevated liver enzymes: check liver function.".to_string());
    }

    findings
}

/// Flag each provided panel item and summarise the most severe one.
pub fn analyze_blood_panel(input: &BloodPanelInput) -> Result<BloodPanelResult, ClinicalError> {
    check_panel_value(PanelItem::Hemoglobin, input.hemoglobin)?;
    if input.platelets < 0 {
        return Err(ClinicalError::InvalidInput(format!(
            "platelets cannot be negative, got {}",
            input.platelets
        )));
    }

    let mut flags = BTreeMap::new();
    flags.insert(PanelItem::Hemoglobin, HEMOGLOBIN_BANDS.lookup(input.hemoglobin));
    flags.insert(PanelItem::Platelets, PLATELET_BANDS.lookup(input.platelets));

    let optional_items = [
        (PanelItem::Ferritin, input.ferritin, &FERRITIN_BANDS),
        (PanelItem::Hematocrit, input.hematocrit, &HEMATOCRIT_BANDS),
        (PanelItem::Ldh, input.ldh, &LDH_BANDS),
        (PanelItem::Alt, input.alt, &TRANSAMINASE_BANDS),
        (PanelItem::Ast, input.ast, &TRANSAMINASE_BANDS),
    ];
    for (item, value, table) in optional_items {
        if let Some(value) = value {
            check_panel_value(item, value)?;
            flags.insert(item, table.lookup(value));
        }
    }

    // Ties keep the first item in panel order
    let overall = flags
        .values()
        .copied()
        .fold(PanelFlag::Normal, |worst, flag| {
            if flag.severity() > worst.severity() {
                flag
            } else {
                worst
            }
        });

    let findings = panel_findings(input, &flags);
    let summary = panel_summary(overall, &flags).to_string();

    Ok(BloodPanelResult {
        flags,
        overall,
        summary,
        findings,
    })
}
