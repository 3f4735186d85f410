use chrono::{NaiveDate, NaiveDateTime};

use midwifery_assistant_data::models::{
    BabyRecord, BiomedicalRecord, BloodPressureRecord, BreastfeedingRecord, CareReminderRecord,
    DeliveryRecord, PatientRecord, PostnatalCheckupRecord, VaccinationRecord,
};

use crate::entities::blood_panel::{BloodPanelInput, BloodPanelRecord};
use crate::entities::blood_pressure::{BloodPressureCategory, BloodPressureReading};
use crate::entities::patient::Patient;
use crate::entities::postnatal::{
    Baby, BreastfeedingObservation, CareReminder, CheckupType, Delivery, PostnatalCheckup,
    Vaccination,
};

/// Conversion functions between domain entities and data models.
/// Names follow convert_to_[target_layer]_[model_name].

/// Storage format of calendar dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Storage format of clinical datetimes (minute precision)
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_datetime(datetime: NaiveDateTime) -> String {
    datetime.format(DATETIME_FORMAT).to_string()
}

/// Parse a stored `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| format!("Invalid date format (expected YYYY-MM-DD): {}", value))
}

/// Parse a `YYYY-MM-DDTHH:MM` datetime
pub fn parse_datetime(value: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value, DATETIME_FORMAT)
        .map_err(|_| format!("Invalid datetime format (expected YYYY-MM-DDTHH:MM): {}", value))
}

/// Stored dates that no longer parse are dropped rather than failing the read
fn parse_stored_date(value: Option<String>) -> Option<NaiveDate> {
    value.and_then(|v| parse_date(&v).ok())
}

/// Convert from data model to domain entity for a patient
pub fn convert_to_domain_patient(record: PatientRecord) -> Patient {
    Patient {
        id: record.id,
        first_name: record.first_name,
        last_name: record.last_name,
        date_of_birth: parse_stored_date(record.date_of_birth),
        last_period_date: parse_stored_date(record.last_period_date),
        cycle_length: record.cycle_length,
        notes: record.notes,
        created_at: record.created_at,
    }
}

/// Convert from data model to domain entity for a blood pressure reading.
///
/// The category is supplied by the caller since it comes from the calculator.
pub fn convert_to_domain_reading(
    record: BloodPressureRecord,
    status: BloodPressureCategory,
) -> BloodPressureReading {
    BloodPressureReading {
        id: record.id,
        patient_id: record.patient_id,
        systolic: record.systolic,
        diastolic: record.diastolic,
        heart_rate: record.heart_rate,
        notes: record.notes,
        recorded_at: record.recorded_at,
        status,
    }
}

/// Convert from data model to domain entity for a blood panel
pub fn convert_to_domain_blood_panel(record: BiomedicalRecord) -> BloodPanelRecord {
    BloodPanelRecord {
        id: record.id,
        patient_id: record.patient_id,
        panel: BloodPanelInput {
            hemoglobin: record.hemoglobin,
            platelets: record.platelets,
            ferritin: record.ferritin,
            hematocrit: record.hematocrit,
            ldh: record.ldh,
            alt: record.alt,
            ast: record.ast,
        },
        notes: record.notes,
        recorded_at: record.recorded_at,
    }
}

pub fn convert_to_domain_delivery(record: DeliveryRecord, patient_name: Option<String>) -> Delivery {
    Delivery {
        id: record.id,
        patient_id: record.patient_id,
        patient_name,
        delivery_date: record.delivery_date,
        delivery_type: record.delivery_type,
        delivery_location: record.delivery_location,
        complications: record.complications,
    }
}

pub fn convert_to_domain_baby(record: BabyRecord, mother_name: Option<String>) -> Baby {
    Baby {
        id: record.id,
        first_name: record.first_name,
        last_name: record.last_name,
        birth_date: record.birth_date,
        mother_id: record.mother_id,
        mother_name,
    }
}

pub fn convert_to_domain_checkup(
    record: PostnatalCheckupRecord,
    checkup_type: CheckupType,
    reminder_id: Option<String>,
) -> PostnatalCheckup {
    PostnatalCheckup {
        id: record.id,
        checkup_type,
        patient_id: record.patient_id,
        baby_id: record.baby_id,
        checkup_date: record.checkup_date,
        next_checkup_date: record.next_checkup_date,
        reminder_id,
    }
}

pub fn convert_to_domain_vaccination(record: VaccinationRecord) -> Vaccination {
    Vaccination {
        id: record.id,
        baby_id: record.baby_id,
        vaccine_name: record.vaccine_name,
        date_administered: record.date_administered,
    }
}

pub fn convert_to_domain_breastfeeding(record: BreastfeedingRecord) -> BreastfeedingObservation {
    BreastfeedingObservation {
        id: record.id,
        baby_id: record.baby_id,
        mother_id: record.mother_id,
        feeding_date: record.feeding_date,
        feeding_type: record.feeding_type,
        duration: record.duration,
    }
}

pub fn convert_to_domain_reminder(record: CareReminderRecord) -> CareReminder {
    CareReminder {
        id: record.id,
        title: record.title,
        description: record.description,
        reminder_date: record.reminder_date,
        reminder_type: record.reminder_type,
        priority: record.priority,
        patient_id: record.patient_id,
        baby_id: record.baby_id,
        completed: record.completed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_datetime_minute_precision() {
        let parsed = parse_datetime("2024-05-03T14:30").unwrap();
        assert_eq!(format_datetime(parsed), "2024-05-03T14:30");
        assert!(parse_datetime("2024-05-03 14:30").is_err());
    }

    #[test]
    fn test_patient_with_unparseable_date_keeps_other_fields() {
        let record = PatientRecord {
            id: "p1".to_string(),
            midwife_id: "m1".to_string(),
            first_name: "Claire".to_string(),
            last_name: "Martin".to_string(),
            date_of_birth: Some("14/02/1990".to_string()),
            last_period_date: Some("2024-01-01".to_string()),
            cycle_length: 30,
            notes: None,
            created_at: "2024-02-01T10:00:00+00:00".to_string(),
        };

        let patient = convert_to_domain_patient(record);
        assert_eq!(patient.date_of_birth, None);
        assert_eq!(patient.last_period_date, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(patient.cycle_length, 30);
    }
}
