use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::models::{
    BabyRecord, BiomedicalRecord, BloodPressureRecord, BreastfeedingRecord, CareReminderRecord,
    DeliveryRecord, PatientRecord, PostnatalCheckupRecord, VaccinationRecord,
};
use super::errors::RepositoryError;

/// Tables held by the in-memory store, keyed by record id
#[derive(Debug, Default)]
pub(crate) struct MemoryTables {
    pub patients: HashMap<String, PatientRecord>,
    pub blood_pressure: HashMap<String, BloodPressureRecord>,
    pub biomedical: HashMap<String, BiomedicalRecord>,
    pub deliveries: HashMap<String, DeliveryRecord>,
    pub babies: HashMap<String, BabyRecord>,
    pub checkups: HashMap<String, PostnatalCheckupRecord>,
    pub vaccinations: HashMap<String, VaccinationRecord>,
    pub breastfeeding: HashMap<String, BreastfeedingRecord>,
    pub reminders: HashMap<String, CareReminderRecord>,
}

/// In-memory storage used when no database pool is available.
///
/// Clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    tables: Arc<Mutex<MemoryTables>>,
}

impl InMemoryStorage {
    /// Create a new, empty in-memory storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` with exclusive access to the tables
    pub(crate) fn with_tables<R>(
        &self,
        f: impl FnOnce(&mut MemoryTables) -> R,
    ) -> Result<R, RepositoryError> {
        let mut tables = self.tables.lock()?;
        Ok(f(&mut tables))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_tables() {
        let storage = InMemoryStorage::new();
        let clone = storage.clone();

        storage
            .with_tables(|tables| {
                tables.reminders.insert(
                    "r1".to_string(),
                    CareReminderRecord {
                        id: "r1".to_string(),
                        midwife_id: "m1".to_string(),
                        title: "Visit".to_string(),
                        description: None,
                        reminder_date: "2024-05-01".to_string(),
                        reminder_type: "mother".to_string(),
                        priority: "normal".to_string(),
                        patient_id: None,
                        baby_id: None,
                        completed: false,
                    },
                );
            })
            .unwrap();

        let count = clone.with_tables(|tables| tables.reminders.len()).unwrap();
        assert_eq!(count, 1);
    }
}
