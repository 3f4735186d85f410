use async_trait::async_trait;
use rusqlite::{params, Row};
use tracing::debug;

use crate::models::{BiomedicalRecord, BloodPressureRecord};
use super::errors::RepositoryError;
use super::storage::StorageBackend;

/// Repository trait for blood pressure and blood panel records
#[async_trait]
pub trait ClinicalRecordRepositoryTrait {
    /// Store a blood pressure measurement
    async fn create_blood_pressure(&self, record: BloodPressureRecord) -> Result<BloodPressureRecord, RepositoryError>;

    /// Most recent measurements taken by the midwife, newest first
    async fn recent_blood_pressure(&self, midwife_id: &str, limit: usize) -> Result<Vec<BloodPressureRecord>, RepositoryError>;

    /// Store a blood panel
    async fn create_biomedical(&self, record: BiomedicalRecord) -> Result<BiomedicalRecord, RepositoryError>;

    /// Blood panels for a patient, newest first
    async fn list_biomedical(&self, patient_id: &str) -> Result<Vec<BiomedicalRecord>, RepositoryError>;
}

/// Repository for clinical measurements
#[derive(Debug, Clone, Default)]
pub struct ClinicalRecordRepository {
    backend: StorageBackend,
}

impl ClinicalRecordRepository {
    /// Create a repository on top of the given backend
    pub fn new(backend: StorageBackend) -> Self {
        Self { backend }
    }
}

fn blood_pressure_from_row(row: &Row<'_>) -> rusqlite::Result<BloodPressureRecord> {
    Ok(BloodPressureRecord {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        midwife_id: row.get(2)?,
        systolic: row.get(3)?,
        diastolic: row.get(4)?,
        heart_rate: row.get(5)?,
        notes: row.get(6)?,
        recorded_at: row.get(7)?,
    })
}

fn biomedical_from_row(row: &Row<'_>) -> rusqlite::Result<BiomedicalRecord> {
    Ok(BiomedicalRecord {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        midwife_id: row.get(2)?,
        hemoglobin: row.get(3)?,
        platelets: row.get(4)?,
        ferritin: row.get(5)?,
        hematocrit: row.get(6)?,
        ldh: row.get(7)?,
        alt: row.get(8)?,
        ast: row.get(9)?,
        notes: row.get(10)?,
        recorded_at: row.get(11)?,
    })
}

#[async_trait]
impl ClinicalRecordRepositoryTrait for ClinicalRecordRepository {
    async fn create_blood_pressure(&self, record: BloodPressureRecord) -> Result<BloodPressureRecord, RepositoryError> {
        debug!("Storing blood pressure record: id={}", record.id);

        match &self.backend {
            StorageBackend::Database(pool) => {
                let conn = pool.get()?;
                conn.execute(
                    "INSERT INTO blood_pressure_records
                     (id, patient_id, midwife_id, systolic, diastolic, heart_rate, notes, recorded_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                    params![
                        record.id,
                        record.patient_id,
                        record.midwife_id,
                        record.systolic,
                        record.diastolic,
                        record.heart_rate,
                        record.notes,
                        record.recorded_at,
                    ],
                )?;
                Ok(record)
            }
            StorageBackend::Memory(storage) => storage.with_tables(|tables| {
                tables.blood_pressure.insert(record.id.clone(), record.clone());
                record
            }),
        }
    }

    async fn recent_blood_pressure(&self, midwife_id: &str, limit: usize) -> Result<Vec<BloodPressureRecord>, RepositoryError> {
        match &self.backend {
            StorageBackend::Database(pool) => {
                let conn = pool.get()?;
                let mut stmt = conn.prepare(
                    "SELECT id, patient_id, midwife_id, systolic, diastolic, heart_rate, notes, recorded_at
                     FROM blood_pressure_records
                     WHERE midwife_id = ?1
                     ORDER BY recorded_at DESC
                     LIMIT ?2",
                )?;
                let records = stmt
                    .query_map(params![midwife_id, limit as i64], blood_pressure_from_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(records)
            }
            StorageBackend::Memory(storage) => storage.with_tables(|tables| {
                let mut records: Vec<BloodPressureRecord> = tables
                    .blood_pressure
                    .values()
                    .filter(|r| r.midwife_id == midwife_id)
                    .cloned()
                    .collect();
                records.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
                records.truncate(limit);
                records
            }),
        }
    }

    async fn create_biomedical(&self, record: BiomedicalRecord) -> Result<BiomedicalRecord, RepositoryError> {
        debug!("Storing biomedical record: id={}", record.id);

        match &self.backend {
            StorageBackend::Database(pool) => {
                let conn = pool.get()?;
                conn.execute(
                    "INSERT INTO biomedical_records
                     (id, patient_id, midwife_id, hemoglobin, platelets, ferritin, hematocrit, ldh, alt, ast, notes, recorded_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                    params![
                        record.id,
                        record.patient_id,
                        record.midwife_id,
                        record.hemoglobin,
                        record.platelets,
                        record.ferritin,
                        record.hematocrit,
                        record.ldh,
                        record.alt,
                        record.ast,
                        record.notes,
                        record.recorded_at,
                    ],
                )?;
                Ok(record)
            }
            StorageBackend::Memory(storage) => storage.with_tables(|tables| {
                tables.biomedical.insert(record.id.clone(), record.clone());
                record
            }),
        }
    }

    async fn list_biomedical(&self, patient_id: &str) -> Result<Vec<BiomedicalRecord>, RepositoryError> {
        match &self.backend {
            StorageBackend::Database(pool) => {
                let conn = pool.get()?;
                let mut stmt = conn.prepare(
                    "SELECT id, patient_id, midwife_id, hemoglobin, platelets, ferritin, hematocrit, ldh, alt, ast, notes, recorded_at
                     FROM biomedical_records
                     WHERE patient_id = ?1
                     ORDER BY recorded_at DESC",
                )?;
                let records = stmt
                    .query_map(params![patient_id], biomedical_from_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(records)
            }
            StorageBackend::Memory(storage) => storage.with_tables(|tables| {
                let mut records: Vec<BiomedicalRecord> = tables
                    .biomedical
                    .values()
                    .filter(|r| r.patient_id == patient_id)
                    .cloned()
                    .collect();
                records.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
                records
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::create_in_memory_pool;
    use crate::repository::test_support::{backends, seed_patients};

    fn reading(id: &str, midwife_id: &str, recorded_at: &str) -> BloodPressureRecord {
        BloodPressureRecord {
            id: id.to_string(),
            patient_id: "p1".to_string(),
            midwife_id: midwife_id.to_string(),
            systolic: 118,
            diastolic: 76,
            heart_rate: Some(80),
            notes: None,
            recorded_at: recorded_at.to_string(),
        }
    }

    #[tokio::test]
    async fn test_recent_blood_pressure_is_newest_first_and_limited() {
        for backend in backends() {
            seed_patients(&backend, &[("p1", "m1")]).await;
            let repo = ClinicalRecordRepository::new(backend);
            repo.create_blood_pressure(reading("a", "m1", "2024-03-01T08:00:00+00:00")).await.unwrap();
            repo.create_blood_pressure(reading("b", "m1", "2024-03-03T08:00:00+00:00")).await.unwrap();
            repo.create_blood_pressure(reading("c", "m1", "2024-03-02T08:00:00+00:00")).await.unwrap();
            repo.create_blood_pressure(reading("d", "m2", "2024-03-04T08:00:00+00:00")).await.unwrap();

            let recent = repo.recent_blood_pressure("m1", 2).await.unwrap();
            let ids: Vec<&str> = recent.iter().map(|r| r.id.as_str()).collect();
            assert_eq!(ids, vec!["b", "c"]);
        }
    }

    #[tokio::test]
    async fn test_biomedical_records_by_patient() {
        for backend in backends() {
            seed_patients(&backend, &[("p1", "m1")]).await;
            let repo = ClinicalRecordRepository::new(backend);
            let record = BiomedicalRecord {
                id: "bio1".to_string(),
                patient_id: "p1".to_string(),
                midwife_id: "m1".to_string(),
                hemoglobin: 10.2,
                platelets: 180_000,
                ferritin: Some(12.0),
                hematocrit: None,
                ldh: None,
                alt: None,
                ast: None,
                notes: Some("Fasting".to_string()),
                recorded_at: "2024-03-01T08:00:00+00:00".to_string(),
            };
            repo.create_biomedical(record.clone()).await.unwrap();

            assert_eq!(repo.list_biomedical("p1").await.unwrap(), vec![record]);
            assert!(repo.list_biomedical("p2").await.unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_database_rejects_reading_for_unknown_patient() {
        let repo = ClinicalRecordRepository::new(StorageBackend::Database(create_in_memory_pool().unwrap()));

        let result = repo.create_blood_pressure(reading("a", "m1", "2024-03-01T08:00:00+00:00")).await;

        assert!(matches!(result, Err(RepositoryError::Sqlite(_))));
        assert!(repo.recent_blood_pressure("m1", 5).await.unwrap().is_empty());
    }
}
