use async_trait::async_trait;
use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

use crate::models::PatientRecord;
use super::errors::RepositoryError;
use super::storage::StorageBackend;

/// Repository trait for patients
#[async_trait]
pub trait PatientRepositoryTrait {
    /// Store a new patient
    async fn create(&self, record: PatientRecord) -> Result<PatientRecord, RepositoryError>;

    /// Get a patient owned by the given midwife
    async fn get_by_id(&self, midwife_id: &str, id: &str) -> Result<Option<PatientRecord>, RepositoryError>;

    /// List the midwife's patients ordered by last name, then first name
    async fn list(&self, midwife_id: &str) -> Result<Vec<PatientRecord>, RepositoryError>;

    /// Count the midwife's patients
    async fn count(&self, midwife_id: &str) -> Result<usize, RepositoryError>;
}

/// Repository for patients
#[derive(Debug, Clone, Default)]
pub struct PatientRepository {
    backend: StorageBackend,
}

impl PatientRepository {
    /// Create a repository on top of the given backend
    pub fn new(backend: StorageBackend) -> Self {
        Self { backend }
    }
}

const PATIENT_COLUMNS: &str =
    "id, midwife_id, first_name, last_name, date_of_birth, last_period_date, cycle_length, notes, created_at";

fn patient_from_row(row: &Row<'_>) -> rusqlite::Result<PatientRecord> {
    Ok(PatientRecord {
        id: row.get(0)?,
        midwife_id: row.get(1)?,
        first_name: row.get(2)?,
        last_name: row.get(3)?,
        date_of_birth: row.get(4)?,
        last_period_date: row.get(5)?,
        cycle_length: row.get(6)?,
        notes: row.get(7)?,
        created_at: row.get(8)?,
    })
}

fn sort_patients(patients: &mut [PatientRecord]) {
    patients.sort_by(|a, b| {
        a.last_name
            .cmp(&b.last_name)
            .then_with(|| a.first_name.cmp(&b.first_name))
    });
}

#[async_trait]
impl PatientRepositoryTrait for PatientRepository {
    async fn create(&self, record: PatientRecord) -> Result<PatientRecord, RepositoryError> {
        debug!("Storing patient: id={}", record.id);

        match &self.backend {
            StorageBackend::Database(pool) => {
                let conn = pool.get()?;
                conn.execute(
                    "INSERT INTO patients
                     (id, midwife_id, first_name, last_name, date_of_birth, last_period_date, cycle_length, notes, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                    params![
                        record.id,
                        record.midwife_id,
                        record.first_name,
                        record.last_name,
                        record.date_of_birth,
                        record.last_period_date,
                        record.cycle_length,
                        record.notes,
                        record.created_at,
                    ],
                )?;
                Ok(record)
            }
            StorageBackend::Memory(storage) => storage.with_tables(|tables| {
                tables.patients.insert(record.id.clone(), record.clone());
                record
            }),
        }
    }

    async fn get_by_id(&self, midwife_id: &str, id: &str) -> Result<Option<PatientRecord>, RepositoryError> {
        match &self.backend {
            StorageBackend::Database(pool) => {
                let conn = pool.get()?;
                let patient = conn
                    .query_row(
                        &format!("SELECT {} FROM patients WHERE id = ?1 AND midwife_id = ?2", PATIENT_COLUMNS),
                        params![id, midwife_id],
                        patient_from_row,
                    )
                    .optional()?;
                Ok(patient)
            }
            StorageBackend::Memory(storage) => storage.with_tables(|tables| {
                tables
                    .patients
                    .get(id)
                    .filter(|p| p.midwife_id == midwife_id)
                    .cloned()
            }),
        }
    }

    async fn list(&self, midwife_id: &str) -> Result<Vec<PatientRecord>, RepositoryError> {
        match &self.backend {
            StorageBackend::Database(pool) => {
                let conn = pool.get()?;
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM patients WHERE midwife_id = ?1 ORDER BY last_name, first_name",
                    PATIENT_COLUMNS
                ))?;
                let patients = stmt
                    .query_map(params![midwife_id], patient_from_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(patients)
            }
            StorageBackend::Memory(storage) => storage.with_tables(|tables| {
                let mut patients: Vec<PatientRecord> = tables
                    .patients
                    .values()
                    .filter(|p| p.midwife_id == midwife_id)
                    .cloned()
                    .collect();
                sort_patients(&mut patients);
                patients
            }),
        }
    }

    async fn count(&self, midwife_id: &str) -> Result<usize, RepositoryError> {
        match &self.backend {
            StorageBackend::Database(pool) => {
                let conn = pool.get()?;
                let count: i64 = conn.query_row(
                    "SELECT COUNT(*) FROM patients WHERE midwife_id = ?1",
                    params![midwife_id],
                    |row| row.get(0),
                )?;
                Ok(count as usize)
            }
            StorageBackend::Memory(storage) => storage.with_tables(|tables| {
                tables
                    .patients
                    .values()
                    .filter(|p| p.midwife_id == midwife_id)
                    .count()
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::create_in_memory_pool;
    use crate::repository::test_support::backends;

    fn patient(id: &str, midwife_id: &str, last_name: &str) -> PatientRecord {
        PatientRecord {
            id: id.to_string(),
            midwife_id: midwife_id.to_string(),
            first_name: "Claire".to_string(),
            last_name: last_name.to_string(),
            date_of_birth: Some("1990-02-14".to_string()),
            last_period_date: Some("2024-01-01".to_string()),
            cycle_length: 28,
            notes: None,
            created_at: "2024-02-01T10:00:00+00:00".to_string(),
        }
    }

    #[tokio::test]
    async fn test_patients_are_scoped_to_midwife() {
        for backend in backends() {
            let repo = PatientRepository::new(backend);
            repo.create(patient("p1", "m1", "Martin")).await.unwrap();
            repo.create(patient("p2", "m1", "Bernard")).await.unwrap();
            repo.create(patient("p3", "m2", "Durand")).await.unwrap();

            let listed = repo.list("m1").await.unwrap();
            assert_eq!(listed.len(), 2);
            assert_eq!(listed[0].last_name, "Bernard");
            assert_eq!(listed[1].last_name, "Martin");

            assert_eq!(repo.count("m1").await.unwrap(), 2);
            assert_eq!(repo.count("m2").await.unwrap(), 1);

            assert!(repo.get_by_id("m1", "p1").await.unwrap().is_some());
            assert!(repo.get_by_id("m2", "p1").await.unwrap().is_none());
        }
    }

    #[tokio::test]
    async fn test_database_round_trip_keeps_optional_fields() {
        let repo = PatientRepository::new(StorageBackend::Database(create_in_memory_pool().unwrap()));
        let mut record = patient("p1", "m1", "Martin");
        record.date_of_birth = None;
        record.notes = Some("Second pregnancy".to_string());
        repo.create(record.clone()).await.unwrap();

        let stored = repo.get_by_id("m1", "p1").await.unwrap().unwrap();
        assert_eq!(stored, record);
    }
}
