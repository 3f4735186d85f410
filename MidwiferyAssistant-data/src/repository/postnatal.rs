use async_trait::async_trait;
use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

use crate::models::{
    BabyRecord, BreastfeedingRecord, CareReminderRecord, DeliveryRecord, PostnatalCheckupRecord,
    VaccinationRecord,
};
use super::errors::RepositoryError;
use super::storage::StorageBackend;

/// Repository trait for deliveries, newborns and postnatal follow-up
#[async_trait]
pub trait PostnatalRepositoryTrait {
    /// Store a delivery
    async fn create_delivery(&self, record: DeliveryRecord) -> Result<DeliveryRecord, RepositoryError>;

    /// Deliveries recorded by the midwife, newest first
    async fn list_deliveries(&self, midwife_id: &str) -> Result<Vec<DeliveryRecord>, RepositoryError>;

    /// Store a newborn
    async fn create_baby(&self, record: BabyRecord) -> Result<BabyRecord, RepositoryError>;

    /// Get a baby owned by the given midwife
    async fn get_baby(&self, midwife_id: &str, id: &str) -> Result<Option<BabyRecord>, RepositoryError>;

    /// Babies followed by the midwife, ordered by birth date
    async fn list_babies(&self, midwife_id: &str) -> Result<Vec<BabyRecord>, RepositoryError>;

    /// Store a postnatal checkup
    async fn create_checkup(&self, record: PostnatalCheckupRecord) -> Result<PostnatalCheckupRecord, RepositoryError>;

    /// Store a vaccination
    async fn create_vaccination(&self, record: VaccinationRecord) -> Result<VaccinationRecord, RepositoryError>;

    /// Store a breastfeeding observation
    async fn create_breastfeeding(&self, record: BreastfeedingRecord) -> Result<BreastfeedingRecord, RepositoryError>;

    /// Store a care reminder
    async fn create_reminder(&self, record: CareReminderRecord) -> Result<CareReminderRecord, RepositoryError>;

    /// Reminders of the midwife ordered by due date
    async fn list_reminders(&self, midwife_id: &str, include_completed: bool) -> Result<Vec<CareReminderRecord>, RepositoryError>;
}

/// Repository for postnatal care
#[derive(Debug, Clone, Default)]
pub struct PostnatalRepository {
    backend: StorageBackend,
}

impl PostnatalRepository {
    /// Create a repository on top of the given backend
    pub fn new(backend: StorageBackend) -> Self {
        Self { backend }
    }
}

const BABY_COLUMNS: &str = "id, mother_id, midwife_id, first_name, last_name, birth_date";

fn delivery_from_row(row: &Row<'_>) -> rusqlite::Result<DeliveryRecord> {
    Ok(DeliveryRecord {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        midwife_id: row.get(2)?,
        delivery_date: row.get(3)?,
        delivery_type: row.get(4)?,
        delivery_location: row.get(5)?,
        complications: row.get(6)?,
    })
}

fn baby_from_row(row: &Row<'_>) -> rusqlite::Result<BabyRecord> {
    Ok(BabyRecord {
        id: row.get(0)?,
        mother_id: row.get(1)?,
        midwife_id: row.get(2)?,
        first_name: row.get(3)?,
        last_name: row.get(4)?,
        birth_date: row.get(5)?,
    })
}

fn reminder_from_row(row: &Row<'_>) -> rusqlite::Result<CareReminderRecord> {
    Ok(CareReminderRecord {
        id: row.get(0)?,
        midwife_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        reminder_date: row.get(4)?,
        reminder_type: row.get(5)?,
        priority: row.get(6)?,
        patient_id: row.get(7)?,
        baby_id: row.get(8)?,
        completed: row.get(9)?,
    })
}

#[async_trait]
impl PostnatalRepositoryTrait for PostnatalRepository {
    async fn create_delivery(&self, record: DeliveryRecord) -> Result<DeliveryRecord, RepositoryError> {
        debug!("Storing delivery: id={}", record.id);

        match &self.backend {
            StorageBackend::Database(pool) => {
                let conn = pool.get()?;
                conn.execute(
                    "INSERT INTO deliveries
                     (id, patient_id, midwife_id, delivery_date, delivery_type, delivery_location, complications)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    params![
                        record.id,
                        record.patient_id,
                        record.midwife_id,
                        record.delivery_date,
                        record.delivery_type,
                        record.delivery_location,
                        record.complications,
                    ],
                )?;
                Ok(record)
            }
            StorageBackend::Memory(storage) => storage.with_tables(|tables| {
                tables.deliveries.insert(record.id.clone(), record.clone());
                record
            }),
        }
    }

    async fn list_deliveries(&self, midwife_id: &str) -> Result<Vec<DeliveryRecord>, RepositoryError> {
        match &self.backend {
            StorageBackend::Database(pool) => {
                let conn = pool.get()?;
                let mut stmt = conn.prepare(
                    "SELECT id, patient_id, midwife_id, delivery_date, delivery_type, delivery_location, complications
                     FROM deliveries
                     WHERE midwife_id = ?1
                     ORDER BY delivery_date DESC",
                )?;
                let records = stmt
                    .query_map(params![midwife_id], delivery_from_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(records)
            }
            StorageBackend::Memory(storage) => storage.with_tables(|tables| {
                let mut records: Vec<DeliveryRecord> = tables
                    .deliveries
                    .values()
                    .filter(|d| d.midwife_id == midwife_id)
                    .cloned()
                    .collect();
                records.sort_by(|a, b| b.delivery_date.cmp(&a.delivery_date));
                records
            }),
        }
    }

    async fn create_baby(&self, record: BabyRecord) -> Result<BabyRecord, RepositoryError> {
        debug!("Storing baby: id={}", record.id);

        match &self.backend {
            StorageBackend::Database(pool) => {
                let conn = pool.get()?;
                conn.execute(
                    "INSERT INTO babies (id, mother_id, midwife_id, first_name, last_name, birth_date)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    params![
                        record.id,
                        record.mother_id,
                        record.midwife_id,
                        record.first_name,
                        record.last_name,
                        record.birth_date,
                    ],
                )?;
                Ok(record)
            }
            StorageBackend::Memory(storage) => storage.with_tables(|tables| {
                tables.babies.insert(record.id.clone(), record.clone());
                record
            }),
        }
    }

    async fn get_baby(&self, midwife_id: &str, id: &str) -> Result<Option<BabyRecord>, RepositoryError> {
        match &self.backend {
            StorageBackend::Database(pool) => {
                let conn = pool.get()?;
                let baby = conn
                    .query_row(
                        &format!("SELECT {} FROM babies WHERE id = ?1 AND midwife_id = ?2", BABY_COLUMNS),
                        params![id, midwife_id],
                        baby_from_row,
                    )
                    .optional()?;
                Ok(baby)
            }
            StorageBackend::Memory(storage) => storage.with_tables(|tables| {
                tables
                    .babies
                    .get(id)
                    .filter(|b| b.midwife_id == midwife_id)
                    .cloned()
            }),
        }
    }

    async fn list_babies(&self, midwife_id: &str) -> Result<Vec<BabyRecord>, RepositoryError> {
        match &self.backend {
            StorageBackend::Database(pool) => {
                let conn = pool.get()?;
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM babies WHERE midwife_id = ?1 ORDER BY birth_date, last_name, first_name",
                    BABY_COLUMNS
                ))?;
                let babies = stmt
                    .query_map(params![midwife_id], baby_from_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(babies)
            }
            StorageBackend::Memory(storage) => storage.with_tables(|tables| {
                let mut babies: Vec<BabyRecord> = tables
                    .babies
                    .values()
                    .filter(|b| b.midwife_id == midwife_id)
                    .cloned()
                    .collect();
                babies.sort_by(|a, b| {
                    a.birth_date
                        .cmp(&b.birth_date)
                        .then_with(|| a.last_name.cmp(&b.last_name))
                        .then_with(|| a.first_name.cmp(&b.first_name))
                });
                babies
            }),
        }
    }

    async fn create_checkup(&self, record: PostnatalCheckupRecord) -> Result<PostnatalCheckupRecord, RepositoryError> {
        debug!("Storing postnatal checkup: id={}, type={}", record.id, record.checkup_type);

        match &self.backend {
            StorageBackend::Database(pool) => {
                let conn = pool.get()?;
                conn.execute(
                    "INSERT INTO postnatal_checkups
                     (id, midwife_id, checkup_type, patient_id, baby_id, checkup_date, temperature, heart_rate,
                      blood_pressure_systolic, blood_pressure_diastolic, respiratory_rate, weight, symptoms,
                      physical_exam, recommendations, medications, notes, next_checkup_date)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)",
                    params![
                        record.id,
                        record.midwife_id,
                        record.checkup_type,
                        record.patient_id,
                        record.baby_id,
                        record.checkup_date,
                        record.temperature,
                        record.heart_rate,
                        record.blood_pressure_systolic,
                        record.blood_pressure_diastolic,
                        record.respiratory_rate,
                        record.weight,
                        record.symptoms,
                        record.physical_exam,
                        record.recommendations,
                        record.medications,
                        record.notes,
                        record.next_checkup_date,
                    ],
                )?;
                Ok(record)
            }
            StorageBackend::Memory(storage) => storage.with_tables(|tables| {
                tables.checkups.insert(record.id.clone(), record.clone());
                record
            }),
        }
    }

    async fn create_vaccination(&self, record: VaccinationRecord) -> Result<VaccinationRecord, RepositoryError> {
        debug!("Storing vaccination: id={}, baby_id={}", record.id, record.baby_id);

        match &self.backend {
            StorageBackend::Database(pool) => {
                let conn = pool.get()?;
                conn.execute(
                    "INSERT INTO vaccinations
                     (id, baby_id, midwife_id, vaccine_name, date_administered, dose, route, site,
                      lot_number, expiration_date, reaction, notes)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                    params![
                        record.id,
                        record.baby_id,
                        record.midwife_id,
                        record.vaccine_name,
                        record.date_administered,
                        record.dose,
                        record.route,
                        record.site,
                        record.lot_number,
                        record.expiration_date,
                        record.reaction,
                        record.notes,
                    ],
                )?;
                Ok(record)
            }
            StorageBackend::Memory(storage) => storage.with_tables(|tables| {
                tables.vaccinations.insert(record.id.clone(), record.clone());
                record
            }),
        }
    }

    async fn create_breastfeeding(&self, record: BreastfeedingRecord) -> Result<BreastfeedingRecord, RepositoryError> {
        debug!("Storing breastfeeding record: id={}, baby_id={}", record.id, record.baby_id);

        match &self.backend {
            StorageBackend::Database(pool) => {
                let conn = pool.get()?;
                conn.execute(
                    "INSERT INTO breastfeeding_records
                     (id, mother_id, baby_id, midwife_id, feeding_date, feeding_type, duration, issues, notes)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                    params![
                        record.id,
                        record.mother_id,
                        record.baby_id,
                        record.midwife_id,
                        record.feeding_date,
                        record.feeding_type,
                        record.duration,
                        record.issues,
                        record.notes,
                    ],
                )?;
                Ok(record)
            }
            StorageBackend::Memory(storage) => storage.with_tables(|tables| {
                tables.breastfeeding.insert(record.id.clone(), record.clone());
                record
            }),
        }
    }

    async fn create_reminder(&self, record: CareReminderRecord) -> Result<CareReminderRecord, RepositoryError> {
        debug!("Storing care reminder: id={}, date={}", record.id, record.reminder_date);

        match &self.backend {
            StorageBackend::Database(pool) => {
                let conn = pool.get()?;
                conn.execute(
                    "INSERT INTO care_reminders
                     (id, midwife_id, title, description, reminder_date, reminder_type, priority,
                      patient_id, baby_id, completed)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                    params![
                        record.id,
                        record.midwife_id,
                        record.title,
                        record.description,
                        record.reminder_date,
                        record.reminder_type,
                        record.priority,
                        record.patient_id,
                        record.baby_id,
                        record.completed,
                    ],
                )?;
                Ok(record)
            }
            StorageBackend::Memory(storage) => storage.with_tables(|tables| {
                tables.reminders.insert(record.id.clone(), record.clone());
                record
            }),
        }
    }

    async fn list_reminders(&self, midwife_id: &str, include_completed: bool) -> Result<Vec<CareReminderRecord>, RepositoryError> {
        match &self.backend {
            StorageBackend::Database(pool) => {
                let conn = pool.get()?;
                let mut stmt = conn.prepare(
                    "SELECT id, midwife_id, title, description, reminder_date, reminder_type, priority,
                            patient_id, baby_id, completed
                     FROM care_reminders
                     WHERE midwife_id = ?1 AND (?2 OR completed = 0)
                     ORDER BY reminder_date",
                )?;
                let records = stmt
                    .query_map(params![midwife_id, include_completed], reminder_from_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(records)
            }
            StorageBackend::Memory(storage) => storage.with_tables(|tables| {
                let mut records: Vec<CareReminderRecord> = tables
                    .reminders
                    .values()
                    .filter(|r| r.midwife_id == midwife_id && (include_completed || !r.completed))
                    .cloned()
                    .collect();
                records.sort_by(|a, b| a.reminder_date.cmp(&b.reminder_date));
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

    fn baby(id: &str, midwife_id: &str, birth_date: &str) -> BabyRecord {
        BabyRecord {
            id: id.to_string(),
            mother_id: "p1".to_string(),
            midwife_id: midwife_id.to_string(),
            first_name: "Léo".to_string(),
            last_name: "Martin".to_string(),
            birth_date: birth_date.to_string(),
        }
    }

    fn reminder(id: &str, date: &str, completed: bool) -> CareReminderRecord {
        CareReminderRecord {
            id: id.to_string(),
            midwife_id: "m1".to_string(),
            title: "Postnatal follow-up (mother)".to_string(),
            description: None,
            reminder_date: date.to_string(),
            reminder_type: "mother".to_string(),
            priority: "normal".to_string(),
            patient_id: Some("p1".to_string()),
            baby_id: None,
            completed,
        }
    }

    #[tokio::test]
    async fn test_babies_are_scoped_to_midwife() {
        for backend in backends() {
            seed_patients(&backend, &[("p1", "m1")]).await;
            let repo = PostnatalRepository::new(backend);
            repo.create_baby(baby("b2", "m1", "2024-06-02")).await.unwrap();
            repo.create_baby(baby("b1", "m1", "2024-05-20")).await.unwrap();
            repo.create_baby(baby("b3", "m2", "2024-05-01")).await.unwrap();

            let babies = repo.list_babies("m1").await.unwrap();
            let ids: Vec<&str> = babies.iter().map(|b| b.id.as_str()).collect();
            assert_eq!(ids, vec!["b1", "b2"]);

            assert!(repo.get_baby("m1", "b1").await.unwrap().is_some());
            assert!(repo.get_baby("m1", "b3").await.unwrap().is_none());
        }
    }

    #[tokio::test]
    async fn test_deliveries_newest_first() {
        for backend in backends() {
            seed_patients(&backend, &[("p1", "m1")]).await;
            let repo = PostnatalRepository::new(backend);
            for (id, date) in [("d1", "2024-01-10T04:30"), ("d2", "2024-03-02T22:15")] {
                repo.create_delivery(DeliveryRecord {
                    id: id.to_string(),
                    patient_id: "p1".to_string(),
                    midwife_id: "m1".to_string(),
                    delivery_date: date.to_string(),
                    delivery_type: "vaginal".to_string(),
                    delivery_location: Some("Maternité".to_string()),
                    complications: None,
                })
                .await
                .unwrap();
            }

            let deliveries = repo.list_deliveries("m1").await.unwrap();
            assert_eq!(deliveries[0].id, "d2");
            assert_eq!(deliveries[1].id, "d1");
        }
    }

    #[tokio::test]
    async fn test_reminders_filter_completed_and_sort_by_date() {
        for backend in backends() {
            let repo = PostnatalRepository::new(backend);
            repo.create_reminder(reminder("r1", "2024-07-10", false)).await.unwrap();
            repo.create_reminder(reminder("r2", "2024-07-01", false)).await.unwrap();
            repo.create_reminder(reminder("r3", "2024-06-01", true)).await.unwrap();

            let pending = repo.list_reminders("m1", false).await.unwrap();
            let ids: Vec<&str> = pending.iter().map(|r| r.id.as_str()).collect();
            assert_eq!(ids, vec!["r2", "r1"]);

            let all = repo.list_reminders("m1", true).await.unwrap();
            assert_eq!(all.len(), 3);
            assert_eq!(all[0].id, "r3");
        }
    }

    #[tokio::test]
    async fn test_database_rejects_baby_for_unknown_mother() {
        let repo = PostnatalRepository::new(StorageBackend::Database(create_in_memory_pool().unwrap()));

        let result = repo.create_baby(baby("b1", "m1", "2024-05-20")).await;

        assert!(matches!(result, Err(RepositoryError::Sqlite(_))));
        assert!(repo.list_babies("m1").await.unwrap().is_empty());
    }
}
