// Repository module structure
pub mod errors;
mod in_memory;
mod storage;
mod patient;
mod clinical;
mod postnatal;

// Re-export commonly used types
pub use errors::RepositoryError;
pub use in_memory::InMemoryStorage;
pub use storage::StorageBackend;
pub use patient::{PatientRepository, PatientRepositoryTrait};
pub use clinical::{ClinicalRecordRepository, ClinicalRecordRepositoryTrait};
pub use postnatal::{PostnatalRepository, PostnatalRepositoryTrait};

#[cfg(test)]
pub(crate) mod test_support {
    use super::{PatientRepository, PatientRepositoryTrait, StorageBackend};
    use crate::database::create_in_memory_pool;
    use crate::models::PatientRecord;

    pub fn backends() -> Vec<StorageBackend> {
        vec![
            StorageBackend::in_memory(),
            StorageBackend::Database(create_in_memory_pool().unwrap()),
        ]
    }

    /// Insert the patient rows that child records reference.
    pub async fn seed_patients(backend: &StorageBackend, patients: &[(&str, &str)]) {
        let repo = PatientRepository::new(backend.clone());
        for (id, midwife_id) in patients {
            repo.create(PatientRecord {
                id: id.to_string(),
                midwife_id: midwife_id.to_string(),
                first_name: "Claire".to_string(),
                last_name: "Martin".to_string(),
                date_of_birth: None,
                last_period_date: None,
                cycle_length: 28,
                notes: None,
                created_at: "2024-02-01T10:00:00+00:00".to_string(),
            })
            .await
            .unwrap();
        }
    }
}
