//! Domain layer health check functionality
//! This module provides health check services for the application

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::warn;

use midwifery_assistant_data::repository::StorageBackend;

/// System health status
#[derive(Debug, Clone, PartialEq)]
pub enum SystemStatus {
    /// All components are healthy
    Healthy,
    /// Some components are degraded but the system is functional
    Degraded,
    /// System is not functioning properly
    Unhealthy,
}

/// Component health status
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentStatus {
    /// Component is functioning normally
    Healthy,
    /// Component works with reduced guarantees
    Degraded,
    /// Component is not functioning
    Unhealthy,
}

/// Represents a health component with status and optional details
#[derive(Debug, Clone)]
pub struct HealthComponent {
    /// Status of the component
    pub status: ComponentStatus,
    /// Optional details about the component status
    pub details: Option<String>,
}

/// Represents the overall health of the system
#[derive(Debug, Clone)]
pub struct SystemHealth {
    /// Overall system status
    pub status: SystemStatus,
    /// Map of component names to their health status
    pub components: HashMap<String, HealthComponent>,
}

/// Trait for health services
#[async_trait]
pub trait HealthServiceTrait: Send + Sync + std::fmt::Debug {
    /// Get the overall system health
    async fn get_system_health(&self) -> SystemHealth;

    /// Check the status of the storage.
    /// Returns Ok(true) when records are persisted, Ok(false) when they only
    /// live in memory, and an error when the database cannot be reached.
    async fn check_database_status(&self) -> Result<bool, String>;
}

/// Check the storage the repositories are using
pub fn check_database_status(backend: &StorageBackend) -> Result<bool, String> {
    match backend {
        StorageBackend::Database(pool) => {
            let conn = pool
                .get()
                .map_err(|e| format!("Database connection error: {}", e))?;
            let path: String = conn
                .query_row("PRAGMA database_list", [], |row| row.get(2))
                .map_err(|e| format!("Database query error: {}", e))?;
            // An empty path means the SQLite fallback is running in memory
            Ok(!path.is_empty())
        }
        StorageBackend::Memory(_) => Ok(false),
    }
}

/// Health service over the storage backend shared with the repositories
#[derive(Debug, Clone)]
pub struct HealthService {
    backend: StorageBackend,
}

impl HealthService {
    /// Create a new health service
    pub fn new(backend: StorageBackend) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl HealthServiceTrait for HealthService {
    async fn get_system_health(&self) -> SystemHealth {
        let db_component = match self.check_database_status().await {
            Ok(true) => HealthComponent {
                status: ComponentStatus::Healthy,
                details: None,
            },
            Ok(false) => HealthComponent {
                status: ComponentStatus::Degraded,
                details: Some("Using in-memory storage; records are lost on restart".to_string()),
            },
            Err(e) => {
                warn!("Database health check failed: {}", e);
                HealthComponent {
                    status: ComponentStatus::Unhealthy,
                    details: Some(e),
                }
            }
        };

        let overall_status = match db_component.status {
            ComponentStatus::Unhealthy => SystemStatus::Unhealthy,
            ComponentStatus::Degraded => SystemStatus::Degraded,
            ComponentStatus::Healthy => SystemStatus::Healthy,
        };

        SystemHealth {
            status: overall_status,
            components: vec![
                ("database".to_string(), db_component),
                (
                    "api".to_string(),
                    HealthComponent {
                        status: ComponentStatus::Healthy,
                        details: None,
                    },
                ),
            ]
            .into_iter()
            .collect(),
        }
    }

    async fn check_database_status(&self) -> Result<bool, String> {
        check_database_status(&self.backend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use midwifery_assistant_data::database::create_in_memory_pool;

    #[tokio::test]
    async fn test_in_memory_storage_is_degraded() {
        let health = HealthService::new(StorageBackend::in_memory()).get_system_health().await;

        assert_eq!(health.status, SystemStatus::Degraded);
        assert_eq!(health.components["database"].status, ComponentStatus::Degraded);
        assert_eq!(health.components["api"].status, ComponentStatus::Healthy);
    }

    #[tokio::test]
    async fn test_in_memory_sqlite_is_degraded() {
        let backend = StorageBackend::Database(create_in_memory_pool().unwrap());

        assert_eq!(check_database_status(&backend), Ok(false));
    }
}
