use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{http::StatusCode, response::IntoResponse, Extension, Json};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use utoipa::ToSchema;

use midwifery_assistant_domain::health::{
    ComponentStatus as DomainComponentStatus, HealthComponent as DomainHealthComponent,
    HealthServiceTrait, SystemStatus,
};

use crate::config::AppConfig;

/// Health check response with system information
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Current service status ("ok", "degraded", or "error")
    pub status: String,
    /// Current application version from Cargo manifest
    pub version: String,
    /// Timestamp of when the response was generated
    pub timestamp: u64,
    /// Uptime of the service in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime: Option<u64>,
    /// Details about the components of the system
    pub components: ComponentStatus,
    /// Environment information
    pub environment: String,
}

/// Status of individual system components
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ComponentStatus {
    /// Storage status
    pub database: ComponentHealthStatus,
    /// API status
    pub api: ComponentHealthStatus,
}

/// Health status for an individual component
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ComponentHealthStatus {
    /// Status of the component ("ok", "degraded", or "error")
    pub status: String,
    /// Optional message with more details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

static SERVER_START_TIME: OnceCell<u64> = OnceCell::new();

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Record the server start time; later calls keep the first value
pub fn initialize_server_start_time() {
    SERVER_START_TIME.get_or_init(unix_now);
}

/// Health check endpoint to verify the API is running
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "API is healthy or running on in-memory storage", body = HealthResponse),
        (status = 503, description = "Storage is unreachable", body = HealthResponse)
    ),
    tag = "health"
)]
#[instrument(skip(health_service, config))]
pub async fn health_check(
    Extension(health_service): Extension<Arc<dyn HealthServiceTrait + Send + Sync>>,
    Extension(config): Extension<Arc<AppConfig>>,
) -> impl IntoResponse {
    info!("Health check requested");

    let now = unix_now();
    let uptime = SERVER_START_TIME.get().map(|&start| now.saturating_sub(start));

    let system_health = health_service.get_system_health().await;

    let overall_status = match system_health.status {
        SystemStatus::Healthy => "ok",
        SystemStatus::Degraded => "degraded",
        SystemStatus::Unhealthy => "error",
    };

    let component = |name: &str| {
        system_health
            .components
            .get(name)
            .map(map_component)
            .unwrap_or_else(|| ComponentHealthStatus {
                status: "ok".to_string(),
                message: None,
            })
    };

    let response = HealthResponse {
        status: overall_status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: now,
        uptime,
        components: ComponentStatus {
            database: component("database"),
            api: component("api"),
        },
        environment: config.environment.clone(),
    };

    // In-memory storage still serves requests
    let status = match system_health.status {
        SystemStatus::Healthy | SystemStatus::Degraded => StatusCode::OK,
        SystemStatus::Unhealthy => {
            warn!("Health check reports an unhealthy system");
            StatusCode::SERVICE_UNAVAILABLE
        }
    };

    (status, Json(response))
}

fn map_component(component: &DomainHealthComponent) -> ComponentHealthStatus {
    let status = match component.status {
        DomainComponentStatus::Healthy => "ok",
        DomainComponentStatus::Degraded => "degraded",
        DomainComponentStatus::Unhealthy => "error",
    };

    ComponentHealthStatus {
        status: status.to_string(),
        message: component.details.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use midwifery_assistant_domain::health::SystemHealth;
    use std::collections::HashMap;

    #[derive(Debug)]
    struct UnreachableStorage;

    #[async_trait]
    impl HealthServiceTrait for UnreachableStorage {
        async fn get_system_health(&self) -> SystemHealth {
            let mut components = HashMap::new();
            components.insert(
                "database".to_string(),
                DomainHealthComponent {
                    status: DomainComponentStatus::Unhealthy,
                    details: Some("unable to open database file".to_string()),
                },
            );
            SystemHealth {
                status: SystemStatus::Unhealthy,
                components,
            }
        }

        async fn check_database_status(&self) -> Result<bool, String> {
            Err("unable to open database file".to_string())
        }
    }

    #[tokio::test]
    async fn test_unhealthy_storage_is_unavailable() {
        initialize_server_start_time();

        let service: Arc<dyn HealthServiceTrait + Send + Sync> = Arc::new(UnreachableStorage);
        let response = health_check(Extension(service), Extension(Arc::new(AppConfig::default())))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_map_component() {
        let mapped = map_component(&DomainHealthComponent {
            status: DomainComponentStatus::Degraded,
            details: Some("in memory".to_string()),
        });

        assert_eq!(mapped.status, "degraded");
        assert_eq!(mapped.message.as_deref(), Some("in memory"));
    }
}
