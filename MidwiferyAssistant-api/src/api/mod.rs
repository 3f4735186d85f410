pub mod extractors;
pub mod handlers;
pub mod routes;

use axum::Router;

use midwifery_assistant_domain::StorageBackend;

use crate::config::AppConfig;

/// Create the application router on the storage picked from the environment
pub fn create_application(config: AppConfig) -> Router {
    let backend = StorageBackend::from_environment();
    routes::create_app(routes::AppState::new(backend, config))
}
