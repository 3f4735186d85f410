use std::sync::Arc;

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    routing::{get, post},
    Extension, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing::debug;

use midwifery_assistant_domain::health::{HealthService, HealthServiceTrait};
use midwifery_assistant_domain::services::{
    create_clinical_service, create_patient_service, create_postnatal_service,
    ClinicalServiceTrait, PatientServiceTrait, PostnatalServiceTrait,
};
use midwifery_assistant_domain::StorageBackend;

use crate::api::extractors::MIDWIFE_HEADER;
use crate::api::handlers::{
    biomedical, blood_pressure, calculator, dashboard, health, patients, postnatal,
};
use crate::config::AppConfig;
use crate::openapi::configure_swagger_routes;

/// Services shared by the handlers
#[derive(Clone)]
pub struct AppState {
    pub patients: Arc<dyn PatientServiceTrait + Send + Sync>,
    pub clinical: Arc<dyn ClinicalServiceTrait + Send + Sync>,
    pub postnatal: Arc<dyn PostnatalServiceTrait + Send + Sync>,
    pub health: Arc<dyn HealthServiceTrait + Send + Sync>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Build every service on the same storage
    pub fn new(backend: StorageBackend, config: AppConfig) -> Self {
        debug!("Creating services, persistent storage: {}", backend.is_persistent());

        Self {
            patients: Arc::new(create_patient_service(backend.clone())),
            clinical: Arc::new(create_clinical_service(backend.clone())),
            postnatal: Arc::new(create_postnatal_service(backend.clone())),
            health: Arc::new(HealthService::new(backend)),
            config: Arc::new(config),
        }
    }
}

/// Create the application router
pub fn create_app(state: AppState) -> Router {
    debug!("Creating application router");

    let api_routes: Router<AppState> = Router::new()
        .route("/calculator/gestational-age", post(calculator::gestational_age))
        .route("/blood-pressure", post(blood_pressure::record_blood_pressure))
        .route("/blood-pressure/recent", get(blood_pressure::recent_blood_pressure))
        .route("/biomedical/analyze", post(biomedical::analyze_biomedical))
        .route("/dashboard", get(dashboard::get_dashboard))
        .route("/patients", get(patients::list_patients).post(patients::create_patient))
        .route("/patients/:id", get(patients::get_patient))
        .route("/patients/:id/biomedical", get(biomedical::list_patient_biomedical))
        .route(
            "/postnatal/deliveries",
            get(postnatal::list_deliveries).post(postnatal::record_delivery),
        )
        .route(
            "/postnatal/babies",
            get(postnatal::list_babies).post(postnatal::register_baby),
        )
        .route("/postnatal/checkup", post(postnatal::record_checkup))
        .route("/postnatal/vaccination", post(postnatal::record_vaccination))
        .route("/postnatal/breastfeeding", post(postnatal::record_breastfeeding))
        .route("/postnatal/reminders", get(postnatal::list_reminders));

    let public_routes: Router<AppState> = Router::new()
        .route("/health", get(health::health_check))
        .layer(Extension(state.health.clone()))
        .layer(Extension(state.config.clone()));

    let app = Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .with_state(state);

    let app = add_swagger_ui(app);
    debug!("Swagger UI merged");

    health::initialize_server_start_time();

    configure_layers(app)
}

/// Add Swagger UI to the router
pub fn add_swagger_ui(app: Router) -> Router {
    app.merge(configure_swagger_routes())
}

/// Request tracing, CORS and security headers
fn configure_layers(app: Router) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static(MIDWIFE_HEADER),
        ])
        .max_age(std::time::Duration::from_secs(3600));

    app.layer(SetResponseHeaderLayer::if_not_present(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    ))
    .layer(SetResponseHeaderLayer::if_not_present(
        header::X_FRAME_OPTIONS,
        HeaderValue::from_static("DENY"),
    ))
    .layer(SetResponseHeaderLayer::if_not_present(
        HeaderName::from_static("referrer-policy"),
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    ))
    .layer(cors)
    .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
pub mod tests {
    use super::*;

    /// Application on fresh in-memory storage
    pub fn create_test_app() -> Router {
        create_app(AppState::new(StorageBackend::in_memory(), AppConfig::default()))
    }
}
