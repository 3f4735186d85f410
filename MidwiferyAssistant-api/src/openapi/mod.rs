use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Configure Swagger UI endpoints
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::api::handlers::health::health_check,

        // Calculator endpoints
        crate::api::handlers::calculator::gestational_age,
        crate::api::handlers::blood_pressure::record_blood_pressure,
        crate::api::handlers::blood_pressure::recent_blood_pressure,
        crate::api::handlers::biomedical::analyze_biomedical,
        crate::api::handlers::biomedical::list_patient_biomedical,
        crate::api::handlers::dashboard::get_dashboard,

        // Patient endpoints
        crate::api::handlers::patients::list_patients,
        crate::api::handlers::patients::create_patient,
        crate::api::handlers::patients::get_patient,

        // Postnatal endpoints
        crate::api::handlers::postnatal::list_deliveries,
        crate::api::handlers::postnatal::record_delivery,
        crate::api::handlers::postnatal::list_babies,
        crate::api::handlers::postnatal::register_baby,
        crate::api::handlers::postnatal::record_checkup,
        crate::api::handlers::postnatal::record_vaccination,
        crate::api::handlers::postnatal::record_breastfeeding,
        crate::api::handlers::postnatal::list_reminders
    ),
    components(
        schemas(
            // Public entities
            crate::entities::common::ErrorResponse,
            crate::entities::common::CreatedResponse,
            crate::entities::calculator::GestationalAgeRequest,
            crate::entities::calculator::GestationalAgeResponse,
            crate::entities::blood_pressure::BloodPressureRequest,
            crate::entities::blood_pressure::BloodPressureResponse,
            crate::entities::blood_pressure::BloodPressureStatus,
            crate::entities::blood_pressure::BloodPressureReadingResponse,
            crate::entities::blood_pressure::DashboardResponse,
            crate::entities::biomedical::BiomedicalRequest,
            crate::entities::biomedical::BiomedicalResponse,
            crate::entities::biomedical::BiomedicalRecordsResponse,
            crate::entities::patient::CreatePatientRequest,
            crate::entities::patient::PatientListResponse,
            crate::entities::postnatal::DeliveryRequest,
            crate::entities::postnatal::BabyRequest,
            crate::entities::postnatal::CheckupRequest,
            crate::entities::postnatal::VaccinationRequest,
            crate::entities::postnatal::BreastfeedingRequest,
            crate::entities::postnatal::DeliveryListResponse,
            crate::entities::postnatal::BabyListResponse,
            crate::entities::postnatal::ReminderListResponse,

            // Domain entities exposed as-is
            midwifery_assistant_domain::entities::Patient,
            midwifery_assistant_domain::entities::PatientDetail,
            midwifery_assistant_domain::entities::GestationalAgeResult,
            midwifery_assistant_domain::entities::BloodPanelInput,
            midwifery_assistant_domain::entities::BloodPanelResult,
            midwifery_assistant_domain::entities::BloodPanelRecord,
            midwifery_assistant_domain::entities::PanelItem,
            midwifery_assistant_domain::entities::PanelFlag,
            midwifery_assistant_domain::entities::Delivery,
            midwifery_assistant_domain::entities::Baby,
            midwifery_assistant_domain::entities::CheckupType,
            midwifery_assistant_domain::entities::CareReminder,

            // Health handlers
            crate::api::handlers::health::HealthResponse,
            crate::api::handlers::health::ComponentStatus,
            crate::api::handlers::health::ComponentHealthStatus
        )
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "calculator", description = "Gestational age calculator"),
        (name = "blood_pressure", description = "Blood pressure classification and history"),
        (name = "biomedical", description = "Blood panel interpretation"),
        (name = "dashboard", description = "Midwife dashboard"),
        (name = "patients", description = "Patient records"),
        (name = "postnatal", description = "Deliveries, newborns and postnatal follow-up")
    ),
    info(
        title = "MidwiferyAssistant API",
        version = "0.1.0",
        description = "Clinical calculators and follow-up records for midwives",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        ),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
pub struct ApiDoc;
