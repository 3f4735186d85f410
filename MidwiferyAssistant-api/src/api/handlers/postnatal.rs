use axum::{extract::State, http::StatusCode, Json};
use tracing::{info, instrument};
use validator::Validate;

use midwifery_assistant_domain::entities::postnatal::{
    BreastfeedingRequest as DomainBreastfeedingRequest, PostnatalCheckupRequest,
    RecordDeliveryRequest, RegisterBabyRequest, VaccinationRequest as DomainVaccinationRequest,
};

use crate::api::extractors::CurrentMidwife;
use crate::api::routes::AppState;
use crate::entities::common::{CreatedResponse, ErrorResponse};
use crate::entities::postnatal::{
    BabyListResponse, BabyRequest, BreastfeedingRequest, CheckupRequest, DeliveryListResponse,
    DeliveryRequest, ReminderListResponse, VaccinationRequest,
};

type Created = (StatusCode, Json<CreatedResponse>);

/// Deliveries, newest first
#[utoipa::path(
    get,
    path = "/api/v1/postnatal/deliveries",
    params(("x-midwife-id" = String, Header, description = "Acting midwife")),
    responses(
        (status = 200, description = "Deliveries with the mother's name", body = DeliveryListResponse),
        (status = 401, description = "Missing midwife identity", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "postnatal"
)]
#[instrument(skip(state))]
pub async fn list_deliveries(
    State(state): State<AppState>,
    CurrentMidwife(midwife): CurrentMidwife,
) -> Result<Json<DeliveryListResponse>, ErrorResponse> {
    let deliveries = state.postnatal.list_deliveries(&midwife).await?;
    Ok(Json(DeliveryListResponse { deliveries }))
}

/// Record a delivery
#[utoipa::path(
    post,
    path = "/api/v1/postnatal/deliveries",
    request_body = DeliveryRequest,
    params(("x-midwife-id" = String, Header, description = "Acting midwife")),
    responses(
        (status = 201, description = "Delivery recorded", body = CreatedResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Missing midwife identity", body = ErrorResponse),
        (status = 404, description = "Patient not found", body = ErrorResponse),
    ),
    tag = "postnatal"
)]
#[instrument(skip(state))]
pub async fn record_delivery(
    State(state): State<AppState>,
    CurrentMidwife(midwife): CurrentMidwife,
    Json(request): Json<DeliveryRequest>,
) -> Result<Created, ErrorResponse> {
    request.validate()?;
    let request = RecordDeliveryRequest::try_from(request)?;

    let delivery = state.postnatal.record_delivery(&midwife, request).await?;
    info!("Delivery {} recorded", delivery.id);

    Ok((StatusCode::CREATED, Json(CreatedResponse::new(delivery.id))))
}

/// Newborns with their mother's name
#[utoipa::path(
    get,
    path = "/api/v1/postnatal/babies",
    params(("x-midwife-id" = String, Header, description = "Acting midwife")),
    responses(
        (status = 200, description = "Newborns of the midwife's patients", body = BabyListResponse),
        (status = 401, description = "Missing midwife identity", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "postnatal"
)]
#[instrument(skip(state))]
pub async fn list_babies(
    State(state): State<AppState>,
    CurrentMidwife(midwife): CurrentMidwife,
) -> Result<Json<BabyListResponse>, ErrorResponse> {
    let babies = state.postnatal.list_babies(&midwife).await?;
    Ok(Json(BabyListResponse { babies }))
}

/// Register a newborn
#[utoipa::path(
    post,
    path = "/api/v1/postnatal/babies",
    request_body = BabyRequest,
    params(("x-midwife-id" = String, Header, description = "Acting midwife")),
    responses(
        (status = 201, description = "Baby registered", body = CreatedResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Missing midwife identity", body = ErrorResponse),
        (status = 404, description = "Mother not found", body = ErrorResponse),
    ),
    tag = "postnatal"
)]
#[instrument(skip(state))]
pub async fn register_baby(
    State(state): State<AppState>,
    CurrentMidwife(midwife): CurrentMidwife,
    Json(request): Json<BabyRequest>,
) -> Result<Created, ErrorResponse> {
    request.validate()?;
    let request = RegisterBabyRequest::try_from(request)?;

    let baby = state.postnatal.register_baby(&midwife, request).await?;
    info!("Baby {} registered", baby.id);

    Ok((StatusCode::CREATED, Json(CreatedResponse::new(baby.id))))
}

/// Record a checkup of the mother or the baby
#[utoipa::path(
    post,
    path = "/api/v1/postnatal/checkup",
    request_body = CheckupRequest,
    params(("x-midwife-id" = String, Header, description = "Acting midwife")),
    responses(
        (status = 201, description = "Checkup recorded, with the reminder scheduled for the next one", body = CreatedResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Missing midwife identity", body = ErrorResponse),
        (status = 404, description = "Patient or baby not found", body = ErrorResponse),
    ),
    tag = "postnatal"
)]
#[instrument(skip(state))]
pub async fn record_checkup(
    State(state): State<AppState>,
    CurrentMidwife(midwife): CurrentMidwife,
    Json(request): Json<CheckupRequest>,
) -> Result<Created, ErrorResponse> {
    request.validate()?;
    let request = PostnatalCheckupRequest::try_from(request)?;

    let checkup = state.postnatal.record_checkup(&midwife, request).await?;
    info!("{} checkup {} recorded", checkup.checkup_type, checkup.id);

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            reminder_id: checkup.reminder_id,
            ..CreatedResponse::new(checkup.id)
        }),
    ))
}

/// Record a vaccination
#[utoipa::path(
    post,
    path = "/api/v1/postnatal/vaccination",
    request_body = VaccinationRequest,
    params(("x-midwife-id" = String, Header, description = "Acting midwife")),
    responses(
        (status = 201, description = "Vaccination recorded", body = CreatedResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Missing midwife identity", body = ErrorResponse),
        (status = 404, description = "Baby not found", body = ErrorResponse),
    ),
    tag = "postnatal"
)]
#[instrument(skip(state))]
pub async fn record_vaccination(
    State(state): State<AppState>,
    CurrentMidwife(midwife): CurrentMidwife,
    Json(request): Json<VaccinationRequest>,
) -> Result<Created, ErrorResponse> {
    request.validate()?;
    let request = DomainVaccinationRequest::try_from(request)?;

    let vaccination = state.postnatal.record_vaccination(&midwife, request).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse::new(vaccination.id))))
}

/// Record a breastfeeding observation
#[utoipa::path(
    post,
    path = "/api/v1/postnatal/breastfeeding",
    request_body = BreastfeedingRequest,
    params(("x-midwife-id" = String, Header, description = "Acting midwife")),
    responses(
        (status = 201, description = "Observation recorded", body = CreatedResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Missing midwife identity", body = ErrorResponse),
        (status = 404, description = "Baby or mother not found", body = ErrorResponse),
    ),
    tag = "postnatal"
)]
#[instrument(skip(state))]
pub async fn record_breastfeeding(
    State(state): State<AppState>,
    CurrentMidwife(midwife): CurrentMidwife,
    Json(request): Json<BreastfeedingRequest>,
) -> Result<Created, ErrorResponse> {
    request.validate()?;
    let request = DomainBreastfeedingRequest::try_from(request)?;

    let observation = state.postnatal.record_breastfeeding(&midwife, request).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse::new(observation.id))))
}

/// Pending care reminders, soonest first
#[utoipa::path(
    get,
    path = "/api/v1/postnatal/reminders",
    params(("x-midwife-id" = String, Header, description = "Acting midwife")),
    responses(
        (status = 200, description = "Reminders not yet completed", body = ReminderListResponse),
        (status = 401, description = "Missing midwife identity", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "postnatal"
)]
#[instrument(skip(state))]
pub async fn list_reminders(
    State(state): State<AppState>,
    CurrentMidwife(midwife): CurrentMidwife,
) -> Result<Json<ReminderListResponse>, ErrorResponse> {
    let reminders = state.postnatal.pending_reminders(&midwife).await?;
    Ok(Json(ReminderListResponse { reminders }))
}
