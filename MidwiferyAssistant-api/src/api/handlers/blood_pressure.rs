use axum::{extract::State, Json};
use tracing::{info, instrument};
use validator::Validate;

use crate::api::extractors::CurrentMidwife;
use crate::api::routes::AppState;
use crate::entities::blood_pressure::{
    convert_to_public_reading, BloodPressureReadingResponse, BloodPressureRequest,
    BloodPressureResponse,
};
use crate::entities::common::ErrorResponse;

/// Classify a measurement; it is recorded when a patient is given
#[utoipa::path(
    post,
    path = "/api/v1/blood-pressure",
    request_body = BloodPressureRequest,
    params(
        ("x-midwife-id" = String, Header, description = "Acting midwife")
    ),
    responses(
        (status = 200, description = "Measurement classified", body = BloodPressureResponse),
        (status = 400, description = "Invalid measurement", body = ErrorResponse),
        (status = 401, description = "Missing midwife identity", body = ErrorResponse),
        (status = 404, description = "Patient not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "blood_pressure"
)]
#[instrument(skip(state))]
pub async fn record_blood_pressure(
    State(state): State<AppState>,
    CurrentMidwife(midwife): CurrentMidwife,
    Json(request): Json<BloodPressureRequest>,
) -> Result<Json<BloodPressureResponse>, ErrorResponse> {
    request.validate()?;

    let outcome = state.clinical.evaluate_blood_pressure(&midwife, request.into()).await?;
    if let Some(reading) = &outcome.reading {
        info!("Blood pressure reading {} recorded", reading.id);
    }

    Ok(Json(BloodPressureResponse {
        status: outcome.result.status.into(),
        message: outcome.result.message,
        saved: outcome.reading.is_some(),
    }))
}

/// Latest measurements recorded by the midwife
#[utoipa::path(
    get,
    path = "/api/v1/blood-pressure/recent",
    params(
        ("x-midwife-id" = String, Header, description = "Acting midwife")
    ),
    responses(
        (status = 200, description = "Most recent readings, newest first", body = [BloodPressureReadingResponse]),
        (status = 401, description = "Missing midwife identity", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "blood_pressure"
)]
#[instrument(skip(state))]
pub async fn recent_blood_pressure(
    State(state): State<AppState>,
    CurrentMidwife(midwife): CurrentMidwife,
) -> Result<Json<Vec<BloodPressureReadingResponse>>, ErrorResponse> {
    let readings = state.clinical.recent_blood_pressure(&midwife).await?;
    Ok(Json(readings.into_iter().map(convert_to_public_reading).collect()))
}
