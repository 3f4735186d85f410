use axum::{extract::State, Json};
use chrono::Local;
use tracing::{debug, instrument};

use midwifery_assistant_domain::entities::GestationalAgeInput;
use midwifery_assistant_domain::services::calculator::calculate_gestational_age;
use midwifery_assistant_domain::services::ServiceError;

use crate::api::extractors::CurrentMidwife;
use crate::api::routes::AppState;
use crate::entities::calculator::{GestationalAgeRequest, GestationalAgeResponse};
use crate::entities::common::ErrorResponse;

/// Compute gestational age, due date and care recommendations
#[utoipa::path(
    post,
    path = "/api/v1/calculator/gestational-age",
    request_body = GestationalAgeRequest,
    params(
        ("x-midwife-id" = String, Header, description = "Acting midwife")
    ),
    responses(
        (status = 200, description = "Gestational age computed", body = GestationalAgeResponse),
        (status = 400, description = "Invalid cycle length or last period date", body = ErrorResponse),
        (status = 401, description = "Missing midwife identity", body = ErrorResponse),
    ),
    tag = "calculator"
)]
#[instrument(skip(state))]
pub async fn gestational_age(
    State(state): State<AppState>,
    CurrentMidwife(midwife): CurrentMidwife,
    Json(request): Json<GestationalAgeRequest>,
) -> Result<Json<GestationalAgeResponse>, ErrorResponse> {
    let input = GestationalAgeInput {
        last_period_date: request.last_period,
        cycle_length: request.cycle_length.unwrap_or(state.config.default_cycle_length),
    };
    let reference_date = request.reference_date.unwrap_or_else(|| Local::now().date_naive());

    let result = calculate_gestational_age(&input, reference_date).map_err(ServiceError::from)?;
    debug!("Gestational age for midwife {}: {}w{}d", midwife, result.weeks, result.days);

    Ok(Json(result.into()))
}
