use axum::{extract::State, Json};
use tracing::instrument;

use crate::api::extractors::CurrentMidwife;
use crate::api::routes::AppState;
use crate::entities::blood_pressure::DashboardResponse;
use crate::entities::common::ErrorResponse;

/// Patient count and latest blood pressure readings
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    params(
        ("x-midwife-id" = String, Header, description = "Acting midwife")
    ),
    responses(
        (status = 200, description = "Dashboard summary", body = DashboardResponse),
        (status = 401, description = "Missing midwife identity", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "dashboard"
)]
#[instrument(skip(state))]
pub async fn get_dashboard(
    State(state): State<AppState>,
    CurrentMidwife(midwife): CurrentMidwife,
) -> Result<Json<DashboardResponse>, ErrorResponse> {
    let summary = state.clinical.dashboard(&midwife).await?;
    Ok(Json(summary.into()))
}
