use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{info, instrument};
use validator::Validate;

use crate::api::extractors::CurrentMidwife;
use crate::api::routes::AppState;
use crate::entities::biomedical::{BiomedicalRecordsResponse, BiomedicalRequest, BiomedicalResponse};
use crate::entities::common::ErrorResponse;

/// Interpret a blood panel; it is stored when a patient is given
#[utoipa::path(
    post,
    path = "/api/v1/biomedical/analyze",
    request_body = BiomedicalRequest,
    params(
        ("x-midwife-id" = String, Header, description = "Acting midwife")
    ),
    responses(
        (status = 200, description = "Panel interpreted", body = BiomedicalResponse),
        (status = 400, description = "Invalid panel values", body = ErrorResponse),
        (status = 401, description = "Missing midwife identity", body = ErrorResponse),
        (status = 404, description = "Patient not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "biomedical"
)]
#[instrument(skip(state))]
pub async fn analyze_biomedical(
    State(state): State<AppState>,
    CurrentMidwife(midwife): CurrentMidwife,
    Json(request): Json<BiomedicalRequest>,
) -> Result<Json<BiomedicalResponse>, ErrorResponse> {
    request.validate()?;

    let outcome = state.clinical.analyze_blood_panel(&midwife, request.into()).await?;
    let record_id = outcome.record.map(|record| record.id);
    if let Some(id) = &record_id {
        info!("Blood panel {} stored", id);
    }

    Ok(Json(BiomedicalResponse {
        result: outcome.result,
        saved: record_id.is_some(),
        record_id,
    }))
}

/// Stored panels of a patient
#[utoipa::path(
    get,
    path = "/api/v1/patients/{id}/biomedical",
    params(
        ("id" = String, Path, description = "Patient ID"),
        ("x-midwife-id" = String, Header, description = "Acting midwife")
    ),
    responses(
        (status = 200, description = "Panels, newest first", body = BiomedicalRecordsResponse),
        (status = 401, description = "Missing midwife identity", body = ErrorResponse),
        (status = 404, description = "Patient not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "biomedical"
)]
#[instrument(skip(state))]
pub async fn list_patient_biomedical(
    State(state): State<AppState>,
    CurrentMidwife(midwife): CurrentMidwife,
    Path(id): Path<String>,
) -> Result<Json<BiomedicalRecordsResponse>, ErrorResponse> {
    let records = state.clinical.list_blood_panels(&midwife, &id).await?;
    Ok(Json(BiomedicalRecordsResponse { records }))
}
