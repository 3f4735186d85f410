use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Local;
use tracing::{info, instrument};
use validator::Validate;

use midwifery_assistant_domain::entities::{Patient, PatientDetail};

use crate::api::extractors::CurrentMidwife;
use crate::api::routes::AppState;
use crate::entities::common::ErrorResponse;
use crate::entities::patient::{CreatePatientRequest, PatientListResponse};

/// Patients of the midwife, by last name
#[utoipa::path(
    get,
    path = "/api/v1/patients",
    params(
        ("x-midwife-id" = String, Header, description = "Acting midwife")
    ),
    responses(
        (status = 200, description = "Patients of the midwife", body = PatientListResponse),
        (status = 401, description = "Missing midwife identity", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "patients"
)]
#[instrument(skip(state))]
pub async fn list_patients(
    State(state): State<AppState>,
    CurrentMidwife(midwife): CurrentMidwife,
) -> Result<Json<PatientListResponse>, ErrorResponse> {
    let patients = state.patients.list_patients(&midwife).await?;
    Ok(Json(PatientListResponse { patients }))
}

/// Create a patient
#[utoipa::path(
    post,
    path = "/api/v1/patients",
    request_body = CreatePatientRequest,
    params(
        ("x-midwife-id" = String, Header, description = "Acting midwife")
    ),
    responses(
        (status = 201, description = "Patient created", body = Patient),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Missing midwife identity", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "patients"
)]
#[instrument(skip(state))]
pub async fn create_patient(
    State(state): State<AppState>,
    CurrentMidwife(midwife): CurrentMidwife,
    Json(request): Json<CreatePatientRequest>,
) -> Result<(StatusCode, Json<Patient>), ErrorResponse> {
    request.validate()?;

    let patient = state.patients.create_patient(&midwife, request.into()).await?;
    info!("Patient {} created", patient.id);

    Ok((StatusCode::CREATED, Json(patient)))
}

/// A patient with her current gestational age
#[utoipa::path(
    get,
    path = "/api/v1/patients/{id}",
    params(
        ("id" = String, Path, description = "Patient ID"),
        ("x-midwife-id" = String, Header, description = "Acting midwife")
    ),
    responses(
        (status = 200, description = "Patient found", body = PatientDetail),
        (status = 401, description = "Missing midwife identity", body = ErrorResponse),
        (status = 404, description = "Patient not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "patients"
)]
#[instrument(skip(state))]
pub async fn get_patient(
    State(state): State<AppState>,
    CurrentMidwife(midwife): CurrentMidwife,
    Path(id): Path<String>,
) -> Result<Json<PatientDetail>, ErrorResponse> {
    let today = Local::now().date_naive();
    let detail = state.patients.get_patient(&midwife, &id, today).await?;
    Ok(Json(detail))
}
