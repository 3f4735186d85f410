use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use midwifery_assistant_domain::services::ServiceError;

/// Standardized error response format
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error type/code - machine-readable identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional details about the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    fn new(error: &str, message: impl Into<String>) -> Self {
        Self {
            error: error.to_string(),
            message: message.into(),
            details: None,
        }
    }

    /// Create a not found error response
    pub fn not_found(resource: &str) -> Self {
        Self::new("not_found", format!("The requested {} could not be found", resource))
    }

    /// Create a validation error response
    pub fn validation_error(message: &str, details: Option<serde_json::Value>) -> Self {
        Self {
            details,
            ..Self::new("validation_error", message)
        }
    }

    /// Values the calculator cannot work with
    pub fn invalid_input(message: &str) -> Self {
        Self::new("invalid_input", message)
    }

    /// Create a bad request error response
    pub fn bad_request(message: &str) -> Self {
        Self::new("bad_request", message)
    }

    /// Request without a midwife identity
    pub fn unauthorized() -> Self {
        Self::new("unauthorized", "Missing midwife identity")
    }

    /// Create an internal error response
    pub fn internal_error() -> Self {
        Self::new("internal_error", "An internal server error occurred")
    }

    /// HTTP status for the error code
    pub fn status(&self) -> StatusCode {
        match self.error.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "validation_error" | "invalid_input" | "bad_request" => StatusCode::BAD_REQUEST,
            "unauthorized" => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

impl From<ServiceError> for ErrorResponse {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidInput(msg) => ErrorResponse::invalid_input(&msg),
            ServiceError::Validation(msg) => ErrorResponse::validation_error(&msg, None),
            ServiceError::NotFound(resource) => ErrorResponse::not_found(&resource_label(&resource)),
            ServiceError::Repository(msg) => {
                error!("Repository failure: {}", msg);
                ErrorResponse::internal_error()
            }
        }
    }
}

impl From<validator::ValidationErrors> for ErrorResponse {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).ok();
        ErrorResponse::validation_error("Invalid request data", details)
    }
}

/// Confirmation returned by the postnatal write endpoints
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatedResponse {
    pub success: bool,

    /// Identifier of the new record
    pub id: String,

    /// Reminder scheduled alongside a checkup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_id: Option<String>,
}

impl CreatedResponse {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            success: true,
            id: id.into(),
            reminder_id: None,
        }
    }
}

/// Lowercase the resource kind and keep the identifier as given ("Patient AbC" -> "patient AbC")
fn resource_label(resource: &str) -> String {
    match resource.split_once(' ') {
        Some((kind, id)) => format!("{} {}", kind.to_lowercase(), id),
        None => resource.to_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_errors_map_to_status() {
        let cases = [
            (ServiceError::InvalidInput("cycle".into()), StatusCode::BAD_REQUEST, "invalid_input"),
            (ServiceError::Validation("name".into()), StatusCode::BAD_REQUEST, "validation_error"),
            (ServiceError::NotFound("Patient p1".into()), StatusCode::NOT_FOUND, "not_found"),
            (ServiceError::Repository("disk".into()), StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        ];

        for (err, status, code) in cases {
            let response = ErrorResponse::from(err);
            assert_eq!(response.status(), status);
            assert_eq!(response.error, code);
        }
    }

    #[test]
    fn test_repository_details_are_not_exposed() {
        let response = ErrorResponse::from(ServiceError::Repository("no such table: patients".into()));

        assert!(!response.message.contains("patients"));
    }

    #[test]
    fn test_not_found_keeps_identifier_case() {
        let response = ErrorResponse::from(ServiceError::NotFound("Patient AbC-12".into()));

        assert_eq!(response.message, "The requested patient AbC-12 could not be found");
    }
}
