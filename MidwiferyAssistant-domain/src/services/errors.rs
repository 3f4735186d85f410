use thiserror::Error;

use midwifery_assistant_data::repository::RepositoryError;

/// Errors raised by the clinical calculator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClinicalError {
    /// Input outside the domain of the calculation
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Errors raised by domain services
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The calculator rejected the values
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Request failed validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Record missing or owned by another midwife
    #[error("{0} not found")]
    NotFound(String),

    /// Storage failure
    #[error("Repository error: {0}")]
    Repository(String),
}

impl From<ClinicalError> for ServiceError {
    fn from(err: ClinicalError) -> Self {
        match err {
            ClinicalError::InvalidInput(msg) => ServiceError::InvalidInput(msg),
        }
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .iter()
            .map(|(field, errors)| {
                let messages: Vec<String> = errors
                    .iter()
                    .map(|err| match &err.message {
                        Some(msg) => msg.to_string(),
                        None => format!("Invalid {}", field),
                    })
                    .collect();
                format!("{}: {}", field, messages.join(", "))
            })
            .collect::<Vec<String>>()
            .join("; ");

        ServiceError::Validation(message)
    }
}

/// Map repository errors to service errors
pub fn map_repo_error(err: RepositoryError) -> ServiceError {
    match err {
        RepositoryError::NotFound(msg) => ServiceError::NotFound(msg),
        RepositoryError::Validation(msg) => ServiceError::Validation(msg),
        _ => ServiceError::Repository(err.to_string()),
    }
}
