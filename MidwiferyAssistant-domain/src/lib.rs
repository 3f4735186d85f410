// MidwiferyAssistant Domain
// This crate contains the business logic for the MidwiferyAssistant application

// Services that implement business logic
pub mod services;

// Audit trail of clinical actions
pub mod audit;

// Domain entities
pub mod entities;

// Health checks and system status
pub mod health;

// Re-export the database module from the data crate for convenience
pub use midwifery_assistant_data::database;
pub use midwifery_assistant_data::repository::StorageBackend;
