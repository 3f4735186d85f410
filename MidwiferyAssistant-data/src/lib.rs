// MidwiferyAssistant Data
// This crate handles persistence for patients, clinical measurements and postnatal care

// Database connection management
pub mod database;

// Repository implementations for data access
pub mod repository;

// Data storage models
pub mod models;
