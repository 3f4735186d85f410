// Public entities for the MidwiferyAssistant API
// Request and response bodies that cross the HTTP boundary

pub mod biomedical;
pub mod blood_pressure;
pub mod calculator;
pub mod common;
pub mod patient;
pub mod postnatal;
