pub mod biomedical;
pub mod blood_pressure;
pub mod calculator;
pub mod dashboard;
pub mod health;
pub mod patients;
pub mod postnatal;

#[cfg(test)]
mod tests;

pub use health::health_check;
