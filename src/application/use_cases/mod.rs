//! Application use cases

pub mod health_check;

pub use health_check::HealthCheckUseCase;
