//! Clients for the external auth and calculator services.

pub mod auth_api;
pub mod calculator_api;

pub use auth_api::{AuthApi, AuthClient};
pub use calculator_api::{CalculatorApi, CalculatorClient};
