// Document-level tax rates

pub mod models;
pub mod repositories;
pub mod services;

pub use models::DocumentTaxRate;
pub use repositories::{MySqlTaxRateRepository, TaxRateRepository};
pub use services::TaxRateCalculator;
