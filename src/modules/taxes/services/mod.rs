pub mod tax_rate_calculator;

pub use tax_rate_calculator::TaxRateCalculator;
