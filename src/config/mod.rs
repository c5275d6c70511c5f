use crate::core::settings::{CalculationMode, SettingsProvider};
use crate::core::{AppError, Result};
use serde::Deserialize;
use std::env;

pub mod database;

pub use database::DatabaseConfig;

/// Highest supported `DECIMAL_PLACES`
const MAX_DECIMAL_PLACES: u32 = 6;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
    pub legacy_calculation: bool,
    pub decimal_places: u32,
}

impl AppConfig {
    /// Load the calculation settings only; no database variables required
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(AppConfig {
            env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            legacy_calculation: parse_bool(
                "LEGACY_CALCULATION",
                &env::var("LEGACY_CALCULATION").unwrap_or_else(|_| "false".to_string()),
            )?,
            decimal_places: env::var("DECIMAL_PLACES")
                .unwrap_or_else(|_| "2".to_string())
                .parse()
                .map_err(|_| AppError::configuration("Invalid DECIMAL_PLACES"))?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.decimal_places > MAX_DECIMAL_PLACES {
            return Err(AppError::configuration(format!(
                "DECIMAL_PLACES must be between 0 and {}",
                MAX_DECIMAL_PLACES
            )));
        }
        Ok(())
    }
}

impl SettingsProvider for AppConfig {
    fn decimal_places(&self) -> u32 {
        self.decimal_places
    }

    fn is_legacy_calculation_mode(&self) -> bool {
        self.legacy_calculation
    }

    fn calculation_mode(&self) -> CalculationMode {
        CalculationMode::from_legacy_flag(self.legacy_calculation)
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.app.validate()?;

        if self.database.pool_size > self.database.max_connections {
            return Err(AppError::configuration(
                "DATABASE_POOL_SIZE cannot exceed DATABASE_MAX_CONNECTIONS",
            ));
        }

        Ok(())
    }
}

/// Accepts the spellings InvoicePlane's settings table and `.env` files use
fn parse_bool(name: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(AppError::configuration(format!("Invalid {}", name))),
    }
}
