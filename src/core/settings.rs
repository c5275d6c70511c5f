use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::money::MONEY_SCALE;

/// Strategy used to spread discounts over a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculationMode {
    /// Item totals are summed first, the document discount is taken off the
    /// grand total and document-level tax rates apply on top
    Legacy,
    /// The document discount is distributed across items in proportion to
    /// their subtotal, before item tax
    Proportional,
}

impl CalculationMode {
    pub fn from_legacy_flag(legacy: bool) -> Self {
        if legacy {
            CalculationMode::Legacy
        } else {
            CalculationMode::Proportional
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, CalculationMode::Legacy)
    }
}

impl Default for CalculationMode {
    fn default() -> Self {
        CalculationMode::Proportional
    }
}

impl fmt::Display for CalculationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalculationMode::Legacy => write!(f, "legacy"),
            CalculationMode::Proportional => write!(f, "proportional"),
        }
    }
}

/// Application settings the calculation core reads
pub trait SettingsProvider: Send + Sync {
    /// Decimal places used when normalising document discounts
    fn decimal_places(&self) -> u32 {
        MONEY_SCALE
    }

    fn is_legacy_calculation_mode(&self) -> bool;

    fn calculation_mode(&self) -> CalculationMode {
        CalculationMode::from_legacy_flag(self.is_legacy_calculation_mode())
    }
}

/// Fixed settings, for callers that resolve them once up front
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticSettings {
    pub decimal_places: u32,
    pub mode: CalculationMode,
}

impl StaticSettings {
    pub fn new(mode: CalculationMode) -> Self {
        Self {
            decimal_places: MONEY_SCALE,
            mode,
        }
    }
}

impl SettingsProvider for StaticSettings {
    fn decimal_places(&self) -> u32 {
        self.decimal_places
    }

    fn is_legacy_calculation_mode(&self) -> bool {
        self.mode.is_legacy()
    }
}
