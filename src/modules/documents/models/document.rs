// Document header as the calculation core sees it.
//
// Only the fields that feed the amount pipeline are carried: the stored
// document-level discount (fixed amount and percent). Everything else about an
// invoice or quote belongs to the surrounding application.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::money::{validate_non_negative, validate_percent};
use crate::core::{DocumentKind, Result};

/// An invoice or quote header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,
    pub kind: DocumentKind,
    /// Fixed discount taken off the document
    pub discount_amount: Decimal,
    /// Percent discount taken off the document (0-100)
    pub discount_percent: Decimal,
}

impl Document {
    pub fn new(kind: DocumentKind, id: i64) -> Self {
        Self {
            id,
            kind,
            discount_amount: Decimal::ZERO,
            discount_percent: Decimal::ZERO,
        }
    }

    pub fn with_discount_amount(mut self, amount: Decimal) -> Self {
        self.discount_amount = amount;
        self
    }

    pub fn with_discount_percent(mut self, percent: Decimal) -> Self {
        self.discount_percent = percent;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_non_negative("Document discount amount", self.discount_amount)?;
        validate_percent("Document discount percent", self.discount_percent)
    }
}
