use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::money::validate_percent;
use crate::core::Result;

/// A tax line applied to a whole invoice or quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentTaxRate {
    pub id: i64,
    pub document_id: i64,
    pub tax_rate_id: i64,
    pub tax_rate_percent: Decimal,
    /// Tax the item subtotal plus item tax instead of the item subtotal alone
    pub include_item_tax: bool,
    /// Last computed amount of this tax line
    pub computed_amount: Decimal,
}

impl DocumentTaxRate {
    pub fn new(
        id: i64,
        document_id: i64,
        tax_rate_id: i64,
        tax_rate_percent: Decimal,
        include_item_tax: bool,
    ) -> Self {
        Self {
            id,
            document_id,
            tax_rate_id,
            tax_rate_percent,
            include_item_tax,
            computed_amount: Decimal::ZERO,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_percent("Document tax rate percent", self.tax_rate_percent)
    }
}
