// Line item input record.
//
// Line items are created and edited by the surrounding application; the
// calculation core only reads them. The tax rate percent is the resolved
// percent of the item's tax rate (zero when the item has none).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::money::{validate_non_negative, validate_percent};
use crate::core::Result;

/// Represents a single line item of an invoice or quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: i64,

    /// Owning invoice or quote
    pub document_id: i64,

    pub quantity: Decimal,

    /// Price per unit
    pub unit_price: Decimal,

    /// Discount per unit, multiplied by quantity
    pub discount_amount_per_unit: Decimal,

    /// Item tax rate in percent (0-100)
    pub tax_rate_percent: Decimal,

    /// Position on the document
    pub order: i32,
}

impl LineItem {
    /// Create a line item without discount or tax
    pub fn new(id: i64, document_id: i64, quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            id,
            document_id,
            quantity,
            unit_price,
            discount_amount_per_unit: Decimal::ZERO,
            tax_rate_percent: Decimal::ZERO,
            order: 0,
        }
    }

    pub fn with_discount(mut self, discount_amount_per_unit: Decimal) -> Self {
        self.discount_amount_per_unit = discount_amount_per_unit;
        self
    }

    pub fn with_tax_rate(mut self, tax_rate_percent: Decimal) -> Self {
        self.tax_rate_percent = tax_rate_percent;
        self
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    /// quantity × unit_price, unrounded
    pub fn subtotal(&self) -> Decimal {
        self.quantity * self.unit_price
    }

    /// discount per unit × quantity, unrounded
    pub fn discount_total(&self) -> Decimal {
        self.discount_amount_per_unit * self.quantity
    }

    /// Reject inputs the calculation must never see
    pub fn validate(&self) -> Result<()> {
        validate_non_negative("Quantity", self.quantity)?;
        validate_non_negative("Unit price", self.unit_price)?;
        validate_non_negative("Discount per unit", self.discount_amount_per_unit)?;
        validate_percent("Tax rate percent", self.tax_rate_percent)
    }
}
