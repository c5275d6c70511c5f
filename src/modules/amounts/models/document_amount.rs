use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::money::zero_money;

/// Rolled-up amounts of one invoice or quote, upserted by document id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentAmount {
    pub document_id: i64,
    /// Item subtotals less item discounts (and, in proportional mode, less
    /// the distributed document discount)
    pub item_subtotal: Decimal,
    pub item_tax_total: Decimal,
    /// Sum of the document-level tax rate amounts
    pub tax_total: Decimal,
    pub total: Decimal,
    pub paid: Decimal,
    pub balance: Decimal,
    /// Discount applied at item level, per-unit discounts plus any
    /// distributed document discount
    pub item_discount: Decimal,
}

impl DocumentAmount {
    /// Empty amounts for a document without items
    pub fn empty(document_id: i64) -> Self {
        Self {
            document_id,
            item_subtotal: Decimal::ZERO,
            item_tax_total: Decimal::ZERO,
            tax_total: zero_money(),
            total: Decimal::ZERO,
            paid: Decimal::ZERO,
            balance: Decimal::ZERO,
            item_discount: Decimal::ZERO,
        }
    }

    /// Set a new total and keep `balance == total - paid`
    pub fn set_total(&mut self, total: Decimal) {
        self.total = total;
        self.balance = total - self.paid;
    }

    /// Set the amount received and keep `balance == total - paid`
    pub fn set_paid(&mut self, paid: Decimal) {
        self.paid = paid;
        self.balance = self.total - paid;
    }

    /// Fully settled by actual payments
    pub fn is_settled(&self) -> bool {
        self.balance.is_zero() && !self.paid.is_zero()
    }
}
