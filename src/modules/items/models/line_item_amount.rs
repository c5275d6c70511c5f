use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Computed breakdown of one line item, upserted by item id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemAmount {
    pub item_id: i64,
    pub subtotal: Decimal,
    pub tax_total: Decimal,
    /// Per-unit discount × quantity; the proportional share of a document
    /// discount is not included here
    pub discount_total: Decimal,
    pub total: Decimal,
}

/// Column of the item amount records that can be summed per document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountField {
    Subtotal,
    TaxTotal,
    DiscountTotal,
    Total,
}

impl AmountField {
    pub fn column(&self) -> &'static str {
        match self {
            AmountField::Subtotal => "item_subtotal",
            AmountField::TaxTotal => "item_tax_total",
            AmountField::DiscountTotal => "item_discount",
            AmountField::Total => "item_total",
        }
    }

    pub fn value(&self, amount: &LineItemAmount) -> Decimal {
        match self {
            AmountField::Subtotal => amount.subtotal,
            AmountField::TaxTotal => amount.tax_total,
            AmountField::DiscountTotal => amount.discount_total,
            AmountField::Total => amount.total,
        }
    }
}

/// Sums of every item amount column for one document
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ItemAmountTotals {
    pub subtotal: Decimal,
    pub tax_total: Decimal,
    pub discount_total: Decimal,
    pub total: Decimal,
}

impl ItemAmountTotals {
    /// Document discount already folded into the item totals, recovered from
    /// the sums: `subtotal - (total - tax_total + discount_total)`
    pub fn applied_document_discount(&self) -> Decimal {
        self.subtotal - (self.total - self.tax_total + self.discount_total)
    }
}

impl<'a> FromIterator<&'a LineItemAmount> for ItemAmountTotals {
    fn from_iter<I: IntoIterator<Item = &'a LineItemAmount>>(iter: I) -> Self {
        iter.into_iter().fold(Self::default(), |mut acc, amount| {
            acc.subtotal += amount.subtotal;
            acc.tax_total += amount.tax_total;
            acc.discount_total += amount.discount_total;
            acc.total += amount.total;
            acc
        })
    }
}
