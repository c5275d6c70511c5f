use rust_decimal::Decimal;

use crate::core::money::{percent_of, zero_money};
use crate::core::Result;
use crate::modules::taxes::models::DocumentTaxRate;

/// Computes document-level tax lines
pub struct TaxRateCalculator;

impl TaxRateCalculator {
    /// Amount of one tax line.
    ///
    /// The base is the item subtotal, plus the item tax when the line
    /// includes item tax.
    pub fn rate_amount(
        rate: &DocumentTaxRate,
        item_subtotal: Decimal,
        item_tax_total: Decimal,
    ) -> Result<Decimal> {
        rate.validate()?;

        let base = if rate.include_item_tax {
            item_subtotal + item_tax_total
        } else {
            item_subtotal
        };

        Ok(percent_of(base, rate.tax_rate_percent))
    }

    /// Document tax total over already computed lines; `0.00` without lines
    pub fn tax_total(rates: &[DocumentTaxRate]) -> Decimal {
        if rates.is_empty() {
            return zero_money();
        }
        rates.iter().map(|rate| rate.computed_amount).sum()
    }
}
