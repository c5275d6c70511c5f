use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::core::money::percent_of;
use crate::core::{CalculationMode, Result};
use crate::modules::items::models::{GlobalDiscount, LineItem, LineItemAmount};

/// Computes the amount breakdown of individual line items
pub struct ItemAmountCalculator;

impl ItemAmountCalculator {
    /// Calculate one item's amounts.
    ///
    /// Legacy mode:
    /// `total = subtotal + subtotal × tax% - discount_per_unit × quantity`
    ///
    /// Proportional mode takes the item's share of the document discount
    /// first, adds it to `global_discount.item`, and taxes what is left:
    /// `total = (subtotal - share - discount_total) × (1 + tax%)`
    ///
    /// Nothing is rounded here except the discount share.
    pub fn calculate(
        item: &LineItem,
        global_discount: &mut GlobalDiscount,
        mode: CalculationMode,
    ) -> Result<LineItemAmount> {
        item.validate()?;
        if mode == CalculationMode::Proportional {
            global_discount.validate()?;
        }

        let subtotal = item.subtotal();
        let discount_total = item.discount_total();

        let amount = match mode {
            CalculationMode::Legacy => {
                let tax_total = percent_of(subtotal, item.tax_rate_percent);
                LineItemAmount {
                    item_id: item.id,
                    subtotal,
                    tax_total,
                    discount_total,
                    total: subtotal + tax_total - discount_total,
                }
            }
            CalculationMode::Proportional => {
                if global_discount.is_unallocatable() {
                    warn!(
                        "Item {}: document discount {} cannot be spread over a zero subtotal",
                        item.id, global_discount.amount
                    );
                }

                let item_discount = global_discount.allocate(subtotal);
                let taxable = subtotal - item_discount - discount_total;
                let tax_total = percent_of(taxable, item.tax_rate_percent);

                LineItemAmount {
                    item_id: item.id,
                    subtotal,
                    tax_total,
                    discount_total,
                    total: taxable + tax_total,
                }
            }
        };

        debug!(
            item_id = item.id,
            %mode,
            subtotal = %amount.subtotal,
            tax_total = %amount.tax_total,
            total = %amount.total,
            "Calculated line item amount"
        );

        Ok(amount)
    }

    /// Calculate every item of a document in one pass.
    ///
    /// `global_discount.items_subtotal` must already cover all of `items`
    /// (see [`GlobalDiscount::for_document`]); the shares are then handed out
    /// in display order. Returns the amounts in that order along with the
    /// accumulator after the last item.
    pub fn calculate_batch(
        items: &[LineItem],
        global_discount: GlobalDiscount,
        mode: CalculationMode,
    ) -> Result<(Vec<LineItemAmount>, GlobalDiscount)> {
        global_discount.validate()?;

        let mut ordered: Vec<&LineItem> = items.iter().collect();
        ordered.sort_by_key(|item| (item.order, item.id));

        ordered.into_iter().try_fold(
            (Vec::with_capacity(items.len()), global_discount),
            |(mut amounts, mut discount), item| {
                amounts.push(Self::calculate(item, &mut discount, mode)?);
                Ok((amounts, discount))
            },
        )
    }

    /// Sum of the proportional shares `calculate_batch` would hand out,
    /// without touching any accumulator
    pub fn total_share(items: &[LineItem], global_discount: &GlobalDiscount) -> Decimal {
        items
            .iter()
            .map(|item| global_discount.share_for(item.subtotal()))
            .sum()
    }
}
