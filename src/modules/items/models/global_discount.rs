// Document-level discount spread over line items in proportional mode.
//
// Built once per recalculation from the document header and the raw item
// subtotals, then threaded through every item calculation of that pass.
// `item` accumulates the shares handed out so far.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::money::{
    percent_of, round_money, validate_non_negative, validate_percent, MONEY_SCALE,
};
use crate::core::Result;
use crate::modules::documents::models::Document;
use crate::modules::items::models::LineItem;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalDiscount {
    /// Fixed document discount
    pub amount: Decimal,
    /// Percent document discount
    pub percent: Decimal,
    /// Sum of quantity × unit price over all of the document's items
    pub items_subtotal: Decimal,
    /// Running sum of the shares allocated so far
    pub item: Decimal,
}

impl GlobalDiscount {
    /// No document discount at all
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(amount: Decimal, percent: Decimal, items_subtotal: Decimal) -> Self {
        Self {
            amount,
            percent,
            items_subtotal,
            item: Decimal::ZERO,
        }
    }

    /// Accumulator for a fresh pass over `items`
    pub fn for_document(document: &Document, items: &[LineItem]) -> Result<Self> {
        document.validate()?;
        let items_subtotal = items.iter().map(LineItem::subtotal).sum();
        Ok(Self::new(
            document.discount_amount,
            document.discount_percent,
            items_subtotal,
        ))
    }

    /// Accumulator whose shares were already applied in an earlier pass
    pub fn already_applied(document: &Document, items_subtotal: Decimal, applied: Decimal) -> Self {
        Self {
            amount: document.discount_amount,
            percent: document.discount_percent,
            items_subtotal,
            item: applied,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_non_negative("Global discount amount", self.amount)?;
        validate_percent("Global discount percent", self.percent)?;
        validate_non_negative("Items subtotal", self.items_subtotal)
    }

    /// An amount discount is set but there is no subtotal to spread it over
    pub fn is_unallocatable(&self) -> bool {
        !self.amount.is_zero() && self.items_subtotal.is_zero()
    }

    /// Share of the document discount for an item with `subtotal`.
    ///
    /// A fixed amount is split by subtotal weight. When a percent is set it
    /// replaces the amount-based share rather than adding to it.
    pub fn share_for(&self, subtotal: Decimal) -> Decimal {
        let mut share = Decimal::ZERO;

        if !self.amount.is_zero() && !self.items_subtotal.is_zero() {
            share = round_money(self.amount * (subtotal / self.items_subtotal), MONEY_SCALE);
        }

        if !self.percent.is_zero() {
            share = round_money(percent_of(subtotal, self.percent), MONEY_SCALE);
        }

        share
    }

    /// Hand out the share for `subtotal` and add it to the running sum
    pub fn allocate(&mut self, subtotal: Decimal) -> Decimal {
        let share = self.share_for(subtotal);
        self.item += share;
        share
    }
}
