use rust_decimal::Decimal;

use crate::core::money::{normalize_fixed, round_money, ONE_HUNDRED};

/// Document-level discount of the legacy calculation
pub struct DocumentDiscount;

impl DocumentDiscount {
    /// `total - discount_amount - round(total / 100 × discount_percent)`
    ///
    /// Both discount figures are first normalised to `decimal_places` in
    /// fixed point; the percent share is rounded half away from zero.
    pub fn apply(
        total: Decimal,
        discount_amount: Decimal,
        discount_percent: Decimal,
        decimal_places: u32,
    ) -> Decimal {
        let discount_amount = normalize_fixed(discount_amount, decimal_places);
        let discount_percent = normalize_fixed(discount_percent, decimal_places);

        let percent_discount = round_money(total / ONE_HUNDRED * discount_percent, decimal_places);

        total - discount_amount - percent_discount
    }
}
