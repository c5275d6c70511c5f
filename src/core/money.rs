//! Money helpers shared by the item and document calculations.
//!
//! Every figure is a `rust_decimal::Decimal`. Intermediate results keep their
//! full precision; only the explicit call sites below round, and they always
//! round half away from zero.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::core::{AppError, Result};

/// Default number of decimal places for money figures
pub const MONEY_SCALE: u32 = 2;

/// 100, for percent arithmetic
pub const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Round to `decimal_places` using round-half-away-from-zero
pub fn round_money(amount: Decimal, decimal_places: u32) -> Decimal {
    amount.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero)
}

/// Fixed-point normalisation: the value as it would read after being
/// formatted with exactly `decimal_places` digits and parsed back.
///
/// Unlike [`round_money`] the result always carries scale `decimal_places`,
/// so `normalize_fixed(5, 2)` displays as `5.00`.
pub fn normalize_fixed(amount: Decimal, decimal_places: u32) -> Decimal {
    let mut normalized = round_money(amount, decimal_places);
    normalized.rescale(decimal_places);
    normalized
}

/// Zero with a money scale, displays as `0.00`
pub fn zero_money() -> Decimal {
    Decimal::new(0, MONEY_SCALE)
}

/// `amount * (percent / 100)`
pub fn percent_of(amount: Decimal, percent: Decimal) -> Decimal {
    amount * (percent / ONE_HUNDRED)
}

/// Reject negative values
pub fn validate_non_negative(field: &str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO {
        return Err(AppError::validation(format!(
            "{} must be non-negative, got: {}",
            field, value
        )));
    }
    Ok(())
}

/// Reject percentages outside 0..=100
pub fn validate_percent(field: &str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO || value > ONE_HUNDRED {
        return Err(AppError::validation(format!(
            "{} must be between 0 and 100, got: {}",
            field, value
        )));
    }
    Ok(())
}
