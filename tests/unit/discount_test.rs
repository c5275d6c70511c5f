// Property-based tests for the legacy document discount and money rounding

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use invoiceplane_calc::amounts::DocumentDiscount;
use invoiceplane_calc::core::money::{normalize_fixed, round_money};

fn cents(value: u64) -> Decimal {
    Decimal::new(value as i64, 2)
}

proptest! {
    #[test]
    fn test_no_discount_is_identity(total in 0u64..1_000_000_000) {
        let total = cents(total);
        prop_assert_eq!(DocumentDiscount::apply(total, Decimal::ZERO, Decimal::ZERO, 2), total);
    }

    #[test]
    fn test_amount_only_is_subtracted_exactly(
        total in 0u64..1_000_000_000,
        amount in 0u64..1_000_000,
    ) {
        let (total, amount) = (cents(total), cents(amount));
        prop_assert_eq!(DocumentDiscount::apply(total, amount, Decimal::ZERO, 2), total - amount);
    }

    #[test]
    fn test_percent_share_rounded_to_cents(
        total in 0u64..1_000_000_000,
        percent_bp in 0u64..=10_000,
    ) {
        let total = cents(total);
        let percent = cents(percent_bp);

        let discounted = DocumentDiscount::apply(total, Decimal::ZERO, percent, 2);

        let share = total - discounted;
        prop_assert_eq!(share, share.round_dp(2));
        prop_assert!(share >= Decimal::ZERO);
        prop_assert!(share <= total);
        prop_assert!((share - total * percent / dec!(100)).abs() <= dec!(0.005));
    }

    #[test]
    fn test_normalize_fixed_matches_round_money(
        value in -1_000_000_000i64..1_000_000_000,
        places in 0u32..=4,
    ) {
        let value = Decimal::new(value, 4);
        let normalized = normalize_fixed(value, places);
        prop_assert_eq!(normalized, round_money(value, places));
        prop_assert_eq!(normalized.scale(), places);
    }

    #[test]
    fn test_round_money_is_symmetric(value in 0i64..1_000_000_000) {
        let value = Decimal::new(value, 3);
        prop_assert_eq!(round_money(-value, 2), -round_money(value, 2));
    }
}
