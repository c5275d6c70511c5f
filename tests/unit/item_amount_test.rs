// Property-based tests for the line item formulas
//
// Properties tested:
// 1. legacy total = q×p + q×p×t/100 - d×q
// 2. without a document discount, proportional differs from legacy only by
//    the tax on the per-unit discount
// 3. a set percent replaces the amount-based share
// 4. the accumulator ends as the sum of the shares handed out
// 5. amount-based shares never drift more than half a cent per item

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use invoiceplane_calc::documents::Document;
use invoiceplane_calc::items::{GlobalDiscount, ItemAmountCalculator, LineItem, LineItemAmount};
use invoiceplane_calc::{CalculationMode, DocumentKind};

const LEGACY: CalculationMode = CalculationMode::Legacy;
const PROPORTIONAL: CalculationMode = CalculationMode::Proportional;

fn cents(value: u64) -> Decimal {
    Decimal::new(value as i64, 2)
}

fn item(id: i64, quantity: u32, price_cents: u64, discount_cents: u64, tax: u8) -> LineItem {
    LineItem::new(id, 1, Decimal::from(quantity), cents(price_cents))
        .with_discount(cents(discount_cents))
        .with_tax_rate(Decimal::from(tax))
}

fn calc(item: &LineItem, discount: &mut GlobalDiscount, mode: CalculationMode) -> LineItemAmount {
    ItemAmountCalculator::calculate(item, discount, mode).unwrap()
}

proptest! {
    #[test]
    fn test_legacy_total_identity(
        quantity in 0u32..1_000,
        price_cents in 0u64..10_000_000,
        discount_cents in 0u64..100_000,
        tax in 0u8..=100,
    ) {
        let item = item(1, quantity, price_cents, discount_cents, tax);
        let mut discount = GlobalDiscount::none();

        let amount = calc(&item, &mut discount, LEGACY);

        let q = Decimal::from(quantity);
        let p = cents(price_cents);
        let d = cents(discount_cents);
        let t = Decimal::from(tax);
        let expected = q * p + q * p * t / dec!(100) - d * q;

        prop_assert_eq!(amount.total.round_dp(2), expected.round_dp(2));
        prop_assert_eq!(
            amount.total,
            amount.subtotal + amount.tax_total - amount.discount_total
        );
    }

    #[test]
    fn test_proportional_without_document_discount(
        quantity in 0u32..1_000,
        price_cents in 0u64..10_000_000,
        discount_cents in 0u64..100_000,
        tax in 0u8..=100,
    ) {
        let item = item(1, quantity, price_cents, discount_cents, tax);

        let legacy = calc(&item, &mut GlobalDiscount::none(), LEGACY);
        let mut discount = GlobalDiscount::none();
        let proportional = calc(&item, &mut discount, PROPORTIONAL);

        let tax_on_discount = legacy.discount_total * Decimal::from(tax) / dec!(100);
        prop_assert_eq!(discount.item, Decimal::ZERO);
        prop_assert_eq!(proportional.subtotal, legacy.subtotal);
        prop_assert_eq!(proportional.discount_total, legacy.discount_total);
        prop_assert_eq!(
            proportional.total.round_dp(10),
            (legacy.total - tax_on_discount).round_dp(10)
        );
    }

    #[test]
    fn test_identical_without_any_discount(
        quantity in 0u32..1_000,
        price_cents in 0u64..10_000_000,
        tax in 0u8..=100,
    ) {
        let item = item(1, quantity, price_cents, 0, tax);

        let legacy = calc(&item, &mut GlobalDiscount::none(), LEGACY);
        let proportional = calc(&item, &mut GlobalDiscount::none(), PROPORTIONAL);

        prop_assert_eq!(proportional.tax_total, legacy.tax_total);
        prop_assert_eq!(proportional.total, legacy.total);
    }

    #[test]
    fn test_percent_takes_precedence_over_amount(
        price_cents in 1u64..10_000_000,
        amount_cents in 1u64..1_000_000,
        percent in 1u8..=100,
    ) {
        let item = item(1, 1, price_cents, 0, 0);
        let subtotal = cents(price_cents);
        let mut discount =
            GlobalDiscount::new(cents(amount_cents), Decimal::from(percent), subtotal * dec!(2));

        calc(&item, &mut discount, PROPORTIONAL);

        let percent_share = (subtotal * Decimal::from(percent) / dec!(100))
            .round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
        prop_assert_eq!(discount.item, percent_share);
    }

    #[test]
    fn test_accumulator_is_sum_of_shares(
        prices in prop::collection::vec(0u64..1_000_000, 3),
        amount_cents in 0u64..100_000,
    ) {
        let items: Vec<LineItem> = prices
            .iter()
            .enumerate()
            .map(|(i, price)| item(i as i64 + 1, 1, *price, 0, 10))
            .collect();
        let items_subtotal: Decimal = items.iter().map(LineItem::subtotal).sum();
        let fresh = GlobalDiscount::new(cents(amount_cents), Decimal::ZERO, items_subtotal);
        let mut discount = fresh.clone();

        let mut shares = Decimal::ZERO;
        for item in &items {
            let before = discount.item;
            let amount = calc(item, &mut discount, PROPORTIONAL);
            let share = discount.item - before;
            shares += share;
            prop_assert_eq!(amount.total, (amount.subtotal - share) * dec!(1.1));
        }

        prop_assert_eq!(discount.item, shares);
        prop_assert_eq!(discount.item, ItemAmountCalculator::total_share(&items, &fresh));
    }

    #[test]
    fn test_amount_shares_stay_close_to_amount(
        prices in prop::collection::vec(1u64..1_000_000, 1..10),
        amount_cents in 0u64..100_000,
    ) {
        let items: Vec<LineItem> = prices
            .iter()
            .enumerate()
            .map(|(i, price)| item(i as i64 + 1, 1, *price, 0, 0))
            .collect();
        let document =
            Document::new(DocumentKind::Invoice, 1).with_discount_amount(cents(amount_cents));
        let discount = GlobalDiscount::for_document(&document, &items).unwrap();

        let (_, discount) =
            ItemAmountCalculator::calculate_batch(&items, discount, PROPORTIONAL).unwrap();

        let drift = (discount.item - cents(amount_cents)).abs();
        prop_assert!(drift <= dec!(0.0051) * Decimal::from(items.len()));
    }
}

#[test]
fn test_batch_with_percent_scenario() {
    let items = vec![
        item(1, 2, 5_000, 0, 10),
        item(2, 1, 10_000, 0, 10),
    ];
    let discount = GlobalDiscount::new(Decimal::ZERO, dec!(10), dec!(200));

    let (amounts, discount) =
        ItemAmountCalculator::calculate_batch(&items, discount, PROPORTIONAL).unwrap();

    assert_eq!(discount.item, dec!(20));
    assert_eq!(amounts.iter().map(|a| a.total).sum::<Decimal>(), dec!(198));
}
