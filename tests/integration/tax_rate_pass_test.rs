// Document-level tax rates (legacy mode) and the tax_total reset

#[path = "../helpers/mod.rs"]
mod helpers;

use helpers::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use invoiceplane_calc::amounts::{AmountRepository, DocumentAmount};
use invoiceplane_calc::documents::Document;
use invoiceplane_calc::items::GlobalDiscount;
use invoiceplane_calc::taxes::DocumentTaxRate;
use invoiceplane_calc::{AppError, CalculationMode, DocumentKind};

const INVOICE: i64 = 3;

#[tokio::test]
async fn test_rate_on_item_subtotal() {
    let store = seeded_store(DocumentKind::Invoice, INVOICE).await;
    store
        .insert_tax_rate(
            DocumentKind::Invoice,
            DocumentTaxRate::new(1, INVOICE, 11, dec!(5), false),
        )
        .await;
    let service = recalculation_service(&store, CalculationMode::Legacy);

    let amount = service.recalculate(DocumentKind::Invoice, INVOICE).await.unwrap();

    assert_eq!(amount.tax_total, dec!(10));
    assert_eq!(amount.total, dec!(230));
    assert_eq!(amount.balance, dec!(230));

    let rate = store.tax_rate(DocumentKind::Invoice, 1).await.unwrap();
    assert_eq!(rate.computed_amount, dec!(10));
}

#[tokio::test]
async fn test_rates_with_and_without_item_tax_are_summed() {
    let store = seeded_store(DocumentKind::Invoice, INVOICE).await;
    store
        .insert_tax_rate(
            DocumentKind::Invoice,
            DocumentTaxRate::new(1, INVOICE, 11, dec!(5), false),
        )
        .await;
    store
        .insert_tax_rate(
            DocumentKind::Invoice,
            DocumentTaxRate::new(2, INVOICE, 12, dec!(5), true),
        )
        .await;
    let service = recalculation_service(&store, CalculationMode::Legacy);

    let amount = service.recalculate(DocumentKind::Invoice, INVOICE).await.unwrap();

    // 5 % of 200 plus 5 % of 220
    assert_eq!(amount.tax_total, dec!(21));
    assert_eq!(amount.total, dec!(241));
    assert_eq!(
        store.tax_rate(DocumentKind::Invoice, 2).await.unwrap().computed_amount,
        dec!(11)
    );
}

#[tokio::test]
async fn test_document_discount_reapplied_after_taxes() {
    let document = Document::new(DocumentKind::Invoice, INVOICE).with_discount_percent(dec!(10));
    let store = seeded_store_with(document).await;
    store
        .insert_tax_rate(
            DocumentKind::Invoice,
            DocumentTaxRate::new(1, INVOICE, 11, dec!(5), true),
        )
        .await;
    store.add_payment(INVOICE, dec!(7.9)).await;
    let service = recalculation_service(&store, CalculationMode::Legacy);

    let amount = service.recalculate(DocumentKind::Invoice, INVOICE).await.unwrap();

    // 200 + 20 + 11 = 231, less 23.10
    assert_eq!(amount.total, dec!(207.9));
    assert_eq!(amount.balance, dec!(200));
}

#[tokio::test]
async fn test_no_rates_resets_tax_total_to_zero() {
    let store = seeded_store(DocumentKind::Invoice, INVOICE).await;
    store
        .upsert_document_amount(
            DocumentKind::Invoice,
            &DocumentAmount {
                document_id: INVOICE,
                item_subtotal: dec!(200),
                item_tax_total: dec!(20),
                tax_total: dec!(5),
                total: dec!(225),
                paid: dec!(25),
                balance: dec!(200),
                item_discount: Decimal::ZERO,
            },
        )
        .await
        .unwrap();
    let service = document_service(&store, DocumentKind::Invoice, CalculationMode::Legacy);

    let amount = service.calculate_taxes(INVOICE).await.unwrap();

    assert_eq!(amount.tax_total.to_string(), "0.00");
    assert_eq!(amount.total, dec!(220));
    assert_eq!(amount.balance, dec!(195));
}

#[tokio::test]
async fn test_proportional_mode_ignores_document_rates() {
    let store = seeded_store(DocumentKind::Invoice, INVOICE).await;
    store
        .insert_tax_rate(
            DocumentKind::Invoice,
            DocumentTaxRate::new(1, INVOICE, 11, dec!(5), false),
        )
        .await;
    let service = recalculation_service(&store, CalculationMode::Proportional);

    let amount = service.recalculate(DocumentKind::Invoice, INVOICE).await.unwrap();

    assert_eq!(amount.tax_total.to_string(), "0.00");
    assert_eq!(amount.total, dec!(220));
    assert_eq!(
        store.tax_rate(DocumentKind::Invoice, 1).await.unwrap().computed_amount,
        Decimal::ZERO
    );
}

#[tokio::test]
async fn test_quote_rates() {
    let store = seeded_store(DocumentKind::Quote, INVOICE).await;
    store
        .insert_tax_rate(
            DocumentKind::Quote,
            DocumentTaxRate::new(1, INVOICE, 11, dec!(8), false),
        )
        .await;
    let service = recalculation_service(&store, CalculationMode::Legacy);

    let amount = service.recalculate(DocumentKind::Quote, INVOICE).await.unwrap();

    assert_eq!(amount.tax_total, dec!(16));
    assert_eq!(amount.total, dec!(236));
    // the invoice-side rate table is untouched
    assert!(store.tax_rate(DocumentKind::Invoice, 1).await.is_none());
}

#[tokio::test]
async fn test_invalid_rate_rejected_before_any_write() {
    let store = seeded_store(DocumentKind::Invoice, INVOICE).await;
    store
        .insert_tax_rate(
            DocumentKind::Invoice,
            DocumentTaxRate::new(1, INVOICE, 11, dec!(5), false),
        )
        .await;
    store
        .insert_tax_rate(
            DocumentKind::Invoice,
            DocumentTaxRate::new(2, INVOICE, 12, dec!(150), false),
        )
        .await;
    let service = recalculation_service(&store, CalculationMode::Legacy);

    let err = service.recalculate(DocumentKind::Invoice, INVOICE).await.unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(
        store.tax_rate(DocumentKind::Invoice, 1).await.unwrap().computed_amount,
        Decimal::ZERO
    );
    assert!(store.document_amount(DocumentKind::Invoice, INVOICE).await.is_none());
    assert!(store.line_item_amount(DocumentKind::Invoice, FIRST_ITEM).await.is_none());
    assert!(store.line_item_amount(DocumentKind::Invoice, SECOND_ITEM).await.is_none());
}

#[tokio::test]
async fn test_tax_pass_with_invalid_rate_keeps_stored_amounts() {
    let store = seeded_store(DocumentKind::Invoice, INVOICE).await;
    let service = recalculation_service(&store, CalculationMode::Legacy);
    let stored = service.recalculate(DocumentKind::Invoice, INVOICE).await.unwrap();

    store
        .insert_tax_rate(
            DocumentKind::Invoice,
            DocumentTaxRate::new(1, INVOICE, 11, dec!(5), false),
        )
        .await;
    store
        .insert_tax_rate(
            DocumentKind::Invoice,
            DocumentTaxRate::new(2, INVOICE, 12, dec!(-1), true),
        )
        .await;
    let documents = document_service(&store, DocumentKind::Invoice, CalculationMode::Legacy);

    assert!(documents.calculate_taxes(INVOICE).await.is_err());
    assert!(documents
        .calculate(INVOICE, &GlobalDiscount::none())
        .await
        .is_err());

    assert_eq!(
        store.tax_rate(DocumentKind::Invoice, 1).await.unwrap().computed_amount,
        Decimal::ZERO
    );
    assert_eq!(store.document_amount(DocumentKind::Invoice, INVOICE).await, Some(stored));
}

#[tokio::test]
async fn test_proportional_mode_skips_validation_of_ignored_rates() {
    let store = seeded_store(DocumentKind::Invoice, INVOICE).await;
    store
        .insert_tax_rate(
            DocumentKind::Invoice,
            DocumentTaxRate::new(1, INVOICE, 11, dec!(150), false),
        )
        .await;
    let service = recalculation_service(&store, CalculationMode::Proportional);

    let amount = service.recalculate(DocumentKind::Invoice, INVOICE).await.unwrap();

    assert_eq!(amount.total, dec!(220));
}
