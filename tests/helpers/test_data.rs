// Test data factory for documents, items and services over InMemoryStore

use rust_decimal_macros::dec;
use std::sync::Arc;

use invoiceplane_calc::amounts::{DocumentAmountService, RecalculationService};
use invoiceplane_calc::core::settings::StaticSettings;
use invoiceplane_calc::documents::Document;
use invoiceplane_calc::items::LineItem;
use invoiceplane_calc::{CalculationMode, DocumentKind, InMemoryStore, RepositorySet};

/// Item ids of the two-item fixture document
pub const FIRST_ITEM: i64 = 101;
pub const SECOND_ITEM: i64 = 102;

pub fn repositories(store: &Arc<InMemoryStore>) -> RepositorySet {
    RepositorySet::from_store(store.clone())
}

pub fn recalculation_service(
    store: &Arc<InMemoryStore>,
    mode: CalculationMode,
) -> RecalculationService {
    RecalculationService::new(repositories(store), Arc::new(StaticSettings::new(mode)))
}

pub fn document_service(
    store: &Arc<InMemoryStore>,
    kind: DocumentKind,
    mode: CalculationMode,
) -> DocumentAmountService {
    DocumentAmountService::new(kind, repositories(store), Arc::new(StaticSettings::new(mode)))
}

/// Item 1: 2 × 50 at 10 %, item 2: 1 × 100 at 10 %
pub fn two_items(document_id: i64) -> Vec<LineItem> {
    vec![
        LineItem::new(FIRST_ITEM, document_id, dec!(2), dec!(50))
            .with_tax_rate(dec!(10))
            .with_order(1),
        LineItem::new(SECOND_ITEM, document_id, dec!(1), dec!(100))
            .with_tax_rate(dec!(10))
            .with_order(2),
    ]
}

/// Store holding one document without discount and the two fixture items
pub async fn seeded_store(kind: DocumentKind, document_id: i64) -> Arc<InMemoryStore> {
    seeded_store_with(Document::new(kind, document_id)).await
}

pub async fn seeded_store_with(document: Document) -> Arc<InMemoryStore> {
    let store = Arc::new(InMemoryStore::new());
    let kind = document.kind;
    let id = document.id;
    store.insert_document(document).await;
    for item in two_items(id) {
        store.insert_item(kind, item).await;
    }
    store
}
