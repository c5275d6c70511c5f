// In-process implementation of every repository.
//
// Holds plain records in memory behind one lock. Useful to callers that
// already have a document loaded and want the amounts without a database,
// and it is what the service tests run against.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;

use crate::core::{AppError, DocumentKind, Result};
use crate::modules::amounts::models::DocumentAmount;
use crate::modules::amounts::repositories::{AmountRepository, PaymentRepository};
use crate::modules::documents::models::Document;
use crate::modules::documents::repositories::DocumentRepository;
use crate::modules::items::models::{AmountField, LineItem, LineItemAmount};
use crate::modules::items::repositories::ItemRepository;
use crate::modules::numbering::models::IdentifierSequence;
use crate::modules::numbering::repositories::SequenceRepository;
use crate::modules::taxes::models::DocumentTaxRate;
use crate::modules::taxes::repositories::TaxRateRepository;

type Key = (DocumentKind, i64);

#[derive(Default)]
struct StoreState {
    documents: HashMap<Key, Document>,
    items: HashMap<Key, LineItem>,
    item_amounts: HashMap<Key, LineItemAmount>,
    document_amounts: HashMap<Key, DocumentAmount>,
    tax_rates: HashMap<Key, DocumentTaxRate>,
    payments: Vec<(i64, Decimal)>,
    paid_invoices: HashSet<i64>,
    sequences: HashMap<i64, IdentifierSequence>,
}

#[derive(Default)]
pub struct InMemoryStore {
    state: RwLock<StoreState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_document(&self, document: Document) {
        let mut state = self.state.write().await;
        state.documents.insert((document.kind, document.id), document);
    }

    pub async fn insert_item(&self, kind: DocumentKind, item: LineItem) {
        let mut state = self.state.write().await;
        state.items.insert((kind, item.id), item);
    }

    /// Drop an item together with its amount record
    pub async fn remove_item(&self, kind: DocumentKind, item_id: i64) -> Option<LineItem> {
        let mut state = self.state.write().await;
        state.item_amounts.remove(&(kind, item_id));
        state.items.remove(&(kind, item_id))
    }

    pub async fn insert_tax_rate(&self, kind: DocumentKind, rate: DocumentTaxRate) {
        let mut state = self.state.write().await;
        state.tax_rates.insert((kind, rate.id), rate);
    }

    pub async fn add_payment(&self, invoice_id: i64, amount: Decimal) {
        let mut state = self.state.write().await;
        state.payments.push((invoice_id, amount));
    }

    pub async fn insert_sequence(&self, sequence: IdentifierSequence) {
        let mut state = self.state.write().await;
        state.sequences.insert(sequence.id, sequence);
    }

    pub async fn line_item_amount(
        &self,
        kind: DocumentKind,
        item_id: i64,
    ) -> Option<LineItemAmount> {
        self.state.read().await.item_amounts.get(&(kind, item_id)).cloned()
    }

    pub async fn document_amount(
        &self,
        kind: DocumentKind,
        document_id: i64,
    ) -> Option<DocumentAmount> {
        self.state
            .read()
            .await
            .document_amounts
            .get(&(kind, document_id))
            .cloned()
    }

    pub async fn tax_rate(&self, kind: DocumentKind, id: i64) -> Option<DocumentTaxRate> {
        self.state.read().await.tax_rates.get(&(kind, id)).cloned()
    }

    pub async fn sequence(&self, id: i64) -> Option<IdentifierSequence> {
        self.state.read().await.sequences.get(&id).cloned()
    }

    pub async fn is_marked_paid(&self, invoice_id: i64) -> bool {
        self.state.read().await.paid_invoices.contains(&invoice_id)
    }
}

#[async_trait]
impl DocumentRepository for InMemoryStore {
    async fn get_document(&self, kind: DocumentKind, document_id: i64) -> Result<Document> {
        self.state
            .read()
            .await
            .documents
            .get(&(kind, document_id))
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("{} {}", kind, document_id)))
    }

    async fn mark_paid(&self, kind: DocumentKind, document_id: i64) -> Result<()> {
        if !kind.accepts_payments() {
            return Err(AppError::validation(format!("A {} cannot be marked paid", kind)));
        }

        let mut state = self.state.write().await;
        if !state.documents.contains_key(&(kind, document_id)) {
            return Err(AppError::not_found(format!("{} {}", kind, document_id)));
        }
        state.paid_invoices.insert(document_id);
        Ok(())
    }
}

#[async_trait]
impl ItemRepository for InMemoryStore {
    async fn item_ids_for_document(
        &self,
        kind: DocumentKind,
        document_id: i64,
    ) -> Result<Vec<i64>> {
        let state = self.state.read().await;
        let mut items: Vec<&LineItem> = state
            .items
            .iter()
            .filter(|((k, _), item)| *k == kind && item.document_id == document_id)
            .map(|(_, item)| item)
            .collect();
        items.sort_by_key(|item| (item.order, item.id));
        Ok(items.into_iter().map(|item| item.id).collect())
    }

    async fn get_item(&self, kind: DocumentKind, item_id: i64) -> Result<LineItem> {
        self.state
            .read()
            .await
            .items
            .get(&(kind, item_id))
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("{} item {}", kind, item_id)))
    }
}

#[async_trait]
impl AmountRepository for InMemoryStore {
    async fn upsert_line_item_amount(
        &self,
        kind: DocumentKind,
        amount: &LineItemAmount,
    ) -> Result<()> {
        let mut state = self.state.write().await;
        state.item_amounts.insert((kind, amount.item_id), amount.clone());
        Ok(())
    }

    async fn upsert_document_amount(
        &self,
        kind: DocumentKind,
        amount: &DocumentAmount,
    ) -> Result<()> {
        let mut state = self.state.write().await;
        state
            .document_amounts
            .insert((kind, amount.document_id), amount.clone());
        Ok(())
    }

    async fn sum_line_item_amount_field(
        &self,
        kind: DocumentKind,
        item_ids: &[i64],
        field: AmountField,
    ) -> Result<Decimal> {
        let state = self.state.read().await;
        Ok(item_ids
            .iter()
            .filter_map(|id| state.item_amounts.get(&(kind, *id)))
            .map(|amount| field.value(amount))
            .sum())
    }

    async fn get_document_amount(
        &self,
        kind: DocumentKind,
        document_id: i64,
    ) -> Result<DocumentAmount> {
        self.state
            .read()
            .await
            .document_amounts
            .get(&(kind, document_id))
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("{} {} amounts", kind, document_id)))
    }
}

#[async_trait]
impl PaymentRepository for InMemoryStore {
    async fn sum_payments_for_document(&self, document_id: i64) -> Result<Decimal> {
        let state = self.state.read().await;
        Ok(state
            .payments
            .iter()
            .filter(|(invoice_id, _)| *invoice_id == document_id)
            .map(|(_, amount)| *amount)
            .sum())
    }
}

#[async_trait]
impl TaxRateRepository for InMemoryStore {
    async fn document_tax_rates(
        &self,
        kind: DocumentKind,
        document_id: i64,
    ) -> Result<Vec<DocumentTaxRate>> {
        let state = self.state.read().await;
        let mut rates: Vec<DocumentTaxRate> = state
            .tax_rates
            .iter()
            .filter(|((k, _), rate)| *k == kind && rate.document_id == document_id)
            .map(|(_, rate)| rate.clone())
            .collect();
        rates.sort_by_key(|rate| rate.id);
        Ok(rates)
    }

    async fn update_tax_rate_amount(
        &self,
        kind: DocumentKind,
        id: i64,
        amount: Decimal,
    ) -> Result<()> {
        let mut state = self.state.write().await;
        let rate = state
            .tax_rates
            .get_mut(&(kind, id))
            .ok_or_else(|| AppError::not_found(format!("{} tax rate {}", kind, id)))?;
        rate.computed_amount = amount;
        Ok(())
    }
}

#[async_trait]
impl SequenceRepository for InMemoryStore {
    async fn get_sequence(&self, sequence_id: i64) -> Result<IdentifierSequence> {
        self.state
            .read()
            .await
            .sequences
            .get(&sequence_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("document group {}", sequence_id)))
    }

    async fn increment_next_id(&self, sequence_id: i64) -> Result<()> {
        let mut state = self.state.write().await;
        let sequence = state
            .sequences
            .get_mut(&sequence_id)
            .ok_or_else(|| AppError::not_found(format!("document group {}", sequence_id)))?;
        sequence.next_id += 1;
        Ok(())
    }
}
