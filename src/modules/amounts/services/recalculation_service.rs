use std::sync::Arc;
use tracing::debug;

use crate::core::{DocumentKind, Result, SettingsProvider};
use crate::modules::amounts::models::DocumentAmount;
use crate::modules::amounts::services::DocumentAmountService;
use crate::modules::context::RepositorySet;
use crate::modules::items::models::{GlobalDiscount, LineItemAmount};
use crate::modules::items::services::{ItemAmountCalculator, ItemAmountService};

/// Full recalculation of a document: every item, then the document.
///
/// Nothing here is transactional. Callers that need the item pass and the
/// document pass to commit together, or that may recalculate the same
/// document concurrently, must serialise and wrap the call themselves.
pub struct RecalculationService {
    repos: RepositorySet,
    settings: Arc<dyn SettingsProvider>,
}

impl RecalculationService {
    pub fn new(repos: RepositorySet, settings: Arc<dyn SettingsProvider>) -> Self {
        Self { repos, settings }
    }

    pub fn document_amounts(&self, kind: DocumentKind) -> DocumentAmountService {
        DocumentAmountService::new(kind, self.repos.clone(), self.settings.clone())
    }

    pub fn item_amounts(&self, kind: DocumentKind) -> ItemAmountService {
        ItemAmountService::new(kind, self.repos.items.clone(), self.repos.amounts.clone())
    }

    /// Recalculate and store every item amount of the document, then the
    /// document amounts
    pub async fn recalculate(
        &self,
        kind: DocumentKind,
        document_id: i64,
    ) -> Result<DocumentAmount> {
        let documents = self.document_amounts(kind);
        // a bad document tax line must fail before the item pass writes
        documents
            .tax_rates(document_id, self.settings.calculation_mode())
            .await?;

        let (_, global_discount) = self.recalculate_items(kind, document_id).await?;
        documents.calculate(document_id, &global_discount).await
    }

    /// Item pass only. The subtotal of all items is known before the first
    /// share is handed out, so every item sees the same weights.
    pub async fn recalculate_items(
        &self,
        kind: DocumentKind,
        document_id: i64,
    ) -> Result<(Vec<LineItemAmount>, GlobalDiscount)> {
        let mode = self.settings.calculation_mode();
        let document = self.repos.documents.get_document(kind, document_id).await?;
        let items = self.repos.items.items_for_document(kind, document_id).await?;

        let global_discount = GlobalDiscount::for_document(&document, &items)?;
        let (amounts, global_discount) =
            ItemAmountCalculator::calculate_batch(&items, global_discount, mode)?;

        for amount in &amounts {
            self.repos.amounts.upsert_line_item_amount(kind, amount).await?;
        }

        debug!(
            "{} {}: {} item amount(s) stored, distributed discount {}",
            kind,
            document_id,
            amounts.len(),
            global_discount.item
        );

        Ok((amounts, global_discount))
    }

    /// Re-aggregate after an item was removed, keeping the discount shares
    /// the remaining items already carry
    pub async fn recalculate_after_item_removal(
        &self,
        kind: DocumentKind,
        document_id: i64,
    ) -> Result<DocumentAmount> {
        let service = self.document_amounts(kind);
        let global_discount = service.get_global_discount(document_id).await?;
        service.calculate(document_id, &global_discount).await
    }
}
