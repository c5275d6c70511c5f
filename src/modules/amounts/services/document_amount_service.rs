use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{info, warn};

use crate::core::{CalculationMode, DocumentKind, Result, SettingsProvider};
use crate::modules::amounts::models::DocumentAmount;
use crate::modules::amounts::services::DocumentDiscount;
use crate::modules::context::RepositorySet;
use crate::modules::documents::models::Document;
use crate::modules::items::models::GlobalDiscount;
use crate::modules::taxes::models::DocumentTaxRate;
use crate::modules::taxes::services::TaxRateCalculator;

/// Rolls line item amounts up into document amounts.
///
/// One instance serves one document kind; [`DocumentAmountService::for_invoices`]
/// and [`DocumentAmountService::for_quotes`] build the two mirrors.
pub struct DocumentAmountService {
    kind: DocumentKind,
    repos: RepositorySet,
    settings: Arc<dyn SettingsProvider>,
}

impl DocumentAmountService {
    pub fn new(
        kind: DocumentKind,
        repos: RepositorySet,
        settings: Arc<dyn SettingsProvider>,
    ) -> Self {
        Self { kind, repos, settings }
    }

    pub fn for_invoices(repos: RepositorySet, settings: Arc<dyn SettingsProvider>) -> Self {
        Self::new(DocumentKind::Invoice, repos, settings)
    }

    pub fn for_quotes(repos: RepositorySet, settings: Arc<dyn SettingsProvider>) -> Self {
        Self::new(DocumentKind::Quote, repos, settings)
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Aggregate the document's item amounts and store the result.
    ///
    /// Every item must have been recalculated first. In proportional mode
    /// `global_discount.item` is the discount those item calculations handed
    /// out; legacy mode ignores it and applies the stored document discount
    /// to the grand total instead. The tax rate pass runs last and its
    /// result is returned.
    pub async fn calculate(
        &self,
        document_id: i64,
        global_discount: &GlobalDiscount,
    ) -> Result<DocumentAmount> {
        let mode = self.settings.calculation_mode();
        let document = self.repos.documents.get_document(self.kind, document_id).await?;
        let rates = self.tax_rates(document_id, mode).await?;

        let item_ids = self
            .repos
            .items
            .item_ids_for_document(self.kind, document_id)
            .await?;
        let totals = self
            .repos
            .amounts
            .sum_line_item_amounts(self.kind, &item_ids)
            .await?;

        let mut amount = DocumentAmount::empty(document_id);
        amount.item_tax_total = totals.tax_total;

        match mode {
            CalculationMode::Legacy => {
                amount.item_subtotal = totals.subtotal - totals.discount_total;
                amount.item_discount = totals.discount_total;
                let pre_discount_total = amount.item_subtotal + totals.tax_total;
                amount.set_total(self.discounted_total(&document, pre_discount_total));
            }
            CalculationMode::Proportional => {
                amount.item_subtotal =
                    totals.subtotal - totals.discount_total - global_discount.item;
                amount.item_discount = totals.discount_total + global_discount.item;
                amount.set_total(amount.item_subtotal + totals.tax_total);
            }
        }

        amount.set_paid(self.paid(document_id).await?);
        self.repos
            .amounts
            .upsert_document_amount(self.kind, &amount)
            .await?;

        let amount = self.apply_tax_rates(&document, amount, rates, mode).await?;

        if self.kind.accepts_payments() && amount.is_settled() {
            self.repos.documents.mark_paid(self.kind, document_id).await?;
            info!("{} {} fully paid", self.kind, document_id);
        }

        info!(
            kind = %self.kind,
            document_id,
            %mode,
            items = item_ids.len(),
            total = %amount.total,
            balance = %amount.balance,
            "Document amounts recalculated"
        );

        Ok(amount)
    }

    /// Apply the document's stored discount to `total` (legacy mode only)
    pub async fn calculate_discount(&self, document_id: i64, total: Decimal) -> Result<Decimal> {
        let document = self.repos.documents.get_document(self.kind, document_id).await?;
        Ok(self.discounted_total(&document, total))
    }

    /// Reconstruct the accumulator of the last item pass from the stored
    /// item amounts, for re-aggregating without recalculating the items
    pub async fn get_global_discount(&self, document_id: i64) -> Result<GlobalDiscount> {
        let document = self.repos.documents.get_document(self.kind, document_id).await?;
        let item_ids = self
            .repos
            .items
            .item_ids_for_document(self.kind, document_id)
            .await?;
        let totals = self
            .repos
            .amounts
            .sum_line_item_amounts(self.kind, &item_ids)
            .await?;

        Ok(GlobalDiscount::already_applied(
            &document,
            totals.subtotal,
            totals.applied_document_discount(),
        ))
    }

    /// Run the tax rate pass over the stored document amounts
    pub async fn calculate_taxes(&self, document_id: i64) -> Result<DocumentAmount> {
        let mode = self.settings.calculation_mode();
        let document = self.repos.documents.get_document(self.kind, document_id).await?;
        let rates = self.tax_rates(document_id, mode).await?;
        let amount = self
            .repos
            .amounts
            .get_document_amount(self.kind, document_id)
            .await?;

        self.apply_tax_rates(&document, amount, rates, mode).await
    }

    /// Document tax lines the tax rate pass will apply, all validated.
    ///
    /// Empty in proportional mode, where item tax already covers the
    /// document.
    pub async fn tax_rates(
        &self,
        document_id: i64,
        mode: CalculationMode,
    ) -> Result<Vec<DocumentTaxRate>> {
        let rates = self
            .repos
            .tax_rates
            .document_tax_rates(self.kind, document_id)
            .await?;

        if !mode.is_legacy() {
            if !rates.is_empty() {
                warn!(
                    "{} {}: ignoring {} document tax rate(s) in proportional mode",
                    self.kind,
                    document_id,
                    rates.len()
                );
            }
            return Ok(Vec::new());
        }

        rates.iter().try_for_each(DocumentTaxRate::validate)?;
        Ok(rates)
    }

    async fn apply_tax_rates(
        &self,
        document: &Document,
        mut amount: DocumentAmount,
        mut rates: Vec<DocumentTaxRate>,
        mode: CalculationMode,
    ) -> Result<DocumentAmount> {
        for rate in rates.iter_mut() {
            rate.computed_amount =
                TaxRateCalculator::rate_amount(rate, amount.item_subtotal, amount.item_tax_total)?;
        }

        for rate in &rates {
            self.repos
                .tax_rates
                .update_tax_rate_amount(self.kind, rate.id, rate.computed_amount)
                .await?;
        }

        amount.tax_total = TaxRateCalculator::tax_total(&rates);

        let mut total = amount.item_subtotal + amount.item_tax_total + amount.tax_total;
        if mode.is_legacy() {
            total = self.discounted_total(document, total);
        }
        amount.set_total(total);

        self.repos
            .amounts
            .upsert_document_amount(self.kind, &amount)
            .await?;

        Ok(amount)
    }

    async fn paid(&self, document_id: i64) -> Result<Decimal> {
        if !self.kind.accepts_payments() {
            return Ok(Decimal::ZERO);
        }
        self.repos.payments.sum_payments_for_document(document_id).await
    }

    fn discounted_total(&self, document: &Document, total: Decimal) -> Decimal {
        DocumentDiscount::apply(
            total,
            document.discount_amount,
            document.discount_percent,
            self.settings.decimal_places(),
        )
    }
}
