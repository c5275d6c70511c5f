use std::sync::Arc;

use crate::core::{CalculationMode, DocumentKind, Result};
use crate::modules::amounts::repositories::AmountRepository;
use crate::modules::items::models::{GlobalDiscount, LineItemAmount};
use crate::modules::items::repositories::ItemRepository;
use crate::modules::items::services::ItemAmountCalculator;

/// Calculates a stored line item and upserts its amount record
pub struct ItemAmountService {
    kind: DocumentKind,
    item_repo: Arc<dyn ItemRepository>,
    amount_repo: Arc<dyn AmountRepository>,
}

impl ItemAmountService {
    pub fn new(
        kind: DocumentKind,
        item_repo: Arc<dyn ItemRepository>,
        amount_repo: Arc<dyn AmountRepository>,
    ) -> Self {
        Self {
            kind,
            item_repo,
            amount_repo,
        }
    }

    /// Recalculate one item.
    ///
    /// `global_discount` is shared with the other items of the same pass;
    /// in proportional mode this call adds the item's share to
    /// `global_discount.item`.
    pub async fn calculate(
        &self,
        item_id: i64,
        global_discount: &mut GlobalDiscount,
        mode: CalculationMode,
    ) -> Result<LineItemAmount> {
        let item = self.item_repo.get_item(self.kind, item_id).await?;
        let amount = ItemAmountCalculator::calculate(&item, global_discount, mode)?;
        self.amount_repo
            .upsert_line_item_amount(self.kind, &amount)
            .await?;
        Ok(amount)
    }
}
