use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{MySqlPool, Row};

use crate::core::{AppError, DocumentKind, Result};
use crate::modules::items::models::LineItem;

/// Read access to a document's line items
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Ids of the document's items in display order
    async fn item_ids_for_document(&self, kind: DocumentKind, document_id: i64) -> Result<Vec<i64>>;

    /// Fetch one item with its resolved tax rate percent, `NotFound` if missing
    async fn get_item(&self, kind: DocumentKind, item_id: i64) -> Result<LineItem>;

    /// All items of the document, in display order
    async fn items_for_document(
        &self,
        kind: DocumentKind,
        document_id: i64,
    ) -> Result<Vec<LineItem>> {
        let ids = self.item_ids_for_document(kind, document_id).await?;
        let mut items = Vec::with_capacity(ids.len());
        for id in ids {
            items.push(self.get_item(kind, id).await?);
        }
        Ok(items)
    }
}

pub struct MySqlItemRepository {
    pool: MySqlPool,
}

impl MySqlItemRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemRepository for MySqlItemRepository {
    async fn item_ids_for_document(
        &self,
        kind: DocumentKind,
        document_id: i64,
    ) -> Result<Vec<i64>> {
        let p = kind.prefix();
        let sql = format!(
            "SELECT item_id FROM ip_{p}_items WHERE {p}_id = ? ORDER BY item_order, item_id"
        );

        let rows = sqlx::query(&sql)
            .bind(document_id)
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| row.try_get::<i64, _>("item_id").map_err(AppError::from))
            .collect()
    }

    async fn get_item(&self, kind: DocumentKind, item_id: i64) -> Result<LineItem> {
        let p = kind.prefix();
        let sql = format!(
            "SELECT i.item_id,
                    i.{p}_id AS document_id,
                    i.item_quantity,
                    i.item_price,
                    COALESCE(i.item_discount_amount, 0) AS item_discount_amount,
                    COALESCE(t.tax_rate_percent, 0) AS tax_rate_percent,
                    i.item_order
             FROM ip_{p}_items i
             LEFT JOIN ip_tax_rates t ON t.tax_rate_id = i.item_tax_rate_id
             WHERE i.item_id = ?"
        );

        let row = sqlx::query(&sql)
            .bind(item_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found(format!("{} item {}", kind, item_id)))?;

        Ok(LineItem {
            id: row.try_get("item_id")?,
            document_id: row.try_get("document_id")?,
            quantity: row.try_get::<Decimal, _>("item_quantity")?,
            unit_price: row.try_get::<Decimal, _>("item_price")?,
            discount_amount_per_unit: row.try_get::<Decimal, _>("item_discount_amount")?,
            tax_rate_percent: row.try_get::<Decimal, _>("tax_rate_percent")?,
            order: row.try_get("item_order")?,
        })
    }
}
