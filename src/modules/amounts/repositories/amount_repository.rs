use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{MySqlPool, Row};

use crate::core::{AppError, DocumentKind, Result};
use crate::modules::amounts::models::DocumentAmount;
use crate::modules::items::models::{AmountField, ItemAmountTotals, LineItemAmount};

/// Storage for computed item and document amounts
#[async_trait]
pub trait AmountRepository: Send + Sync {
    /// Insert or replace the amount record of `amount.item_id`
    async fn upsert_line_item_amount(
        &self,
        kind: DocumentKind,
        amount: &LineItemAmount,
    ) -> Result<()>;

    /// Insert or replace the amount record of `amount.document_id`
    async fn upsert_document_amount(
        &self,
        kind: DocumentKind,
        amount: &DocumentAmount,
    ) -> Result<()>;

    /// Sum one column over the amount records of `item_ids`; zero when empty
    async fn sum_line_item_amount_field(
        &self,
        kind: DocumentKind,
        item_ids: &[i64],
        field: AmountField,
    ) -> Result<Decimal>;

    /// Stored document amounts, `NotFound` if never calculated
    async fn get_document_amount(
        &self,
        kind: DocumentKind,
        document_id: i64,
    ) -> Result<DocumentAmount>;

    /// Every summable column over the amount records of `item_ids`
    async fn sum_line_item_amounts(
        &self,
        kind: DocumentKind,
        item_ids: &[i64],
    ) -> Result<ItemAmountTotals> {
        if item_ids.is_empty() {
            return Ok(ItemAmountTotals::default());
        }

        Ok(ItemAmountTotals {
            subtotal: self
                .sum_line_item_amount_field(kind, item_ids, AmountField::Subtotal)
                .await?,
            tax_total: self
                .sum_line_item_amount_field(kind, item_ids, AmountField::TaxTotal)
                .await?,
            discount_total: self
                .sum_line_item_amount_field(kind, item_ids, AmountField::DiscountTotal)
                .await?,
            total: self
                .sum_line_item_amount_field(kind, item_ids, AmountField::Total)
                .await?,
        })
    }
}

pub struct MySqlAmountRepository {
    pool: MySqlPool,
}

impl MySqlAmountRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn exists(&self, sql: &str, id: i64) -> Result<bool> {
        let count: i64 = sqlx::query(sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?
            .try_get(0)?;
        Ok(count > 0)
    }
}

#[async_trait]
impl AmountRepository for MySqlAmountRepository {
    async fn upsert_line_item_amount(
        &self,
        kind: DocumentKind,
        amount: &LineItemAmount,
    ) -> Result<()> {
        let p = kind.prefix();
        let exists = self
            .exists(
                &format!("SELECT COUNT(*) FROM ip_{p}_item_amounts WHERE item_id = ?"),
                amount.item_id,
            )
            .await?;

        let sql = if exists {
            format!(
                "UPDATE ip_{p}_item_amounts
                 SET item_subtotal = ?, item_tax_total = ?, item_discount = ?, item_total = ?
                 WHERE item_id = ?"
            )
        } else {
            format!(
                "INSERT INTO ip_{p}_item_amounts
                 (item_subtotal, item_tax_total, item_discount, item_total, item_id)
                 VALUES (?, ?, ?, ?, ?)"
            )
        };

        sqlx::query(&sql)
            .bind(amount.subtotal)
            .bind(amount.tax_total)
            .bind(amount.discount_total)
            .bind(amount.total)
            .bind(amount.item_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn upsert_document_amount(
        &self,
        kind: DocumentKind,
        amount: &DocumentAmount,
    ) -> Result<()> {
        let p = kind.prefix();
        let exists = self
            .exists(
                &format!("SELECT COUNT(*) FROM ip_{p}_amounts WHERE {p}_id = ?"),
                amount.document_id,
            )
            .await?;

        let mut columns = vec![
            format!("{p}_item_subtotal"),
            format!("{p}_item_tax_total"),
            format!("{p}_tax_total"),
            format!("{p}_total"),
        ];
        if kind.accepts_payments() {
            columns.push(format!("{p}_paid"));
            columns.push(format!("{p}_balance"));
        }

        let sql = if exists {
            let assignments: Vec<String> = columns.iter().map(|c| format!("{c} = ?")).collect();
            format!(
                "UPDATE ip_{p}_amounts SET {} WHERE {p}_id = ?",
                assignments.join(", ")
            )
        } else {
            let placeholders = vec!["?"; columns.len() + 1].join(", ");
            format!(
                "INSERT INTO ip_{p}_amounts ({}, {p}_id) VALUES ({placeholders})",
                columns.join(", ")
            )
        };

        let mut query = sqlx::query(&sql)
            .bind(amount.item_subtotal)
            .bind(amount.item_tax_total)
            .bind(amount.tax_total)
            .bind(amount.total);
        if kind.accepts_payments() {
            query = query.bind(amount.paid).bind(amount.balance);
        }

        query.bind(amount.document_id).execute(&self.pool).await?;

        Ok(())
    }

    async fn sum_line_item_amount_field(
        &self,
        kind: DocumentKind,
        item_ids: &[i64],
        field: AmountField,
    ) -> Result<Decimal> {
        if item_ids.is_empty() {
            return Ok(Decimal::ZERO);
        }

        let placeholders = vec!["?"; item_ids.len()].join(", ");
        let sql = format!(
            "SELECT COALESCE(SUM({}), 0) AS total FROM ip_{}_item_amounts WHERE item_id IN ({})",
            field.column(),
            kind.prefix(),
            placeholders
        );

        let mut query = sqlx::query(&sql);
        for id in item_ids {
            query = query.bind(*id);
        }

        let row = query.fetch_one(&self.pool).await?;
        Ok(row.try_get::<Decimal, _>("total")?)
    }

    async fn get_document_amount(
        &self,
        kind: DocumentKind,
        document_id: i64,
    ) -> Result<DocumentAmount> {
        let p = kind.prefix();
        // The schema has no document-level item discount column, so it is
        // summed from the item amount records
        let (paid, balance) = if kind.accepts_payments() {
            (format!("{p}_paid"), format!("{p}_balance"))
        } else {
            ("0".to_string(), format!("{p}_total"))
        };
        let sql = format!(
            "SELECT a.{p}_item_subtotal AS item_subtotal,
                    a.{p}_item_tax_total AS item_tax_total,
                    a.{p}_tax_total AS tax_total,
                    a.{p}_total AS total,
                    CAST({paid} AS DECIMAL(20,2)) AS paid,
                    CAST({balance} AS DECIMAL(20,2)) AS balance,
                    (SELECT COALESCE(SUM(ia.item_discount), 0)
                     FROM ip_{p}_item_amounts ia
                     JOIN ip_{p}_items i ON i.item_id = ia.item_id
                     WHERE i.{p}_id = a.{p}_id) AS item_discount
             FROM ip_{p}_amounts a
             WHERE a.{p}_id = ?"
        );

        let row = sqlx::query(&sql)
            .bind(document_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found(format!("{} {} amounts", kind, document_id)))?;

        Ok(DocumentAmount {
            document_id,
            item_subtotal: row.try_get("item_subtotal")?,
            item_tax_total: row.try_get("item_tax_total")?,
            tax_total: row.try_get("tax_total")?,
            total: row.try_get("total")?,
            paid: row.try_get("paid")?,
            balance: row.try_get("balance")?,
            item_discount: row.try_get("item_discount")?,
        })
    }
}
