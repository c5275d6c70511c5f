use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{MySqlPool, Row};

use crate::core::{AppError, DocumentKind, Result};
use crate::modules::taxes::models::DocumentTaxRate;

/// Document-level tax lines
#[async_trait]
pub trait TaxRateRepository: Send + Sync {
    async fn document_tax_rates(
        &self,
        kind: DocumentKind,
        document_id: i64,
    ) -> Result<Vec<DocumentTaxRate>>;

    /// Store the computed amount of one tax line, `NotFound` if it is gone
    async fn update_tax_rate_amount(
        &self,
        kind: DocumentKind,
        id: i64,
        amount: Decimal,
    ) -> Result<()>;
}

pub struct MySqlTaxRateRepository {
    pool: MySqlPool,
}

impl MySqlTaxRateRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaxRateRepository for MySqlTaxRateRepository {
    async fn document_tax_rates(
        &self,
        kind: DocumentKind,
        document_id: i64,
    ) -> Result<Vec<DocumentTaxRate>> {
        let p = kind.prefix();
        let sql = format!(
            "SELECT r.{p}_tax_rate_id AS id,
                    r.{p}_id AS document_id,
                    r.tax_rate_id,
                    t.tax_rate_percent,
                    r.include_item_tax,
                    COALESCE(r.{p}_tax_rate_amount, 0) AS computed_amount
             FROM ip_{p}_tax_rates r
             JOIN ip_tax_rates t ON t.tax_rate_id = r.tax_rate_id
             WHERE r.{p}_id = ?
             ORDER BY r.{p}_tax_rate_id"
        );

        let rows = sqlx::query(&sql)
            .bind(document_id)
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| -> Result<DocumentTaxRate> {
                Ok(DocumentTaxRate {
                    id: row.try_get("id")?,
                    document_id: row.try_get("document_id")?,
                    tax_rate_id: row.try_get("tax_rate_id")?,
                    tax_rate_percent: row.try_get::<Decimal, _>("tax_rate_percent")?,
                    include_item_tax: row.try_get::<i32, _>("include_item_tax")? != 0,
                    computed_amount: row.try_get::<Decimal, _>("computed_amount")?,
                })
            })
            .collect()
    }

    async fn update_tax_rate_amount(
        &self,
        kind: DocumentKind,
        id: i64,
        amount: Decimal,
    ) -> Result<()> {
        let p = kind.prefix();
        let exists: i64 = sqlx::query(&format!(
            "SELECT COUNT(*) FROM ip_{p}_tax_rates WHERE {p}_tax_rate_id = ?"
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await?
        .try_get(0)?;

        if exists == 0 {
            return Err(AppError::not_found(format!("{} tax rate {}", kind, id)));
        }

        sqlx::query(&format!(
            "UPDATE ip_{p}_tax_rates SET {p}_tax_rate_amount = ? WHERE {p}_tax_rate_id = ?"
        ))
        .bind(amount)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
