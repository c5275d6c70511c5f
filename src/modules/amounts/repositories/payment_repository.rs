use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{MySqlPool, Row};

use crate::core::Result;

/// Payments ledger, read-only to the calculation core
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Sum of payments recorded against an invoice, zero if none
    async fn sum_payments_for_document(&self, document_id: i64) -> Result<Decimal>;
}

pub struct MySqlPaymentRepository {
    pool: MySqlPool,
}

impl MySqlPaymentRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentRepository for MySqlPaymentRepository {
    async fn sum_payments_for_document(&self, document_id: i64) -> Result<Decimal> {
        let row = sqlx::query(
            "SELECT COALESCE(SUM(payment_amount), 0) AS paid FROM ip_payments WHERE invoice_id = ?",
        )
        .bind(document_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.try_get::<Decimal, _>("paid")?)
    }
}
