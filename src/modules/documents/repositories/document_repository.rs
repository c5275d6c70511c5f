use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{MySqlPool, Row};

use crate::core::{AppError, DocumentKind, Result};
use crate::modules::documents::models::Document;

/// InvoicePlane status id for a paid invoice
const INVOICE_STATUS_PAID: i32 = 4;

/// Read access to document headers
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Fetch a document header, `NotFound` if it does not exist
    async fn get_document(&self, kind: DocumentKind, document_id: i64) -> Result<Document>;

    /// Flag an invoice as paid once its balance reaches zero
    async fn mark_paid(&self, kind: DocumentKind, document_id: i64) -> Result<()>;
}

pub struct MySqlDocumentRepository {
    pool: MySqlPool,
}

impl MySqlDocumentRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentRepository for MySqlDocumentRepository {
    async fn get_document(&self, kind: DocumentKind, document_id: i64) -> Result<Document> {
        let p = kind.prefix();
        let sql = format!(
            "SELECT {p}_id AS id,
                    COALESCE({p}_discount_amount, 0) AS discount_amount,
                    COALESCE({p}_discount_percent, 0) AS discount_percent
             FROM ip_{p}s
             WHERE {p}_id = ?"
        );

        let row = sqlx::query(&sql)
            .bind(document_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found(format!("{} {}", kind, document_id)))?;

        Ok(Document {
            id: row.try_get("id")?,
            kind,
            discount_amount: row.try_get::<Decimal, _>("discount_amount")?,
            discount_percent: row.try_get::<Decimal, _>("discount_percent")?,
        })
    }

    async fn mark_paid(&self, kind: DocumentKind, document_id: i64) -> Result<()> {
        if !kind.accepts_payments() {
            return Err(AppError::validation(format!("A {} cannot be marked paid", kind)));
        }

        // rows_affected is 0 for an invoice that is already paid, so it is not checked
        sqlx::query("UPDATE ip_invoices SET invoice_status_id = ? WHERE invoice_id = ?")
            .bind(INVOICE_STATUS_PAID)
            .bind(document_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
