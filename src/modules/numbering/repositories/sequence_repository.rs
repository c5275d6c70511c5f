use async_trait::async_trait;
use sqlx::{MySqlPool, Row};

use crate::core::{AppError, Result};
use crate::modules::numbering::models::IdentifierSequence;

/// Document group numbering state
#[async_trait]
pub trait SequenceRepository: Send + Sync {
    async fn get_sequence(&self, sequence_id: i64) -> Result<IdentifierSequence>;

    /// Atomically advance `next_id` by one, `NotFound` if the group is gone
    async fn increment_next_id(&self, sequence_id: i64) -> Result<()>;
}

pub struct MySqlSequenceRepository {
    pool: MySqlPool,
}

impl MySqlSequenceRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SequenceRepository for MySqlSequenceRepository {
    async fn get_sequence(&self, sequence_id: i64) -> Result<IdentifierSequence> {
        let row = sqlx::query(
            r#"
            SELECT invoice_group_id, invoice_group_identifier_format,
                   invoice_group_next_id, invoice_group_left_pad
            FROM ip_invoice_groups
            WHERE invoice_group_id = ?
            "#,
        )
        .bind(sequence_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::not_found(format!("document group {}", sequence_id)))?;

        let left_pad: i64 = row.try_get("invoice_group_left_pad")?;

        Ok(IdentifierSequence {
            id: row.try_get("invoice_group_id")?,
            format: row.try_get("invoice_group_identifier_format")?,
            next_id: row.try_get("invoice_group_next_id")?,
            left_pad: usize::try_from(left_pad).map_err(|_| {
                AppError::validation(format!(
                    "Document group {} has a negative left pad",
                    sequence_id
                ))
            })?,
        })
    }

    async fn increment_next_id(&self, sequence_id: i64) -> Result<()> {
        let result = sqlx::query(
            "UPDATE ip_invoice_groups
             SET invoice_group_next_id = invoice_group_next_id + 1
             WHERE invoice_group_id = ?",
        )
        .bind(sequence_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("document group {}", sequence_id)));
        }

        Ok(())
    }
}
