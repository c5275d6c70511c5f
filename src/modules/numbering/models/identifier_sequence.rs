use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// Numbering state of a document group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierSequence {
    /// Document group id
    pub id: i64,
    /// Template such as `INV-{{{year}}}-{{{id}}}`
    pub format: String,
    /// Number the next generated identifier receives
    pub next_id: i64,
    /// Minimum width of `{{{id}}}`, zero padded
    pub left_pad: usize,
}

impl IdentifierSequence {
    pub fn new(id: i64, format: impl Into<String>, next_id: i64, left_pad: usize) -> Self {
        Self {
            id,
            format: format.into(),
            next_id,
            left_pad,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.next_id < 1 {
            return Err(AppError::validation(format!(
                "Sequence {} next id must be at least 1, got: {}",
                self.id, self.next_id
            )));
        }
        Ok(())
    }
}
