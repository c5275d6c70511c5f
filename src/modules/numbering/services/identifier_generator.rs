use chrono::{Local, NaiveDate};
use regex::{Captures, Regex};
use std::sync::{Arc, LazyLock};
use tracing::debug;

use crate::core::Result;
use crate::modules::numbering::models::IdentifierSequence;
use crate::modules::numbering::repositories::SequenceRepository;

/// `{{{token}}}`, where the token holds no `{`, `|` or `}`
static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\{([^{|}]*)\}\}\}").expect("Valid identifier token pattern")
});

/// Generates document numbers from a group's template.
///
/// Supported tokens: `year`, `yy`, `month`, `day` (taken from the current
/// local date) and `id` (the sequence's next id, zero padded to
/// `left_pad`). Unknown tokens expand to nothing; text that does not form a
/// complete token is left as is.
pub struct IdentifierGenerator {
    sequence_repo: Arc<dyn SequenceRepository>,
}

impl IdentifierGenerator {
    pub fn new(sequence_repo: Arc<dyn SequenceRepository>) -> Self {
        Self { sequence_repo }
    }

    /// Expand a template for a given date
    pub fn expand_at(format: &str, next_id: i64, left_pad: usize, date: NaiveDate) -> String {
        TOKEN_PATTERN
            .replace_all(format, |caps: &Captures| {
                Self::token_value(&caps[1], next_id, left_pad, date)
            })
            .into_owned()
    }

    fn token_value(token: &str, next_id: i64, left_pad: usize, date: NaiveDate) -> String {
        match token {
            "year" => date.format("%Y").to_string(),
            "yy" => date.format("%y").to_string(),
            "month" => date.format("%m").to_string(),
            "day" => date.format("%d").to_string(),
            "id" => format!("{:0>width$}", next_id, width = left_pad),
            _ => String::new(),
        }
    }

    /// Generate the identifier for `sequence` as of today.
    ///
    /// The identifier uses the current `next_id`. With `advance` the stored
    /// counter is then incremented and `sequence` updated to match.
    pub async fn generate(
        &self,
        sequence: &mut IdentifierSequence,
        advance: bool,
    ) -> Result<String> {
        self.generate_at(sequence, advance, Local::now().date_naive())
            .await
    }

    /// [`IdentifierGenerator::generate`] for an explicit date
    pub async fn generate_at(
        &self,
        sequence: &mut IdentifierSequence,
        advance: bool,
        date: NaiveDate,
    ) -> Result<String> {
        sequence.validate()?;

        let identifier =
            Self::expand_at(&sequence.format, sequence.next_id, sequence.left_pad, date);

        if advance {
            self.sequence_repo.increment_next_id(sequence.id).await?;
            sequence.next_id += 1;
        }

        debug!(
            "Generated identifier {} from group {} (advanced: {})",
            identifier, sequence.id, advance
        );

        Ok(identifier)
    }

    /// Load a group's sequence and generate its next identifier
    pub async fn generate_for_group(&self, group_id: i64, advance: bool) -> Result<String> {
        let mut sequence = self.sequence_repo.get_sequence(group_id).await?;
        self.generate(&mut sequence, advance).await
    }
}
