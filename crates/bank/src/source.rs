use thiserror::Error;

use quiz_core::model::{QuestionError, QuestionRecord};

/// Errors surfaced while loading the question bank.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BankError {
    #[error("failed to read question bank: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse question bank: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid question record at row {row}: {source}")]
    InvalidRecord {
        row: usize,
        #[source]
        source: QuestionError,
    },

    #[error("row {row}: field `{field}` is not a valid number")]
    InvalidField { row: usize, field: &'static str },
}

/// Read-only source of question records.
///
/// The bank is consumed once at startup; everything downstream treats the
/// returned records as immutable for the process lifetime.
pub trait QuestionSource {
    /// Load and validate all question records.
    ///
    /// # Errors
    ///
    /// Returns `BankError` if the underlying data cannot be read or a
    /// record fails validation.
    fn load(&self) -> Result<Vec<QuestionRecord>, BankError>;
}

/// In-memory source over prebuilt records, for tests and prototyping.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    records: Vec<QuestionRecord>,
}

impl InMemorySource {
    #[must_use]
    pub fn new(records: Vec<QuestionRecord>) -> Self {
        Self { records }
    }
}

impl QuestionSource for InMemorySource {
    fn load(&self) -> Result<Vec<QuestionRecord>, BankError> {
        Ok(self.records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::FundId;

    #[test]
    fn in_memory_source_returns_records() {
        let record = QuestionRecord::new(
            FundId::new("1").unwrap(),
            "1",
            2,
            "Q",
            vec!["a".into(), "b".into()],
            1,
        )
        .unwrap();
        let source = InMemorySource::new(vec![record.clone()]);

        let loaded = source.load().unwrap();
        assert_eq!(loaded, vec![record]);
    }
}
