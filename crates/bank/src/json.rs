use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use quiz_core::model::{FundId, QuestionRecord};

use crate::source::{BankError, QuestionSource};

/// Scalar that appears both as a string and as an integer in the exported
/// dataset (`fondi`, `no`, `pike` and `ans` are inconsistent in the wild).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawValue {
    Int(u64),
    Text(String),
}

impl RawValue {
    fn into_string(self) -> String {
        match self {
            RawValue::Int(value) => value.to_string(),
            RawValue::Text(text) => text,
        }
    }

    fn as_u32(&self) -> Option<u32> {
        match self {
            RawValue::Int(value) => u32::try_from(*value).ok(),
            RawValue::Text(text) => text.trim().parse().ok(),
        }
    }
}

/// Persisted shape of one question row.
///
/// This mirrors the exported dataset so the loader can deserialize without
/// leaking transport quirks into the domain model.
#[derive(Debug, Deserialize)]
struct RawQuestion {
    fondi: RawValue,
    no: RawValue,
    pike: RawValue,
    question: String,
    options: Vec<String>,
    ans: RawValue,
}

impl RawQuestion {
    /// Convert the raw row into a validated domain record.
    ///
    /// `row` is the 1-based position in the file, used for error context.
    fn into_record(self, row: usize) -> Result<QuestionRecord, BankError> {
        let fund = FundId::new(self.fondi.into_string())
            .map_err(|source| BankError::InvalidRecord { row, source })?;
        let points = self
            .pike
            .as_u32()
            .ok_or(BankError::InvalidField { row, field: "pike" })?;
        let correct = self
            .ans
            .as_u32()
            .ok_or(BankError::InvalidField { row, field: "ans" })?;

        QuestionRecord::new(
            fund,
            self.no.into_string(),
            points,
            self.question,
            self.options,
            correct,
        )
        .map_err(|source| BankError::InvalidRecord { row, source })
    }
}

/// Question source backed by a JSON file holding an array of raw rows.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl QuestionSource for JsonFileSource {
    fn load(&self) -> Result<Vec<QuestionRecord>, BankError> {
        let raw = fs::read_to_string(&self.path)?;
        let rows: Vec<RawQuestion> = serde_json::from_str(&raw)?;

        rows.into_iter()
            .enumerate()
            .map(|(idx, row)| row.into_record(idx + 1))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_bank(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_and_validates_mixed_encodings() {
        // `fondi`/`pike`/`ans` as numbers in one row, strings in the next.
        let file = write_bank(
            r#"[
                {"fondi": 1, "no": 1, "pike": 2, "question": "Q1",
                 "options": ["a", "b", "c"], "ans": 3},
                {"fondi": "1", "no": "2", "pike": "4", "question": "Q2",
                 "options": ["a", "b"], "ans": "1"}
            ]"#,
        );

        let records = JsonFileSource::new(file.path()).load().unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].fund().as_str(), "1");
        assert_eq!(records[0].points(), 2);
        assert_eq!(records[0].correct_option(), 3);
        assert_eq!(records[1].number(), "2");
        assert_eq!(records[1].points(), 4);
    }

    #[test]
    fn rejects_out_of_range_answer_at_ingestion() {
        let file = write_bank(
            r#"[{"fondi": "1", "no": "1", "pike": "2", "question": "Q",
                 "options": ["a", "b"], "ans": "5"}]"#,
        );

        let err = JsonFileSource::new(file.path()).load().unwrap_err();
        assert!(matches!(err, BankError::InvalidRecord { row: 1, .. }));
    }

    #[test]
    fn rejects_unparseable_points() {
        let file = write_bank(
            r#"[{"fondi": "1", "no": "1", "pike": "many", "question": "Q",
                 "options": ["a", "b"], "ans": "1"}]"#,
        );

        let err = JsonFileSource::new(file.path()).load().unwrap_err();
        assert!(matches!(err, BankError::InvalidField { row: 1, field: "pike" }));
    }

    #[test]
    fn reports_parse_errors() {
        let file = write_bank("not json");
        let err = JsonFileSource::new(file.path()).load().unwrap_err();
        assert!(matches!(err, BankError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = JsonFileSource::new("/definitely/not/here.json")
            .load()
            .unwrap_err();
        assert!(matches!(err, BankError::Io(_)));
    }
}
