use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("fund key cannot be empty")]
    EmptyFund,

    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("question needs at least two options, got {len}")]
    TooFewOptions { len: usize },

    #[error("correct option {correct} is outside 1..={len}")]
    CorrectOptionOutOfRange { correct: u32, len: usize },
}

//
// ─── FUND ──────────────────────────────────────────────────────────────────────
//

/// Validated partition key for the question bank ("fondi" in the source data).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FundId(String);

impl FundId {
    /// Create a validated fund key.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyFund` if the key is empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, QuestionError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(QuestionError::EmptyFund);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for FundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FundId({})", self.0)
    }
}

impl fmt::Display for FundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// One multiple-choice question as supplied by the question bank.
///
/// Immutable once constructed; all invariants are checked at ingestion so a
/// malformed record can never surface mid-quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRecord {
    fund: FundId,
    number: String,
    points: u32,
    prompt: String,
    options: Vec<String>,
    correct_option: u32,
}

impl QuestionRecord {
    /// Creates a validated question record.
    ///
    /// `correct_option` is 1-based, matching the source dataset.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyPrompt` for a blank prompt,
    /// `QuestionError::TooFewOptions` for fewer than two options, and
    /// `QuestionError::CorrectOptionOutOfRange` when `correct_option` does
    /// not reference one of `options`.
    pub fn new(
        fund: FundId,
        number: impl Into<String>,
        points: u32,
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_option: u32,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }

        let len = options.len();
        if len < 2 {
            return Err(QuestionError::TooFewOptions { len });
        }
        if correct_option == 0 || usize::try_from(correct_option).unwrap_or(usize::MAX) > len {
            return Err(QuestionError::CorrectOptionOutOfRange {
                correct: correct_option,
                len,
            });
        }

        Ok(Self {
            fund,
            number: number.into(),
            points,
            prompt: prompt.trim().to_string(),
            options,
            correct_option,
        })
    }

    // Accessors
    #[must_use]
    pub fn fund(&self) -> &FundId {
        &self.fund
    }

    /// Display-only ordinal of the question within its fund.
    #[must_use]
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Points awarded when this question is answered correctly.
    #[must_use]
    pub fn points(&self) -> u32 {
        self.points
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// 1-based index of the correct option.
    #[must_use]
    pub fn correct_option(&self) -> u32 {
        self.correct_option
    }

    /// Compares a 1-based choice with the correct option.
    #[must_use]
    pub fn is_correct(&self, choice: u32) -> bool {
        choice == self.correct_option
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn options(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("option {i}")).collect()
    }

    #[test]
    fn fund_id_trims_and_rejects_empty() {
        let fund = FundId::new("  3  ").unwrap();
        assert_eq!(fund.as_str(), "3");

        let err = FundId::new("   ").unwrap_err();
        assert_eq!(err, QuestionError::EmptyFund);
    }

    #[test]
    fn question_new_happy_path() {
        let fund = FundId::new("1").unwrap();
        let question =
            QuestionRecord::new(fund.clone(), "12", 3, "  What now?  ", options(4), 2).unwrap();

        assert_eq!(question.fund(), &fund);
        assert_eq!(question.number(), "12");
        assert_eq!(question.points(), 3);
        assert_eq!(question.prompt(), "What now?");
        assert_eq!(question.options().len(), 4);
        assert_eq!(question.correct_option(), 2);
    }

    #[test]
    fn question_rejects_blank_prompt() {
        let fund = FundId::new("1").unwrap();
        let err = QuestionRecord::new(fund, "1", 1, "   ", options(3), 1).unwrap_err();
        assert_eq!(err, QuestionError::EmptyPrompt);
    }

    #[test]
    fn question_rejects_too_few_options() {
        let fund = FundId::new("1").unwrap();
        let err = QuestionRecord::new(fund, "1", 1, "Q", options(1), 1).unwrap_err();
        assert_eq!(err, QuestionError::TooFewOptions { len: 1 });
    }

    #[test]
    fn question_rejects_out_of_range_answer() {
        let fund = FundId::new("1").unwrap();

        let err =
            QuestionRecord::new(fund.clone(), "1", 1, "Q", options(3), 0).unwrap_err();
        assert_eq!(err, QuestionError::CorrectOptionOutOfRange { correct: 0, len: 3 });

        let err = QuestionRecord::new(fund, "1", 1, "Q", options(3), 4).unwrap_err();
        assert_eq!(err, QuestionError::CorrectOptionOutOfRange { correct: 4, len: 3 });
    }

    #[test]
    fn is_correct_uses_one_based_indexing() {
        let fund = FundId::new("1").unwrap();
        let question = QuestionRecord::new(fund, "1", 1, "Q", options(3), 3).unwrap();

        assert!(question.is_correct(3));
        assert!(!question.is_correct(1));
        assert!(!question.is_correct(0));
    }
}
