//! Shared error types for the services crate.

use thiserror::Error;

use bank::BankError;
use quiz_core::model::QuizSummaryError;

/// Errors emitted by session services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("batch size must be > 0")]
    InvalidBatchSize,

    #[error("batch has no questions")]
    EmptyBatch,

    #[error("chosen option {choice} is outside 1..={len}")]
    ChoiceOutOfRange { choice: u32, len: usize },

    #[error("session already completed")]
    Completed,

    #[error("session not completed yet")]
    NotCompleted,

    #[error("unknown fund: {0}")]
    UnknownFund(String),

    #[error("fund {fund} has no batch {index}")]
    UnknownBatch { fund: String, index: usize },

    #[error("session lock poisoned")]
    Lock,

    #[error(transparent)]
    Summary(#[from] QuizSummaryError),

    #[error(transparent)]
    Bank(#[from] BankError),
}
