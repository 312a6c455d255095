use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::FundId;
use crate::time::format_duration;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizSummaryError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("correct answers ({correct}) exceed question count ({total})")]
    CorrectExceedsTotal { correct: u32, total: u32 },

    #[error("accumulated points ({points}) exceed maximum ({max_points})")]
    PointsExceedMax { points: u32, max_points: u32 },
}

/// Final score summary for a completed quiz session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSummary {
    fund: FundId,
    correct: u32,
    total_questions: u32,
    points: u32,
    max_points: u32,
    duration_secs: u32,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
}

impl QuizSummary {
    /// Build a summary from a finished session's counters.
    ///
    /// # Errors
    ///
    /// Returns `QuizSummaryError::InvalidTimeRange` if `completed_at` is
    /// before `started_at`, and the count/point mismatch variants when the
    /// counters violate the session invariants.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        fund: FundId,
        correct: u32,
        total_questions: u32,
        points: u32,
        max_points: u32,
        duration_secs: u32,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, QuizSummaryError> {
        if completed_at < started_at {
            return Err(QuizSummaryError::InvalidTimeRange);
        }
        if correct > total_questions {
            return Err(QuizSummaryError::CorrectExceedsTotal {
                correct,
                total: total_questions,
            });
        }
        if points > max_points {
            return Err(QuizSummaryError::PointsExceedMax { points, max_points });
        }

        Ok(Self {
            fund,
            correct,
            total_questions,
            points,
            max_points,
            duration_secs,
            started_at,
            completed_at,
        })
    }

    #[must_use]
    pub fn fund(&self) -> &FundId {
        &self.fund
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn points(&self) -> u32 {
        self.points
    }

    #[must_use]
    pub fn max_points(&self) -> u32 {
        self.max_points
    }

    #[must_use]
    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    /// Duration rendered as `"M minutes and S seconds"`.
    #[must_use]
    pub fn formatted_duration(&self) -> String {
        format_duration(self.duration_secs)
    }
}
