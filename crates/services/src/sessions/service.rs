use chrono::{DateTime, Utc};
use std::fmt;

use tracing::{debug, info};

use quiz_core::model::{Batch, QuestionRecord, QuizSettings, QuizSummary};
use quiz_core::time::whole_seconds_between;

use super::progress::SessionProgress;
use super::view::{AnswerRecord, SessionSnapshot};
use crate::error::SessionError;

//
// ─── ANSWER LOCK ───────────────────────────────────────────────────────────────
//

/// Logical answer lock for the current question.
///
/// `Locked` means the question has been answered; further submissions are
/// ignored until the session advances. Not a concurrency primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AnswerLock {
    Unlocked,
    Locked(AnswerRecord),
}

/// Outcome of an `advance` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The current question has not been answered yet; nothing changed.
    NotAnswered,
    /// Moved to the next question.
    Moved,
    /// The last question was answered; the session is now complete.
    Completed,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory quiz session over one batch of questions.
///
/// Steps through the batch sequentially: each question locks once answered,
/// then the session advances on explicit request. Completing the last
/// question freezes the final duration; `reset` restarts the same batch.
pub struct QuizSession {
    batch: Batch,
    settings: QuizSettings,
    current: usize,
    lock: AnswerLock,
    last_answered: bool,
    correct_count: u32,
    points: u32,
    max_points: u32,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    elapsed_secs: u32,
    final_secs: u32,
}

impl QuizSession {
    /// Start a session over the given batch.
    ///
    /// `started_at` should come from the services layer clock to keep time
    /// deterministic.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyBatch` if the batch has no questions.
    pub fn start(
        batch: Batch,
        settings: QuizSettings,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        if batch.is_empty() {
            return Err(SessionError::EmptyBatch);
        }

        let max_points = batch.max_points();
        debug!(
            fund = %batch.fund(),
            questions = batch.len(),
            max_points,
            "quiz session started"
        );

        Ok(Self {
            batch,
            settings,
            current: 0,
            lock: AnswerLock::Unlocked,
            last_answered: false,
            correct_count: 0,
            points: 0,
            max_points,
            started_at,
            completed_at: None,
            elapsed_secs: 0,
            final_secs: 0,
        })
    }

    // Accessors
    #[must_use]
    pub fn batch(&self) -> &Batch {
        &self.batch
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&QuestionRecord> {
        self.batch.get(self.current)
    }

    /// The recorded answer for the current question, if it is locked.
    #[must_use]
    pub fn answer(&self) -> Option<AnswerRecord> {
        match self.lock {
            AnswerLock::Locked(record) => Some(record),
            AnswerLock::Unlocked => None,
        }
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct_count
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
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    /// Frozen wall-clock duration; meaningful only once complete.
    #[must_use]
    pub fn final_secs(&self) -> u32 {
        self.final_secs
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.batch.len()
    }

    /// Number of questions answered so far, including the current one.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.current + usize::from(self.answer().is_some())
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Submit an answer for the current question.
    ///
    /// A locked question ignores further submissions and returns the
    /// recorded answer unchanged, so a double click cannot double-score.
    /// The index does not advance here.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` once the session has finished and
    /// `SessionError::ChoiceOutOfRange` for a 1-based option index outside
    /// the current question's options.
    pub fn submit_answer(&mut self, choice: u32) -> Result<AnswerRecord, SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }
        if let AnswerLock::Locked(record) = self.lock {
            return Ok(record);
        }
        let Some(question) = self.batch.get(self.current) else {
            return Err(SessionError::Completed);
        };

        let len = question.options().len();
        if choice == 0 || usize::try_from(choice).unwrap_or(usize::MAX) > len {
            return Err(SessionError::ChoiceOutOfRange { choice, len });
        }

        let record = AnswerRecord {
            chosen: choice,
            correct: question.correct_option(),
            is_correct: question.is_correct(choice),
        };
        if record.is_correct {
            self.correct_count = self.correct_count.saturating_add(1);
            self.points = self.points.saturating_add(question.points());
        }
        self.lock = AnswerLock::Locked(record);
        if self.current + 1 == self.batch.len() {
            self.last_answered = true;
        }

        Ok(record)
    }

    /// Move to the next question, or complete the session after the last.
    ///
    /// Advancing an unanswered question is a deliberate no-op guard, not an
    /// error. `now` freezes the final duration on completion.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` if the session already finished.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<Advance, SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }
        if self.lock == AnswerLock::Unlocked {
            return Ok(Advance::NotAnswered);
        }

        if self.last_answered {
            self.completed_at = Some(now);
            self.final_secs = whole_seconds_between(self.started_at, now);
            info!(
                fund = %self.batch.fund(),
                correct = self.correct_count,
                points = self.points,
                max_points = self.max_points,
                secs = self.final_secs,
                "quiz session completed"
            );
            return Ok(Advance::Completed);
        }

        self.current += 1;
        self.lock = AnswerLock::Unlocked;
        Ok(Advance::Moved)
    }

    /// Restart the session over the same batch, clearing all counters.
    ///
    /// Valid in any state; timekeeping restarts from `now`.
    pub fn reset(&mut self, now: DateTime<Utc>) {
        debug!(fund = %self.batch.fund(), "quiz session reset");
        self.current = 0;
        self.lock = AnswerLock::Unlocked;
        self.last_answered = false;
        self.correct_count = 0;
        self.points = 0;
        self.max_points = self.batch.max_points();
        self.started_at = now;
        self.completed_at = None;
        self.elapsed_secs = 0;
        self.final_secs = 0;
    }

    /// One-second heartbeat from the ticker; stops counting once complete.
    pub fn tick(&mut self) {
        if !self.is_complete() {
            self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        }
    }

    /// Returns a summary of the current session progress.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.batch.len(),
            position: self.current + 1,
            answered: self.answered_count(),
            is_complete: self.is_complete(),
        }
    }

    /// Full render snapshot for the presentation layer.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let question = self.current_question();
        SessionSnapshot {
            fund: self.batch.fund().clone(),
            number: question.map(|q| q.number().to_owned()).unwrap_or_default(),
            prompt: question.map(|q| q.prompt().to_owned()).unwrap_or_default(),
            options: question.map(|q| q.options().to_vec()).unwrap_or_default(),
            position: self.current + 1,
            total: self.batch.len(),
            question_points: question.map_or(0, QuestionRecord::points),
            answer: self.answer(),
            correct_count: self.correct_count,
            points: self.points,
            max_points: self.max_points,
            elapsed_secs: self.elapsed_secs,
            final_secs: self.final_secs,
            is_complete: self.is_complete(),
            time_warning: self.elapsed_secs >= self.settings.time_warning_secs(),
        }
    }

    /// Build the final score summary.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotCompleted` while the session is running.
    pub fn summary(&self) -> Result<QuizSummary, SessionError> {
        let completed_at = self.completed_at.ok_or(SessionError::NotCompleted)?;
        let total = u32::try_from(self.batch.len()).unwrap_or(u32::MAX);
        Ok(QuizSummary::from_parts(
            self.batch.fund().clone(),
            self.correct_count,
            total,
            self.points,
            self.max_points,
            self.final_secs,
            self.started_at,
            completed_at,
        )?)
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("fund", self.batch.fund())
            .field("questions", &self.batch.len())
            .field("current", &self.current)
            .field("correct_count", &self.correct_count)
            .field("points", &self.points)
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
