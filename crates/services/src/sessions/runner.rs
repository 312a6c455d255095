use std::sync::{Arc, Mutex};

use tracing::info;

use bank::QuestionSource;
use quiz_core::Clock;
use quiz_core::model::{Batch, FundId, QuizSettings, QuizSummary};

use super::batches::{BatchPlanner, FundPlan};
use super::progress::SessionProgress;
use super::service::{Advance, QuizSession};
use super::ticker::SessionTicker;
use super::view::{AnswerRecord, SessionSnapshot};
use crate::error::SessionError;

//
// ─── RUNNER ────────────────────────────────────────────────────────────────────
//

/// A running quiz: the shared session plus its live ticker.
///
/// One user action is processed to completion at a time; the ticker is the
/// only autonomous event source. Dropping the runner cancels the ticker,
/// so navigating away from a session cannot leak a running clock.
#[derive(Debug)]
pub struct QuizRunner {
    clock: Clock,
    session: Arc<Mutex<QuizSession>>,
    ticker: Option<SessionTicker>,
}

impl QuizRunner {
    fn start(batch: Batch, settings: QuizSettings, clock: Clock) -> Result<Self, SessionError> {
        let session = QuizSession::start(batch, settings, clock.now())?;
        let session = Arc::new(Mutex::new(session));
        let ticker = SessionTicker::spawn(Arc::clone(&session));
        Ok(Self {
            clock,
            session,
            ticker: Some(ticker),
        })
    }

    /// Submit an answer for the current question.
    ///
    /// # Errors
    ///
    /// Propagates `SessionError` from the session; see `QuizSession::submit_answer`.
    pub fn submit_answer(&self, choice: u32) -> Result<AnswerRecord, SessionError> {
        let mut guard = self.session.lock().map_err(|_| SessionError::Lock)?;
        guard.submit_answer(choice)
    }

    /// Advance to the next question; completing the batch stops the ticker.
    ///
    /// # Errors
    ///
    /// Propagates `SessionError` from the session; see `QuizSession::advance`.
    pub fn advance(&mut self) -> Result<Advance, SessionError> {
        let now = self.clock.now();
        let outcome = {
            let mut guard = self.session.lock().map_err(|_| SessionError::Lock)?;
            guard.advance(now)?
        };
        if outcome == Advance::Completed {
            if let Some(ticker) = self.ticker.take() {
                ticker.cancel();
            }
        }
        Ok(outcome)
    }

    /// Restart the same batch from the beginning and restart the ticker.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Lock` if the session lock is poisoned.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        // Cancel before spawning: two live tickers would double-count.
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
        {
            let mut guard = self.session.lock().map_err(|_| SessionError::Lock)?;
            guard.reset(self.clock.now());
        }
        self.ticker = Some(SessionTicker::spawn(Arc::clone(&self.session)));
        Ok(())
    }

    /// Render snapshot of the current state.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Lock` if the session lock is poisoned.
    pub fn snapshot(&self) -> Result<SessionSnapshot, SessionError> {
        let guard = self.session.lock().map_err(|_| SessionError::Lock)?;
        Ok(guard.snapshot())
    }

    /// Progress counters of the current state.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Lock` if the session lock is poisoned.
    pub fn progress(&self) -> Result<SessionProgress, SessionError> {
        let guard = self.session.lock().map_err(|_| SessionError::Lock)?;
        Ok(guard.progress())
    }

    /// Whether the session reached its terminal state.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Lock` if the session lock is poisoned.
    pub fn is_complete(&self) -> Result<bool, SessionError> {
        let guard = self.session.lock().map_err(|_| SessionError::Lock)?;
        Ok(guard.is_complete())
    }

    /// Final score summary; only available once complete.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotCompleted` while the session is running.
    pub fn summary(&self) -> Result<QuizSummary, SessionError> {
        let guard = self.session.lock().map_err(|_| SessionError::Lock)?;
        guard.summary()
    }
}

//
// ─── LOOP SERVICE ──────────────────────────────────────────────────────────────
//

/// Orchestrates bank loading, batch planning and session startup.
///
/// The bank is loaded and validated once at construction; fund plans are
/// precomputed for the selection screen and reused for every session.
#[derive(Debug)]
pub struct QuizLoopService {
    clock: Clock,
    settings: QuizSettings,
    plans: Vec<FundPlan>,
}

impl QuizLoopService {
    /// Load the question bank and precompute fund plans.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Bank` when the source fails to load or a
    /// record is rejected at ingestion.
    pub fn new(
        source: &dyn QuestionSource,
        clock: Clock,
        settings: QuizSettings,
    ) -> Result<Self, SessionError> {
        let records = source.load()?;
        let planner = BatchPlanner::from_settings(&settings);
        let plans = planner.plan(records);
        info!(funds = plans.len(), "question bank loaded");
        Ok(Self {
            clock,
            settings,
            plans,
        })
    }

    #[must_use]
    pub fn fund_plans(&self) -> &[FundPlan] {
        &self.plans
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    /// Start a quiz over one batch of the given fund.
    ///
    /// Each call builds a fresh runner; the previous runner's ticker dies
    /// with it, so selecting a new batch never leaks the old clock.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownFund` or `SessionError::UnknownBatch`
    /// for a selection that does not exist.
    pub fn select_batch(
        &self,
        fund: &FundId,
        batch_index: usize,
    ) -> Result<QuizRunner, SessionError> {
        let plan = self
            .plans
            .iter()
            .find(|plan| &plan.fund == fund)
            .ok_or_else(|| SessionError::UnknownFund(fund.to_string()))?;
        let batch = plan
            .batches
            .get(batch_index)
            .cloned()
            .ok_or_else(|| SessionError::UnknownBatch {
                fund: fund.to_string(),
                index: batch_index,
            })?;
        QuizRunner::start(batch, self.settings.clone(), self.clock)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use bank::InMemorySource;
    use quiz_core::model::QuestionRecord;
    use quiz_core::time::fixed_clock;

    fn records(fund: &str, count: u32) -> Vec<QuestionRecord> {
        (1..=count)
            .map(|n| {
                QuestionRecord::new(
                    FundId::new(fund).unwrap(),
                    n.to_string(),
                    1,
                    format!("Q{n}"),
                    vec!["a".into(), "b".into()],
                    1,
                )
                .unwrap()
            })
            .collect()
    }

    fn service(count: u32) -> QuizLoopService {
        let source = InMemorySource::new(records("1", count));
        QuizLoopService::new(&source, fixed_clock(), QuizSettings::default()).unwrap()
    }

    #[tokio::test]
    async fn select_batch_builds_a_runner() {
        let service = service(3);
        let fund = FundId::new("1").unwrap();

        let runner = service.select_batch(&fund, 0).unwrap();
        let progress = runner.progress().unwrap();
        assert_eq!(progress.total, 3);
        assert!(!progress.is_complete);
    }

    #[tokio::test]
    async fn unknown_selections_fail_fast() {
        let service = service(3);

        let missing = FundId::new("9").unwrap();
        let err = service.select_batch(&missing, 0).unwrap_err();
        assert!(matches!(err, SessionError::UnknownFund(_)));

        let fund = FundId::new("1").unwrap();
        let err = service.select_batch(&fund, 7).unwrap_err();
        assert!(matches!(err, SessionError::UnknownBatch { index: 7, .. }));
    }

    #[tokio::test]
    async fn runner_steps_through_a_full_quiz() {
        let service = service(2);
        let fund = FundId::new("1").unwrap();
        let mut runner = service.select_batch(&fund, 0).unwrap();

        runner.submit_answer(1).unwrap();
        assert_eq!(runner.advance().unwrap(), Advance::Moved);
        runner.submit_answer(2).unwrap();
        assert_eq!(runner.advance().unwrap(), Advance::Completed);

        let summary = runner.summary().unwrap();
        assert_eq!(summary.correct(), 1);
        assert_eq!(summary.total_questions(), 2);
    }

    #[tokio::test]
    async fn reset_restarts_the_same_batch() {
        let service = service(1);
        let fund = FundId::new("1").unwrap();
        let mut runner = service.select_batch(&fund, 0).unwrap();

        runner.submit_answer(1).unwrap();
        assert_eq!(runner.advance().unwrap(), Advance::Completed);
        assert!(runner.is_complete().unwrap());

        runner.reset().unwrap();
        assert!(!runner.is_complete().unwrap());
        let progress = runner.progress().unwrap();
        assert_eq!(progress.position, 1);
        assert_eq!(progress.answered, 0);
    }

    #[tokio::test]
    async fn bank_errors_surface_at_construction() {
        struct FailingSource;
        impl bank::QuestionSource for FailingSource {
            fn load(&self) -> Result<Vec<QuestionRecord>, bank::BankError> {
                Err(bank::BankError::InvalidField { row: 3, field: "pike" })
            }
        }

        let err =
            QuizLoopService::new(&FailingSource, fixed_clock(), QuizSettings::default())
                .unwrap_err();
        assert!(matches!(err, SessionError::Bank(_)));
    }
}
