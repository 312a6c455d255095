use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("questions per batch must be > 0")]
    InvalidQuestionsPerBatch,

    #[error("time warning threshold must be > 0 seconds")]
    InvalidTimeWarning,
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Configuration for the quiz runner.
///
/// Controls how the bank is cut into batches and when the timer display
/// should warn about a long-running session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSettings {
    questions_per_batch: u32,
    time_warning_secs: u32,
}

const DEFAULT_QUESTIONS_PER_BATCH: u32 = 50;
const DEFAULT_TIME_WARNING_SECS: u32 = 600;

impl QuizSettings {
    /// Creates custom quiz settings.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is zero.
    pub fn new(questions_per_batch: u32, time_warning_secs: u32) -> Result<Self, SettingsError> {
        if questions_per_batch == 0 {
            return Err(SettingsError::InvalidQuestionsPerBatch);
        }
        if time_warning_secs == 0 {
            return Err(SettingsError::InvalidTimeWarning);
        }

        Ok(Self {
            questions_per_batch,
            time_warning_secs,
        })
    }

    // Accessors
    #[must_use]
    pub fn questions_per_batch(&self) -> u32 {
        self.questions_per_batch
    }

    /// Elapsed time at which the presentation should flag the timer.
    #[must_use]
    pub fn time_warning_secs(&self) -> u32 {
        self.time_warning_secs
    }
}

impl Default for QuizSettings {
    /// 50 questions per batch, warn after ten minutes.
    fn default() -> Self {
        Self {
            questions_per_batch: DEFAULT_QUESTIONS_PER_BATCH,
            time_warning_secs: DEFAULT_TIME_WARNING_SECS,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings() {
        let settings = QuizSettings::default();
        assert_eq!(settings.questions_per_batch(), 50);
        assert_eq!(settings.time_warning_secs(), 600);
    }

    #[test]
    fn settings_reject_zero_batch_size() {
        let err = QuizSettings::new(0, 600).unwrap_err();
        assert_eq!(err, SettingsError::InvalidQuestionsPerBatch);
    }

    #[test]
    fn settings_reject_zero_warning() {
        let err = QuizSettings::new(50, 0).unwrap_err();
        assert_eq!(err, SettingsError::InvalidTimeWarning);
    }
}
