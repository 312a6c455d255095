use serde::Serialize;

use quiz_core::model::FundId;

/// How the current question was answered.
///
/// Pure data: the presentation layer derives correct/wrong highlighting
/// from these indices; the session never reaches into rendering state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnswerRecord {
    /// 1-based option the learner picked.
    pub chosen: u32,
    /// 1-based correct option, exposed so a wrong pick can highlight it.
    pub correct: u32,
    pub is_correct: bool,
}

/// Everything the presentation needs to render one frame of the quiz.
///
/// This is intentionally **not** a UI view-model: no pre-formatted strings
/// beyond the raw prompt/options, no localization assumptions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub fund: FundId,
    /// Display-only ordinal of the current question within its fund.
    pub number: String,
    pub prompt: String,
    pub options: Vec<String>,
    /// 1-based position within the batch.
    pub position: usize,
    pub total: usize,
    pub question_points: u32,
    pub answer: Option<AnswerRecord>,
    pub correct_count: u32,
    pub points: u32,
    pub max_points: u32,
    pub elapsed_secs: u32,
    pub final_secs: u32,
    pub is_complete: bool,
    /// True once the elapsed time crosses the configured warning threshold.
    pub time_warning: bool,
}
