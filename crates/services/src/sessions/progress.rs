use serde::Serialize;

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionProgress {
    pub total: usize,
    /// 1-based position of the current question.
    pub position: usize,
    pub answered: usize,
    pub is_complete: bool,
}
