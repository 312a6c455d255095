use std::sync::Arc;

use crate::model::{FundId, QuestionRecord};

/// Ordered, contiguous run of questions from a single fund.
///
/// Batches are produced by the batch planner in repository order; no
/// reordering happens anywhere. Cloning is cheap: all clones share the
/// same underlying question slice, which stays immutable for the lifetime
/// of any session running over it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    fund: FundId,
    index: usize,
    first_ordinal: usize,
    questions: Arc<[QuestionRecord]>,
}

impl Batch {
    /// Creates a batch from a contiguous slice of a fund's questions.
    ///
    /// `index` is the position of this batch within its fund and
    /// `first_ordinal` the 1-based ordinal of its first question there.
    #[must_use]
    pub fn new(
        fund: FundId,
        index: usize,
        first_ordinal: usize,
        questions: Vec<QuestionRecord>,
    ) -> Self {
        Self {
            fund,
            index,
            first_ordinal,
            questions: questions.into(),
        }
    }

    #[must_use]
    pub fn fund(&self) -> &FundId {
        &self.fund
    }

    /// Position of this batch within its fund.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&QuestionRecord> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuestionRecord> {
        self.questions.iter()
    }

    /// Sum of the points over all questions in the batch.
    #[must_use]
    pub fn max_points(&self) -> u32 {
        self.questions
            .iter()
            .map(QuestionRecord::points)
            .fold(0, u32::saturating_add)
    }

    /// Selection-screen label covering the actual question range, e.g. "51 - 100".
    #[must_use]
    pub fn label(&self) -> String {
        let last = self.first_ordinal + self.questions.len().saturating_sub(1);
        format!("{} - {}", self.first_ordinal, last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(points: u32) -> QuestionRecord {
        QuestionRecord::new(
            FundId::new("1").unwrap(),
            "1",
            points,
            "Q",
            vec!["a".into(), "b".into()],
            1,
        )
        .unwrap()
    }

    #[test]
    fn max_points_sums_question_points() {
        let batch = Batch::new(
            FundId::new("1").unwrap(),
            0,
            1,
            vec![question(1), question(2), question(3)],
        );
        assert_eq!(batch.max_points(), 6);
    }

    #[test]
    fn label_covers_actual_range() {
        let fund = FundId::new("1").unwrap();
        let batch = Batch::new(fund.clone(), 1, 51, vec![question(1), question(1)]);
        assert_eq!(batch.label(), "51 - 52");

        let single = Batch::new(fund, 0, 1, vec![question(1)]);
        assert_eq!(single.label(), "1 - 1");
    }

    #[test]
    fn clones_share_the_same_questions() {
        let batch = Batch::new(FundId::new("1").unwrap(), 0, 1, vec![question(2)]);
        let clone = batch.clone();
        assert_eq!(batch, clone);
        assert_eq!(clone.get(0).map(QuestionRecord::points), Some(2));
    }
}
