use quiz_core::model::{Batch, FundId, QuestionRecord, QuizSettings};

use crate::error::SessionError;

/// Questions of a single fund, in repository order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundGroup {
    pub fund: FundId,
    pub questions: Vec<QuestionRecord>,
}

/// Batches prepared for one fund, for the selection screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundPlan {
    pub fund: FundId,
    pub batches: Vec<Batch>,
}

impl FundPlan {
    /// Total number of questions across all batches of this fund.
    #[must_use]
    pub fn total(&self) -> usize {
        self.batches.iter().map(Batch::len).sum()
    }
}

/// Partition records by fund key.
///
/// Preserves both the first-appearance order of funds and the relative
/// order of questions within each fund. Deterministic; no randomness.
#[must_use]
pub fn group_by_fund(records: impl IntoIterator<Item = QuestionRecord>) -> Vec<FundGroup> {
    let mut groups: Vec<FundGroup> = Vec::new();
    for record in records {
        match groups.iter_mut().find(|group| &group.fund == record.fund()) {
            Some(group) => group.questions.push(record),
            None => groups.push(FundGroup {
                fund: record.fund().clone(),
                questions: vec![record],
            }),
        }
    }
    groups
}

/// Splits each fund's question sequence into fixed-size consecutive batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPlanner {
    batch_size: usize,
}

impl BatchPlanner {
    /// Creates a planner with an explicit batch size.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidBatchSize` if `batch_size` is zero.
    pub fn new(batch_size: u32) -> Result<Self, SessionError> {
        if batch_size == 0 {
            return Err(SessionError::InvalidBatchSize);
        }
        Ok(Self {
            batch_size: usize::try_from(batch_size).unwrap_or(usize::MAX),
        })
    }

    /// Planner using the configured batch size (settings are pre-validated).
    #[must_use]
    pub fn from_settings(settings: &QuizSettings) -> Self {
        Self {
            batch_size: usize::try_from(settings.questions_per_batch()).unwrap_or(usize::MAX),
        }
    }

    #[must_use]
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Cut one fund's questions into consecutive, non-overlapping batches.
    ///
    /// The last batch may be shorter than the batch size. Batches never
    /// span fund keys because the input is already a single fund.
    #[must_use]
    pub fn batches(&self, group: &FundGroup) -> Vec<Batch> {
        group
            .questions
            .chunks(self.batch_size)
            .enumerate()
            .map(|(index, chunk)| {
                Batch::new(
                    group.fund.clone(),
                    index,
                    index * self.batch_size + 1,
                    chunk.to_vec(),
                )
            })
            .collect()
    }

    /// Group and batch the whole bank in one pass, for the selection screen.
    #[must_use]
    pub fn plan(&self, records: impl IntoIterator<Item = QuestionRecord>) -> Vec<FundPlan> {
        group_by_fund(records)
            .into_iter()
            .map(|group| FundPlan {
                fund: group.fund.clone(),
                batches: self.batches(&group),
            })
            .collect()
    }
}

impl Default for BatchPlanner {
    fn default() -> Self {
        Self::from_settings(&QuizSettings::default())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn question(fund: &str, number: u32) -> QuestionRecord {
        QuestionRecord::new(
            FundId::new(fund).unwrap(),
            number.to_string(),
            1,
            format!("Q{number}"),
            vec!["a".into(), "b".into()],
            1,
        )
        .unwrap()
    }

    #[test]
    fn grouping_preserves_order() {
        let records = vec![
            question("2", 1),
            question("1", 1),
            question("2", 2),
            question("1", 2),
        ];

        let groups = group_by_fund(records);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].fund.as_str(), "2");
        assert_eq!(groups[0].questions[0].number(), "1");
        assert_eq!(groups[0].questions[1].number(), "2");
        assert_eq!(groups[1].fund.as_str(), "1");
        assert_eq!(groups[1].questions.len(), 2);
    }

    #[test]
    fn planner_rejects_zero_batch_size() {
        let err = BatchPlanner::new(0).unwrap_err();
        assert!(matches!(err, SessionError::InvalidBatchSize));
    }

    #[test]
    fn batches_of_120_questions_are_50_50_20() {
        let questions: Vec<_> = (1..=120).map(|n| question("1", n)).collect();
        let group = FundGroup {
            fund: FundId::new("1").unwrap(),
            questions,
        };

        let batches = BatchPlanner::new(50).unwrap().batches(&group);

        let sizes: Vec<_> = batches.iter().map(Batch::len).collect();
        assert_eq!(sizes, vec![50, 50, 20]);
        assert_eq!(batches[0].label(), "1 - 50");
        assert_eq!(batches[1].label(), "51 - 100");
        assert_eq!(batches[2].label(), "101 - 120");

        // Contiguous, non-overlapping, repository order.
        assert_eq!(batches[1].get(0).map(QuestionRecord::number), Some("51"));
        assert_eq!(batches[2].get(19).map(QuestionRecord::number), Some("120"));
    }

    #[test]
    fn plan_covers_every_fund() {
        let mut records: Vec<_> = (1..=3).map(|n| question("1", n)).collect();
        records.push(question("2", 1));

        let plans = BatchPlanner::new(2).unwrap().plan(records);

        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].total(), 3);
        assert_eq!(plans[0].batches.len(), 2);
        assert_eq!(plans[1].total(), 1);
    }
}
