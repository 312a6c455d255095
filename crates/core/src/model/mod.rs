mod batch;
mod question;
mod settings;
mod summary;

pub use batch::Batch;
pub use question::{FundId, QuestionError, QuestionRecord};
pub use settings::{QuizSettings, SettingsError};
pub use summary::{QuizSummary, QuizSummaryError};
