mod batches;
mod progress;
mod runner;
mod service;
mod ticker;
mod view;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use batches::{BatchPlanner, FundGroup, FundPlan, group_by_fund};
pub use progress::SessionProgress;
pub use runner::{QuizLoopService, QuizRunner};
pub use service::{Advance, QuizSession};
pub use ticker::SessionTicker;
pub use view::{AnswerRecord, SessionSnapshot};
