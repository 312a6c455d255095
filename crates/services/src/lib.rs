#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;

pub use quiz_core::Clock;

pub use error::SessionError;

pub use sessions::{
    Advance, AnswerRecord, BatchPlanner, FundGroup, FundPlan, QuizLoopService, QuizRunner,
    QuizSession, SessionProgress, SessionSnapshot, SessionTicker, group_by_fund,
};
