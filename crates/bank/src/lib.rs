#![forbid(unsafe_code)]

pub mod json;
pub mod source;

pub use json::JsonFileSource;
pub use source::{BankError, InMemorySource, QuestionSource};
