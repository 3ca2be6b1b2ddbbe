//! Journal module - a chronological listing of buys and dividends.

mod journal_model;

#[cfg(test)]
mod journal_model_tests;

pub use journal_model::{Journal, JournalRow, JournalRowType};
