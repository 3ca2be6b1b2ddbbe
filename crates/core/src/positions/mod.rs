//! Positions module - the per-ticker aggregate and the grouping step that
//! builds it from a batch of transactions.

mod aggregator;
mod positions_model;

#[cfg(test)]
mod aggregator_tests;


pub use aggregator::{
    aggregate_transactions, group_by_ticker, AggregatorConfig, CurrencyPolicy, PositionAggregator,
};
pub use positions_model::{Lot, Position};
