//! Bullboard Core - stock transactions, positions and the dashboard built on them.
//!
//! Raw transaction rows are validated into [`transactions::Transaction`]s,
//! grouped by ticker into [`positions::Position`]s, and summarised by the
//! [`dashboard`] module. Everything here is synchronous and in-memory; reading
//! files and printing belong to the applications.

pub mod constants;
pub mod dashboard;
pub mod errors;
pub mod events;
pub mod journal;
pub mod money;
pub mod positions;
pub mod transactions;
pub mod utils;

pub use dashboard::{Dashboard, DashboardView};
pub use events::Event;
pub use journal::Journal;
pub use money::{Amount, Amounts, Currency, Ticker};
pub use positions::{aggregate_transactions, AggregatorConfig, CurrencyPolicy, Position};
pub use transactions::{Transaction, TransactionRow};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
