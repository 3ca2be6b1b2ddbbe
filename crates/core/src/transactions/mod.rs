//! Transactions module - raw rows, validated transactions and CSV ingestion.

mod csv_parser;
mod transactions_model;


pub use csv_parser::{parse_transactions_csv, ParsedTransactions, RowError};
pub use transactions_model::{
    parse_rows, rows_from_table, Transaction, TransactionRow, TRANSACTION_COLUMNS,
};
