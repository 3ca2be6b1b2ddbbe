//! Core error types for Bullboard.
//!
//! Every failure in the core is a local validation or calculation failure.
//! Nothing here is retried: errors are surfaced to the caller, who decides
//! whether to abort a batch or skip the offending row.

use chrono::ParseError as ChronoParseError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the Bullboard core.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Transaction rejected: {0}")]
    Transaction(#[from] TransactionError),

    #[error("Position calculation failed: {0}")]
    Calculation(#[from] CalculatorError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to read transactions: {0}")]
    Csv(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Errors raised while turning raw rows into typed transactions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransactionError {
    #[error("Invalid transaction: {field} '{value}' {reason}")]
    InvalidTransaction {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Required field '{0}' is missing")]
    MissingField(String),
}

impl TransactionError {
    pub fn invalid(field: &str, value: &str, reason: impl Into<String>) -> Self {
        TransactionError::InvalidTransaction {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors that occur while folding transactions into positions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalculatorError {
    #[error("Currency mismatch for position {ticker} ({position_currency}): transaction has currency {transaction_currency}")]
    MixedCurrency {
        ticker: String,
        position_currency: String,
        transaction_currency: String,
    },

    #[error("Transaction for {transaction_ticker} cannot be applied to position {position_ticker}")]
    TickerMismatch {
        position_ticker: String,
        transaction_ticker: String,
    },

    #[error("No position held for ticker {0}")]
    UnknownTicker(String),

    #[error("Buying price of position {ticker} does not fit in a decimal")]
    Overflow { ticker: String },

    #[error("Total in {currency} does not fit in a decimal")]
    TotalOverflow { currency: String },
}

/// Validation errors for user input and value parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid amount '{0}': expected '<number> <currency>', e.g. '123.45 EUR'")]
    InvalidAmount(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Failed to parse date/time: {0}")]
    DateTimeParse(#[from] ChronoParseError),
}

impl Error {
    /// True for errors caused by a single bad row rather than the batch as a whole.
    pub fn is_invalid_transaction(&self) -> bool {
        matches!(
            self,
            Error::Transaction(TransactionError::InvalidTransaction { .. })
                | Error::Calculation(CalculatorError::Overflow { .. })
        )
    }
}

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateTimeParse(err))
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
