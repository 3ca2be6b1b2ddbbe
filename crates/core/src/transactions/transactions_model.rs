use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::TransactionError;
use crate::money::{Currency, Ticker};

/// Column names a transaction table must provide.
pub const TRANSACTION_COLUMNS: [&str; 4] = ["ticker", "currency", "amount", "price"];

/// A transaction exactly as it arrives from a data table or CSV file.
///
/// Every field is kept as text; nothing is trusted until the row has been
/// converted into a [`Transaction`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRow {
    pub ticker: String,
    pub currency: String,
    pub amount: String,
    pub price: String,
}

impl TransactionRow {
    pub fn new(
        ticker: impl Into<String>,
        currency: impl Into<String>,
        amount: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        TransactionRow {
            ticker: ticker.into(),
            currency: currency.into(),
            amount: amount.into(),
            price: price.into(),
        }
    }
}

/// A validated stock transaction.
///
/// `amount` is a signed number of shares (positive = buy) and `price` the
/// price per share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub ticker: Ticker,
    pub currency: Currency,
    pub amount: i64,
    pub price: i64,
}

impl Transaction {
    pub fn new(
        ticker: impl Into<Ticker>,
        currency: impl Into<Currency>,
        amount: i64,
        price: i64,
    ) -> Self {
        Transaction {
            ticker: ticker.into(),
            currency: currency.into(),
            amount,
            price,
        }
    }

    /// `amount * price`, `None` when the product exceeds the decimal range.
    pub fn buying_price(&self) -> Option<Decimal> {
        Decimal::from(self.amount).checked_mul(Decimal::from(self.price))
    }
}

impl TryFrom<&TransactionRow> for Transaction {
    type Error = TransactionError;

    fn try_from(row: &TransactionRow) -> Result<Self, Self::Error> {
        Ok(Transaction {
            ticker: Ticker::new(parse_identifier("ticker", &row.ticker)?),
            currency: Currency::new(parse_identifier("currency", &row.currency)?),
            amount: parse_integer("amount", &row.amount)?,
            price: parse_integer("price", &row.price)?,
        })
    }
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = TransactionError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        Transaction::try_from(&row)
    }
}

/// Converts a data table (header row first) into rows by column name.
///
/// Column order is free; extra columns are ignored. Short rows yield empty
/// fields, which are rejected later when the row is parsed.
pub fn rows_from_table(table: &[Vec<String>]) -> Result<Vec<TransactionRow>, TransactionError> {
    let Some((headers, body)) = table.split_first() else {
        return Ok(Vec::new());
    };

    let column = |name: &str| -> Result<usize, TransactionError> {
        headers
            .iter()
            .position(|header| header.trim().eq_ignore_ascii_case(name))
            .ok_or_else(|| TransactionError::MissingField(name.to_string()))
    };
    let [ticker, currency, amount, price] = TRANSACTION_COLUMNS;
    let (ticker, currency, amount, price) =
        (column(ticker)?, column(currency)?, column(amount)?, column(price)?);

    let cell = |row: &Vec<String>, idx: usize| row.get(idx).cloned().unwrap_or_default();

    Ok(body
        .iter()
        .map(|row| TransactionRow {
            ticker: cell(row, ticker),
            currency: cell(row, currency),
            amount: cell(row, amount),
            price: cell(row, price),
        })
        .collect())
}

/// Parses every row, stopping at the first invalid one.
pub fn parse_rows(rows: &[TransactionRow]) -> Result<Vec<Transaction>, TransactionError> {
    rows.iter().map(Transaction::try_from).collect()
}

fn parse_identifier(field: &str, value: &str) -> Result<String, TransactionError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TransactionError::invalid(field, value, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

fn parse_integer(field: &str, value: &str) -> Result<i64, TransactionError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|e| TransactionError::invalid(field, value, format!("is not an integer ({})", e)))
}
