//! Reads transaction batches from CSV files.
//!
//! Rows are parsed one by one. Structural problems (bad encoding, missing
//! columns) fail the whole file; a bad row is recorded and parsing goes on so
//! the caller can decide between aborting and skipping.

use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::transactions_model::{Transaction, TransactionRow, TRANSACTION_COLUMNS};
use crate::errors::{Error, TransactionError, ValidationError};
use crate::Result;

/// A row that could not be turned into a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowError {
    /// 1-based line number in the file, header included
    pub line: u64,
    pub message: String,
}

/// Result of parsing a transactions file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTransactions {
    pub transactions: Vec<Transaction>,
    pub errors: Vec<RowError>,
}

impl ParsedTransactions {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parses a headered CSV file with `ticker,currency,amount,price` columns.
pub fn parse_transactions_csv(content: &[u8]) -> Result<ParsedTransactions> {
    let content = decode_content(content)?;

    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    for column in TRANSACTION_COLUMNS {
        if !headers.iter().any(|h| h.eq_ignore_ascii_case(column)) {
            return Err(TransactionError::MissingField(column.to_string()).into());
        }
    }
    // Normalize header case so serde can match field names.
    let lowered: StringRecord = headers.iter().map(str::to_ascii_lowercase).collect();

    let mut parsed = ParsedTransactions::default();
    let mut record = StringRecord::new();
    while reader.read_record(&mut record)? {
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let parsed_row = record
            .deserialize::<TransactionRow>(Some(&lowered))
            .map_err(|e| e.to_string())
            .and_then(|row| Transaction::try_from(&row).map_err(|e| e.to_string()));
        match parsed_row {
            Ok(transaction) => parsed.transactions.push(transaction),
            Err(message) => {
                warn!("Invalid transaction at line {}: {}", line, message);
                parsed.errors.push(RowError { line, message });
            }
        }
    }

    debug!(
        "Parsed {} transactions ({} invalid rows)",
        parsed.transactions.len(),
        parsed.errors.len()
    );
    Ok(parsed)
}

/// Decodes content bytes to UTF-8, dropping a leading BOM.
fn decode_content(content: &[u8]) -> Result<String> {
    let content = content.strip_prefix(&[0xEF_u8, 0xBB, 0xBF][..]).unwrap_or(content);
    std::str::from_utf8(content)
        .map(str::to_string)
        .map_err(|e| {
            Error::Validation(ValidationError::InvalidInput(format!(
                "Invalid UTF-8 encoding at byte {}",
                e.valid_up_to()
            )))
        })
}
