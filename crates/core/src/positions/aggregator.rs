//! Groups a batch of transactions by ticker and folds each group into a
//! [`Position`].

use log::{debug, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::positions_model::Position;
use crate::constants::DEFAULT_PARALLEL_THRESHOLD;
use crate::errors::{Error, Result, ValidationError};
use crate::money::{Currency, Ticker};
use crate::transactions::Transaction;

/// What to do when rows of one ticker disagree on currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CurrencyPolicy {
    /// Fail the batch with `MixedCurrency`.
    #[default]
    Reject,
    /// Keep the currency of the ticker's first row and apply later rows as-is.
    FirstSeen,
}

impl FromStr for CurrencyPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(CurrencyPolicy::Reject),
            "first-seen" | "first_seen" => Ok(CurrencyPolicy::FirstSeen),
            other => Err(ValidationError::InvalidInput(format!(
                "Unknown currency policy '{}', expected 'reject' or 'first-seen'",
                other
            ))
            .into()),
        }
    }
}

impl fmt::Display for CurrencyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrencyPolicy::Reject => f.write_str("reject"),
            CurrencyPolicy::FirstSeen => f.write_str("first-seen"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AggregatorConfig {
    pub currency_policy: CurrencyPolicy,
    /// Batches with more distinct tickers than this are folded in parallel.
    pub parallel_threshold: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        AggregatorConfig {
            currency_policy: CurrencyPolicy::default(),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// Partitions transactions by ticker, keeping input order within each ticker.
pub fn group_by_ticker(transactions: &[Transaction]) -> BTreeMap<&Ticker, Vec<&Transaction>> {
    let mut groups: BTreeMap<&Ticker, Vec<&Transaction>> = BTreeMap::new();
    for transaction in transactions {
        groups
            .entry(&transaction.ticker)
            .or_default()
            .push(transaction);
    }
    groups
}

#[derive(Debug, Clone, Default)]
pub struct PositionAggregator {
    config: AggregatorConfig,
}

impl PositionAggregator {
    pub fn new(config: AggregatorConfig) -> Self {
        PositionAggregator { config }
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Builds one position per distinct ticker, ordered by ticker.
    pub fn aggregate(&self, transactions: &[Transaction]) -> Result<Vec<Position>> {
        let groups: Vec<(&Ticker, Vec<&Transaction>)> =
            group_by_ticker(transactions).into_iter().collect();
        debug!(
            "Aggregating {} transactions into {} positions",
            transactions.len(),
            groups.len()
        );

        if groups.len() > self.config.parallel_threshold {
            groups
                .par_iter()
                .map(|(ticker, rows)| self.fold_group(ticker, rows))
                .collect()
        } else {
            groups
                .iter()
                .map(|(ticker, rows)| self.fold_group(ticker, rows))
                .collect()
        }
    }

    fn fold_group(&self, ticker: &Ticker, rows: &[&Transaction]) -> Result<Position> {
        let Some(first) = rows.first() else {
            return Ok(Position::new(ticker.clone(), Currency::default()));
        };
        let mut position = Position::new(ticker.clone(), first.currency.clone());

        for row in rows {
            match self.config.currency_policy {
                CurrencyPolicy::Reject => position.apply(row)?,
                CurrencyPolicy::FirstSeen => {
                    if row.currency != position.currency {
                        warn!(
                            "Row for {} has currency {}, keeping position currency {}",
                            ticker, row.currency, position.currency
                        );
                    }
                    position.add_transaction(row.amount, row.price)?;
                }
            }
        }
        Ok(position)
    }
}

/// Aggregates with the default configuration.
pub fn aggregate_transactions(transactions: &[Transaction]) -> Result<Vec<Position>> {
    PositionAggregator::default().aggregate(transactions)
}
