use chrono::NaiveDate;
use prettytable::row;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{self, Display};

use crate::errors::{CalculatorError, Result};
use crate::events::Event;
use crate::money::{Amount, Ticker};
use crate::utils::padded_table;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JournalRowType {
    Buy,
    Dividend,
}

impl Display for JournalRowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JournalRowType::Buy => f.write_str("Buy"),
            JournalRowType::Dividend => f.write_str("Dividend"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalRow {
    pub date: NaiveDate,
    pub row_type: JournalRowType,
    pub ticker: Ticker,
    /// Shares bought, or shares held when a dividend was paid.
    pub amount: Decimal,
    /// Price, or dividend, per share.
    pub price: Amount,
    pub total: Amount,
}

/// Buys and dividends in the order they happened. Price events are not listed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Journal {
    pub rows: Vec<JournalRow>,
}

impl Journal {
    pub fn new(events: &[Event]) -> Result<Self> {
        let mut held: HashMap<&Ticker, Decimal> = HashMap::new();
        let mut rows = Vec::new();

        for event in events {
            let overflow = || CalculatorError::Overflow {
                ticker: event.ticker().to_string(),
            };
            let (row_type, amount, price) = match event {
                Event::StocksBought(e) => {
                    let shares = held.entry(&e.ticker).or_default();
                    *shares = shares.checked_add(e.amount).ok_or_else(overflow)?;
                    (JournalRowType::Buy, e.amount, &e.price)
                }
                Event::DividendPaid(e) => {
                    let shares = held.get(&e.ticker).copied().unwrap_or_default();
                    (JournalRowType::Dividend, shares, &e.price)
                }
                Event::PriceObtained(_) => continue,
            };

            let total = price.checked_mul(amount).ok_or_else(overflow)?;
            rows.push(JournalRow {
                date: event.created_at().date(),
                row_type,
                ticker: event.ticker().clone(),
                amount,
                price: price.clone(),
                total,
            });
        }

        Ok(Journal { rows })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Display for Journal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut table = padded_table();
        table.set_titles(row![c->"Date", c->"Type", c->"Ticker", c->"Amount", c->"Price", c->"Total"]);
        for row in &self.rows {
            table.add_row(row![
                l->row.date,
                l->row.row_type,
                l->row.ticker,
                r->row.amount,
                r->row.price,
                r->row.total
            ]);
        }
        write!(f, "\nMy Journal\n{}", table)
    }
}
