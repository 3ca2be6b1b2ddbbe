use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::{Amount, Currency, Ticker};
use crate::transactions::Transaction;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StocksBought {
    pub created_at: NaiveDateTime,
    pub ticker: Ticker,
    pub amount: Decimal,
    /// Price per share.
    pub price: Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceObtained {
    pub created_at: NaiveDateTime,
    pub ticker: Ticker,
    pub price: Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividendPaid {
    pub created_at: NaiveDateTime,
    pub ticker: Ticker,
    /// Dividend per share held.
    pub price: Amount,
}

/// Something that happened to the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Event {
    StocksBought(StocksBought),
    PriceObtained(PriceObtained),
    DividendPaid(DividendPaid),
}

impl Event {
    pub fn new_stocks_bought(
        created_at: NaiveDateTime,
        amount: Decimal,
        price: Amount,
        ticker: impl Into<Ticker>,
    ) -> Self {
        Event::StocksBought(StocksBought {
            created_at,
            ticker: ticker.into(),
            amount,
            price,
        })
    }

    pub fn new_price_obtained(
        created_at: NaiveDateTime,
        price: Amount,
        ticker: impl Into<Ticker>,
    ) -> Self {
        Event::PriceObtained(PriceObtained {
            created_at,
            ticker: ticker.into(),
            price,
        })
    }

    pub fn new_dividend_paid(
        created_at: NaiveDateTime,
        price: Amount,
        ticker: impl Into<Ticker>,
    ) -> Self {
        Event::DividendPaid(DividendPaid {
            created_at,
            ticker: ticker.into(),
            price,
        })
    }

    pub fn created_at(&self) -> NaiveDateTime {
        match self {
            Event::StocksBought(e) => e.created_at,
            Event::PriceObtained(e) => e.created_at,
            Event::DividendPaid(e) => e.created_at,
        }
    }

    pub fn ticker(&self) -> &Ticker {
        match self {
            Event::StocksBought(e) => &e.ticker,
            Event::PriceObtained(e) => &e.ticker,
            Event::DividendPaid(e) => &e.ticker,
        }
    }

    pub fn currency(&self) -> &Currency {
        match self {
            Event::StocksBought(e) => &e.price.currency,
            Event::PriceObtained(e) => &e.price.currency,
            Event::DividendPaid(e) => &e.price.currency,
        }
    }
}

impl Transaction {
    /// The `StocksBought` event this transaction records.
    pub fn into_event(self, created_at: NaiveDateTime) -> Event {
        Event::StocksBought(StocksBought {
            created_at,
            amount: Decimal::from(self.amount),
            price: Amount::new(Decimal::from(self.price), self.currency),
            ticker: self.ticker,
        })
    }
}

/// Sorts events chronologically; events at the same instant keep their order.
pub fn sort_chronologically(events: &mut [Event]) {
    events.sort_by_key(Event::created_at);
}
