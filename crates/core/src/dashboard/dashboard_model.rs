use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::errors::{CalculatorError, Result};
use crate::events::{DividendPaid, Event, PriceObtained, StocksBought};
use crate::money::{Amount, Amounts, Currency, Ticker};
use crate::positions::Position;

/// Sum of the buying prices of `positions`. An empty collection sums to zero.
///
/// Currencies are not converted; callers holding several currencies should
/// use [`Dashboard::total_buying_price`] instead.
pub fn total_buying_price(positions: &[Position]) -> Result<Decimal> {
    positions.iter().try_fold(Decimal::ZERO, |total, position| {
        total
            .checked_add(position.total_buying_price())
            .ok_or_else(|| {
                CalculatorError::TotalOverflow {
                    currency: position.currency.to_string(),
                }
                .into()
            })
    })
}

/// A held position as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub ticker: Ticker,
    pub amount: Decimal,
    pub buying_price: Amount,
    pub dividends: Amount,
    /// Value at the last obtained price, `None` until a price is known.
    pub value: Option<Amount>,
}

impl From<&Position> for Holding {
    fn from(position: &Position) -> Self {
        Holding {
            ticker: position.ticker.clone(),
            amount: position.quantity(),
            buying_price: position.buying_price_amount(),
            dividends: position.dividends(),
            value: position.market_value(),
        }
    }
}

/// Per-currency totals over every position.
#[derive(Debug, Clone, Default, PartialEq)]
struct Totals {
    buying_price: Amounts,
    value: Amounts,
    dividend: Amounts,
}

impl Totals {
    fn of<'a>(positions: impl Iterator<Item = &'a Position> + Clone) -> Result<Self> {
        Ok(Totals {
            buying_price: Amounts::new(
                positions.clone().map(Position::buying_price_amount).collect(),
            )?,
            value: Amounts::new(positions.clone().filter_map(Position::market_value).collect())?,
            dividend: Amounts::new(positions.map(Position::dividends).collect())?,
        })
    }
}

/// Owns the positions of a portfolio and the totals derived from them.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    positions: BTreeMap<Ticker, Position>,
    totals: Totals,
}

impl Dashboard {
    /// Dashboard over already aggregated positions. Fails when a
    /// per-currency total does not fit in a decimal.
    pub fn new(positions: Vec<Position>) -> Result<Self> {
        let mut dashboard = Dashboard {
            positions: positions
                .into_iter()
                .map(|position| (position.ticker.clone(), position))
                .collect(),
            totals: Totals::default(),
        };
        dashboard.refresh_totals()?;
        Ok(dashboard)
    }

    /// Replays `events` in the given order.
    pub fn from_events(events: &[Event]) -> Result<Self> {
        let mut dashboard = Dashboard::default();
        for event in events {
            dashboard.handle_event(event)?;
        }
        Ok(dashboard)
    }

    pub fn handle_event(&mut self, event: &Event) -> Result<()> {
        match event {
            Event::StocksBought(e) => self.handle_stocks_bought(e)?,
            Event::PriceObtained(e) => self.handle_price_obtained(e)?,
            Event::DividendPaid(e) => self.handle_dividend_paid(e)?,
        }
        self.refresh_totals()
    }

    fn refresh_totals(&mut self) -> Result<()> {
        self.totals = Totals::of(self.positions.values())?;
        Ok(())
    }

    fn handle_stocks_bought(&mut self, event: &StocksBought) -> Result<()> {
        let position = self
            .positions
            .entry(event.ticker.clone())
            .or_insert_with(|| Position::new(event.ticker.clone(), event.price.currency.clone()));
        position.ensure_currency(&event.price.currency)?;
        position.add_lot_values(event.amount, event.price.num)?;
        Ok(())
    }

    fn handle_price_obtained(&mut self, event: &PriceObtained) -> Result<()> {
        // Prices for tickers never bought carry no value.
        let Some(position) = self.positions.get_mut(&event.ticker) else {
            debug!("Ignoring price for {}: no position held", event.ticker);
            return Ok(());
        };
        position.ensure_currency(&event.price.currency)?;
        position.record_price(event.price.num);
        Ok(())
    }

    fn handle_dividend_paid(&mut self, event: &DividendPaid) -> Result<()> {
        let Some(position) = self.positions.get_mut(&event.ticker) else {
            debug!("Ignoring dividend for {}: no position held", event.ticker);
            return Ok(());
        };
        position.ensure_currency(&event.price.currency)?;
        position.record_dividend(event.price.num)?;
        Ok(())
    }

    pub fn number_of_positions(&self) -> usize {
        self.positions.len()
    }

    pub fn positions(&self) -> impl Iterator<Item = &Position> {
        self.positions.values()
    }

    pub fn position(&self, ticker: &Ticker) -> Option<&Position> {
        self.positions.get(ticker)
    }

    /// Buying price summed per currency.
    pub fn total_buying_price(&self) -> &Amounts {
        &self.totals.buying_price
    }

    /// Buying price in one currency, zero if no position uses it.
    pub fn total_buying_price_in(&self, currency: &Currency) -> Decimal {
        self.totals.buying_price.for_currency(currency).num
    }

    /// Value of priced positions summed per currency.
    pub fn total_value(&self) -> &Amounts {
        &self.totals.value
    }

    pub fn total_dividend(&self) -> &Amounts {
        &self.totals.dividend
    }

    /// Holdings ordered by value, highest first; unpriced holdings last.
    pub fn holdings(&self) -> Vec<Holding> {
        let mut holdings: Vec<Holding> = self.positions().map(Holding::from).collect();
        holdings.sort_by(|a, b| match (&a.value, &b.value) {
            (Some(x), Some(y)) => y.num.cmp(&x.num).then_with(|| a.ticker.cmp(&b.ticker)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.ticker.cmp(&b.ticker),
        });
        holdings
    }
}
