use log::{debug, error};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{CalculatorError, Result};
use crate::money::{Amount, Currency, Ticker};
use crate::transactions::Transaction;

/// One applied transaction, kept in the order it was added.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Lot {
    pub quantity: Decimal,
    /// Price per share in the position's currency.
    pub price: Decimal,
    /// `quantity * price`.
    pub cost_basis: Decimal,
}

/// All transactions for one ticker/currency pair.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub id: String,
    pub ticker: Ticker,
    pub currency: Currency,
    quantity: Decimal,
    total_buying_price: Decimal,
    lots: Vec<Lot>,
    /// Last price seen for the ticker, `None` until a price is recorded.
    last_price: Option<Decimal>,
    dividends: Decimal,
}

impl Position {
    pub fn new(ticker: impl Into<Ticker>, currency: impl Into<Currency>) -> Self {
        let ticker = ticker.into();
        let currency = currency.into();
        Position {
            id: format!("POS-{}-{}", ticker, currency),
            ticker,
            currency,
            quantity: Decimal::ZERO,
            total_buying_price: Decimal::ZERO,
            lots: Vec::new(),
            last_price: None,
            dividends: Decimal::ZERO,
        }
    }

    /// Adds `amount * price` to the buying price.
    ///
    /// Every transaction counts, negative amounts included; the sign is not
    /// interpreted as a sell.
    pub fn add_transaction(&mut self, amount: i64, price: i64) -> Result<()> {
        self.add_lot_values(Decimal::from(amount), Decimal::from(price))
            .map(|_| ())
    }

    /// Adds a lot from decimal values and returns its cost basis.
    pub fn add_lot_values(&mut self, quantity: Decimal, price: Decimal) -> Result<Decimal> {
        let overflow = || CalculatorError::Overflow {
            ticker: self.ticker.to_string(),
        };
        let cost_basis = quantity.checked_mul(price).ok_or_else(overflow)?;
        let total_buying_price = self
            .total_buying_price
            .checked_add(cost_basis)
            .ok_or_else(overflow)?;
        let total_quantity = self.quantity.checked_add(quantity).ok_or_else(overflow)?;

        self.lots.push(Lot {
            quantity,
            price,
            cost_basis,
        });
        self.total_buying_price = total_buying_price;
        self.quantity = total_quantity;
        Ok(cost_basis)
    }

    /// Applies a validated transaction, checking it belongs to this position.
    pub fn apply(&mut self, transaction: &Transaction) -> Result<()> {
        if transaction.ticker != self.ticker {
            return Err(CalculatorError::TickerMismatch {
                position_ticker: self.ticker.to_string(),
                transaction_ticker: transaction.ticker.to_string(),
            }
            .into());
        }
        self.ensure_currency(&transaction.currency)?;
        self.add_transaction(transaction.amount, transaction.price)
    }

    pub(crate) fn ensure_currency(&self, currency: &Currency) -> Result<()> {
        if &self.currency != currency {
            error!(
                "Currency mismatch for position {} ({}): got {}",
                self.id, self.currency, currency
            );
            return Err(CalculatorError::MixedCurrency {
                ticker: self.ticker.to_string(),
                position_currency: self.currency.to_string(),
                transaction_currency: currency.to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Σ `amount * price` over every applied transaction.
    pub fn total_buying_price(&self) -> Decimal {
        self.total_buying_price
    }

    pub fn buying_price_amount(&self) -> Amount {
        Amount::new(self.total_buying_price, self.currency.clone())
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    pub fn lots(&self) -> &[Lot] {
        &self.lots
    }

    /// Buying price per share held, `None` while the position holds nothing.
    pub fn average_cost(&self) -> Option<Decimal> {
        if self.quantity.is_zero() {
            return None;
        }
        self.total_buying_price.checked_div(self.quantity)
    }

    pub fn record_price(&mut self, price: Decimal) {
        debug!("Recording price {} {} for {}", price, self.currency, self.ticker);
        self.last_price = Some(price);
    }

    pub fn last_price(&self) -> Option<Decimal> {
        self.last_price
    }

    /// Quantity held at the last recorded price.
    pub fn market_value(&self) -> Option<Amount> {
        self.last_price
            .and_then(|price| price.checked_mul(self.quantity))
            .map(|value| Amount::new(value, self.currency.clone()))
    }

    /// Credits a per-share dividend for the quantity currently held and
    /// returns the amount paid.
    pub fn record_dividend(&mut self, per_share: Decimal) -> Result<Decimal> {
        let overflow = || CalculatorError::Overflow {
            ticker: self.ticker.to_string(),
        };
        let paid = per_share.checked_mul(self.quantity).ok_or_else(overflow)?;
        self.dividends = self.dividends.checked_add(paid).ok_or_else(overflow)?;
        Ok(paid)
    }

    pub fn dividends(&self) -> Amount {
        Amount::new(self.dividends, self.currency.clone())
    }
}
