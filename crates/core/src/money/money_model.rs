use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::str::FromStr;

use crate::constants::{DEFAULT_CURRENCY, DISPLAY_DECIMAL_PRECISION};
use crate::errors::{CalculatorError, ValidationError};

/// A currency code ("USD", "EUR"). Carried as an opaque tag, never converted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(pub String);

impl Currency {
    pub fn new(code: impl Into<String>) -> Self {
        Currency(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency(DEFAULT_CURRENCY.to_string())
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Currency {
    fn from(s: String) -> Self {
        Currency(s)
    }
}

impl From<&str> for Currency {
    fn from(s: &str) -> Self {
        Currency(s.to_string())
    }
}

/// Identifier of a tradable security ("AAPL", "ASR.AS").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticker(pub String);

impl Ticker {
    pub fn new(symbol: impl Into<String>) -> Self {
        Ticker(symbol.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Ticker {
    fn from(s: String) -> Self {
        Ticker(s)
    }
}

impl From<&str> for Ticker {
    fn from(s: &str) -> Self {
        Ticker(s.to_string())
    }
}

/// A number of units of a currency.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Amount {
    pub num: Decimal,
    pub currency: Currency,
}

impl Amount {
    pub fn new(num: Decimal, currency: impl Into<Currency>) -> Self {
        Amount {
            num,
            currency: currency.into(),
        }
    }

    pub fn zero(currency: Currency) -> Self {
        Amount {
            num: Decimal::ZERO,
            currency,
        }
    }

    /// Multiplies the amount by a quantity, `None` on overflow.
    pub fn checked_mul(&self, quantity: Decimal) -> Option<Amount> {
        self.num.checked_mul(quantity).map(|num| Amount {
            num,
            currency: self.currency.clone(),
        })
    }

    /// Adds two amounts of the same currency, `None` on mismatch or overflow.
    pub fn checked_add(&self, rhs: &Amount) -> Option<Amount> {
        if self.currency != rhs.currency {
            return None;
        }
        self.num.checked_add(rhs.num).map(|num| Amount {
            num,
            currency: self.currency.clone(),
        })
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Pad to two decimals but never round away digits.
        let precision = (self.num.scale() as usize).max(DISPLAY_DECIMAL_PRECISION);
        if self.currency.is_empty() {
            write!(f, "{:.*}", precision, self.num)
        } else {
            write!(f, "{:.*} {}", precision, self.num, self.currency)
        }
    }
}

impl FromStr for Amount {
    type Err = ValidationError;

    /// Parses `"123.45 EUR"`: a number, whitespace, a currency code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(num), Some(currency), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ValidationError::InvalidAmount(s.to_string()));
        };
        let num = Decimal::from_str_exact(num)?;
        Ok(Amount::new(num, currency))
    }
}

/// Totals kept separately per currency.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amounts {
    amounts: BTreeMap<Currency, Amount>,
}

impl Amounts {
    pub fn new(amounts: Vec<Amount>) -> Result<Self, CalculatorError> {
        let mut totals = Amounts::default();
        for amount in amounts {
            totals.upsert(amount)?;
        }
        Ok(totals)
    }

    /// Adds `amount` to the running total of its currency. On overflow the
    /// total is left unchanged.
    pub fn upsert(&mut self, amount: Amount) -> Result<(), CalculatorError> {
        match self.amounts.get_mut(&amount.currency) {
            Some(existing) => {
                *existing = existing.checked_add(&amount).ok_or_else(|| {
                    CalculatorError::TotalOverflow {
                        currency: amount.currency.to_string(),
                    }
                })?;
            }
            None => {
                self.amounts.insert(amount.currency.clone(), amount);
            }
        }
        Ok(())
    }

    pub fn for_currency(&self, currency: &Currency) -> Amount {
        self.amounts
            .get(currency)
            .cloned()
            .unwrap_or_else(|| Amount::zero(currency.clone()))
    }

    /// Amounts ordered by currency code.
    pub fn sorted(&self) -> Vec<Amount> {
        self.amounts.values().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.amounts.len()
    }
}
