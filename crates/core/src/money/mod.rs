//! Money value objects - currencies, tickers and per-currency amounts.

mod money_model;


pub use money_model::{Amount, Amounts, Currency, Ticker};
