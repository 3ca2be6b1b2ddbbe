use prettytable::{row, Table};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

use super::dashboard_model::{total_buying_price, Dashboard};
use crate::constants::UNPRICED_PLACEHOLDER;
use crate::errors::Result;
use crate::money::{Amount, Amounts, Currency};
use crate::positions::Position;
use crate::utils::padded_table;

/// Summary of a total buying price, ready to be displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    total_buying_price: Decimal,
    currency: Currency,
}

impl DashboardView {
    pub fn new(total_buying_price: Decimal, currency: impl Into<Currency>) -> Self {
        DashboardView {
            total_buying_price,
            currency: currency.into(),
        }
    }

    /// View over the summed buying price of `positions`. Fails when the sum
    /// does not fit in a decimal.
    pub fn from_positions(positions: &[Position], currency: impl Into<Currency>) -> Result<Self> {
        Ok(DashboardView::new(total_buying_price(positions)?, currency))
    }

    pub fn total_buying_price(&self) -> Decimal {
        self.total_buying_price
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn to_display_string(&self) -> String {
        self.to_string()
    }
}

impl Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = Amount::new(self.total_buying_price, self.currency.clone());
        write!(f, "Dashboard\n\nTotal buying price: {}\n", total)
    }
}

fn fmt_amounts(amounts: &Amounts) -> String {
    if amounts.is_empty() {
        return Amount::zero(Currency::default()).to_string();
    }
    amounts
        .sorted()
        .iter()
        .map(Amount::to_string)
        .collect::<Vec<String>>()
        .join("\n")
}

fn format_meta_table(dashboard: &Dashboard) -> Table {
    let mut table = padded_table();
    let meta = [
        (
            "Number of positions",
            dashboard.number_of_positions().to_string(),
        ),
        (
            "Total buying price",
            fmt_amounts(dashboard.total_buying_price()),
        ),
        ("Total value", fmt_amounts(dashboard.total_value())),
        ("Total dividend", fmt_amounts(dashboard.total_dividend())),
    ];
    for (key, value) in meta {
        table.add_row(row![key, r->value]);
    }
    table
}

fn format_holdings_table(dashboard: &Dashboard) -> Table {
    let mut table = padded_table();
    table.set_titles(row![c->"Ticker", c->"Amount", c->"Dividend", c->"Value"]);
    for holding in dashboard.holdings() {
        let value = holding
            .value
            .map(|v| v.to_string())
            .unwrap_or_else(|| UNPRICED_PLACEHOLDER.to_string());
        table.add_row(row![
            l->holding.ticker,
            r->holding.amount,
            r->holding.dividends,
            r->value
        ]);
    }
    table
}

impl Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\nDashboard\n\n{}\n{}",
            format_meta_table(self),
            format_holdings_table(self)
        )
    }
}
