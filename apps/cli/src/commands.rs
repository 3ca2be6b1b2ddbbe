use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context};
use bullboard_core::positions::PositionAggregator;
use bullboard_core::transactions::parse_transactions_csv;
use bullboard_core::utils::time_utils::{now, parse_datetime_or};
use bullboard_core::{Currency, Dashboard, DashboardView, Event, Journal, Transaction};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::cli::Command;
use crate::config::Config;
use crate::demo::demo_events;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PositionSummary<'a> {
    ticker: &'a str,
    currency: &'a str,
    quantity: Decimal,
    total_buying_price: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CurrencyTotal {
    currency: Currency,
    total_buying_price: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DashboardSummary<'a> {
    /// One entry per currency; amounts in different currencies are never added.
    totals: Vec<CurrencyTotal>,
    positions: Vec<PositionSummary<'a>>,
}

pub fn run(command: &Command, config: &Config, out: &mut impl Write) -> anyhow::Result<()> {
    match command {
        Command::Demo => demo(out),
        Command::Dashboard {
            transactions,
            json,
            skip_invalid,
        } => dashboard(transactions, *json, *skip_invalid, config, out),
        Command::Journal {
            transactions,
            date,
            skip_invalid,
        } => journal(transactions, date.as_deref(), *skip_invalid, out),
    }
}

fn demo(out: &mut impl Write) -> anyhow::Result<()> {
    let events = demo_events();
    let dashboard = Dashboard::from_events(&events)?;
    let journal = Journal::new(&events)?;
    writeln!(out, "{}", dashboard)?;
    writeln!(out, "{}", journal)?;
    Ok(())
}

fn dashboard(
    path: &Path,
    json: bool,
    skip_invalid: bool,
    config: &Config,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let transactions = read_transactions(path, skip_invalid)?;
    let positions = PositionAggregator::new(config.aggregator()).aggregate(&transactions)?;
    tracing::info!(
        "Aggregated {} transactions into {} positions",
        transactions.len(),
        positions.len()
    );

    if json {
        let totals = Dashboard::new(positions.clone())?
            .total_buying_price()
            .sorted()
            .into_iter()
            .map(|amount| CurrencyTotal {
                currency: amount.currency,
                total_buying_price: amount.num,
            })
            .collect();
        let summary = DashboardSummary {
            totals,
            positions: positions
                .iter()
                .map(|p| PositionSummary {
                    ticker: p.ticker.as_str(),
                    currency: p.currency.as_str(),
                    quantity: p.quantity(),
                    total_buying_price: p.total_buying_price(),
                })
                .collect(),
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
        return Ok(());
    }

    let currencies: BTreeSet<&Currency> = positions.iter().map(|p| &p.currency).collect();
    if currencies.len() > 1 {
        tracing::info!("Positions hold several currencies, showing totals per currency");
        writeln!(out, "{}", Dashboard::new(positions)?)?;
        return Ok(());
    }

    let currency = currencies
        .first()
        .map(|currency| (*currency).clone())
        .unwrap_or_else(|| config.default_currency.clone());
    let view = DashboardView::from_positions(&positions, currency)?;
    write!(out, "{}", view.to_display_string())?;
    Ok(())
}

fn journal(
    path: &Path,
    date: Option<&str>,
    skip_invalid: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let created_at = parse_datetime_or(date, now)?;
    let events: Vec<Event> = read_transactions(path, skip_invalid)?
        .into_iter()
        .map(|transaction| transaction.into_event(created_at))
        .collect();
    let journal = Journal::new(&events)?;
    writeln!(out, "{}", journal)?;
    Ok(())
}

fn read_transactions(path: &Path, skip_invalid: bool) -> anyhow::Result<Vec<Transaction>> {
    let content =
        fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let parsed = parse_transactions_csv(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    if !parsed.is_clean() {
        if !skip_invalid {
            let details = parsed
                .errors
                .iter()
                .map(|e| format!("line {}: {}", e.line, e.message))
                .collect::<Vec<_>>()
                .join("; ");
            bail!(
                "{} has {} invalid row(s): {}",
                path.display(),
                parsed.errors.len(),
                details
            );
        }
        tracing::warn!(
            "Skipping {} invalid row(s) in {}",
            parsed.errors.len(),
            path.display()
        );
    }
    Ok(parsed.transactions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn csv_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn run_to_string(command: Command, config: &Config) -> anyhow::Result<String> {
        let mut out = Vec::new();
        run(&command, config, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    fn dashboard_command(path: PathBuf, json: bool, skip_invalid: bool) -> Command {
        Command::Dashboard {
            transactions: path,
            json,
            skip_invalid,
        }
    }

    #[test]
    fn test_dashboard_prints_total() {
        let file = csv_file("ticker,currency,amount,price\nAAPL,USD,2,150\nGOOG,USD,1,100\n");
        let output = run_to_string(
            dashboard_command(file.path().to_path_buf(), false, false),
            &Config::default(),
        )
        .unwrap();

        assert_eq!(output, "Dashboard\n\nTotal buying price: 400.00 USD\n");
    }

    #[test]
    fn test_dashboard_never_adds_different_currencies() {
        let file = csv_file("ticker,currency,amount,price\nAAPL,USD,2,150\nASR.AS,EUR,4,13\n");
        let output = run_to_string(
            dashboard_command(file.path().to_path_buf(), false, false),
            &Config::default(),
        )
        .unwrap();

        assert!(!output.contains("352"), "{}", output);
        assert!(output.contains("300.00 USD"), "{}", output);
        assert!(output.contains("52.00 EUR"), "{}", output);
    }

    #[test]
    fn test_dashboard_json_totals_per_currency() {
        let file = csv_file("ticker,currency,amount,price\nAAPL,USD,2,150\nASR.AS,EUR,4,13\n");
        let output = run_to_string(
            dashboard_command(file.path().to_path_buf(), true, false),
            &Config::default(),
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        let totals = value["totals"].as_array().unwrap();
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0]["currency"], "EUR");
        assert_eq!(totals[0]["totalBuyingPrice"].as_f64(), Some(52.0));
        assert_eq!(totals[1]["currency"], "USD");
        assert_eq!(totals[1]["totalBuyingPrice"].as_f64(), Some(300.0));
    }

    #[test]
    fn test_dashboard_reports_overflowing_total() {
        let file = csv_file(
            "ticker,currency,amount,price\n\
             AAPL,USD,100000000000000,500000000000000\n\
             GOOG,USD,100000000000000,500000000000000\n",
        );
        let err = run_to_string(
            dashboard_command(file.path().to_path_buf(), false, false),
            &Config::default(),
        )
        .unwrap_err();

        assert!(err.to_string().contains("does not fit"), "{}", err);
    }

    #[test]
    fn test_dashboard_without_positions_uses_default_currency() {
        let file = csv_file("ticker,currency,amount,price\n");
        let config = Config {
            default_currency: Currency::from("EUR"),
            ..Config::default()
        };
        let output =
            run_to_string(dashboard_command(file.path().to_path_buf(), false, false), &config)
                .unwrap();

        assert_eq!(output, "Dashboard\n\nTotal buying price: 0.00 EUR\n");
    }

    #[test]
    fn test_dashboard_uses_shared_currency() {
        let file = csv_file("ticker,currency,amount,price\nASR.AS,EUR,4,13\n");
        let output = run_to_string(
            dashboard_command(file.path().to_path_buf(), false, false),
            &Config::default(),
        )
        .unwrap();

        assert!(output.contains("52.00 EUR"), "{}", output);
    }

    #[test]
    fn test_dashboard_json_summary() {
        let file = csv_file("ticker,currency,amount,price\nAAPL,USD,2,150\nAAPL,USD,1,100\n");
        let output = run_to_string(
            dashboard_command(file.path().to_path_buf(), true, false),
            &Config::default(),
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["totals"][0]["totalBuyingPrice"].as_f64(), Some(400.0));
        assert_eq!(value["totals"][0]["currency"], "USD");
        assert_eq!(value["positions"].as_array().unwrap().len(), 1);
        assert_eq!(value["positions"][0]["ticker"], "AAPL");
    }

    #[test]
    fn test_dashboard_fails_on_invalid_rows() {
        let file = csv_file("ticker,currency,amount,price\nAAPL,USD,two,150\nGOOG,USD,1,100\n");
        let err = run_to_string(
            dashboard_command(file.path().to_path_buf(), false, false),
            &Config::default(),
        )
        .unwrap_err();

        assert!(err.to_string().contains("1 invalid row(s)"), "{}", err);
        assert!(err.to_string().contains("line 2"), "{}", err);
    }

    #[test]
    fn test_dashboard_skips_invalid_rows_when_asked() {
        let file = csv_file("ticker,currency,amount,price\nAAPL,USD,two,150\nGOOG,USD,1,100\n");
        let output = run_to_string(
            dashboard_command(file.path().to_path_buf(), false, true),
            &Config::default(),
        )
        .unwrap();

        assert!(output.contains("100.00 USD"), "{}", output);
    }

    #[test]
    fn test_dashboard_rejects_mixed_currencies_by_default() {
        let file = csv_file("ticker,currency,amount,price\nAAPL,USD,1,100\nAAPL,EUR,1,90\n");
        let result = run_to_string(
            dashboard_command(file.path().to_path_buf(), false, false),
            &Config::default(),
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_dashboard_missing_file() {
        let result = run_to_string(
            dashboard_command(PathBuf::from("/nonexistent/trades.csv"), false, false),
            &Config::default(),
        );

        assert!(result.unwrap_err().to_string().contains("Failed to read"));
    }

    #[test]
    fn test_journal_lists_buys_on_given_date() {
        let file = csv_file("ticker,currency,amount,price\nAAPL,USD,10,100\n");
        let output = run_to_string(
            Command::Journal {
                transactions: file.path().to_path_buf(),
                date: Some("2020-08-10".to_string()),
                skip_invalid: false,
            },
            &Config::default(),
        )
        .unwrap();

        assert!(output.contains("My Journal"));
        assert!(output.contains("2020-08-10"));
        assert!(output.contains("1000.00 USD"));
    }

    #[test]
    fn test_journal_rejects_bad_date() {
        let file = csv_file("ticker,currency,amount,price\nAAPL,USD,10,100\n");
        let result = run_to_string(
            Command::Journal {
                transactions: file.path().to_path_buf(),
                date: Some("tomorrow".to_string()),
                skip_invalid: false,
            },
            &Config::default(),
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_demo_renders_dashboard_and_journal() {
        let output = run_to_string(Command::Demo, &Config::default()).unwrap();

        assert!(output.contains("Dashboard"));
        assert!(output.contains("ASR.AS"));
        assert!(output.contains("My Journal"));
    }
}
