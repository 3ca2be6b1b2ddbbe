use std::str::FromStr;

use anyhow::{anyhow, Context};
use bullboard_core::constants::DEFAULT_PARALLEL_THRESHOLD;
use bullboard_core::{AggregatorConfig, Currency, CurrencyPolicy};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        if s.eq_ignore_ascii_case("json") {
            Ok(LogFormat::Json)
        } else if s.eq_ignore_ascii_case("text") {
            Ok(LogFormat::Text)
        } else {
            Err(anyhow!("Unknown log format '{}', expected 'text' or 'json'", s))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_format: LogFormat,
    pub currency_policy: CurrencyPolicy,
    /// Currency the total is labelled with on the dashboard view.
    pub default_currency: Currency,
    pub parallel_threshold: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_format: LogFormat::default(),
            currency_policy: CurrencyPolicy::default(),
            default_currency: Currency::default(),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl Config {
    /// Reads the `BULLBOARD_*` variables through `lookup`, falling back to
    /// defaults for unset ones.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let log_format = match lookup("BULLBOARD_LOG_FORMAT") {
            Some(value) => value.parse()?,
            None => defaults.log_format,
        };
        let currency_policy = match lookup("BULLBOARD_CURRENCY_POLICY") {
            Some(value) => value
                .parse()
                .context("Invalid BULLBOARD_CURRENCY_POLICY")?,
            None => defaults.currency_policy,
        };
        let default_currency = lookup("BULLBOARD_DEFAULT_CURRENCY")
            .map(|value| value.trim().to_uppercase())
            .filter(|value| !value.is_empty())
            .map(Currency::from)
            .unwrap_or(defaults.default_currency);
        let parallel_threshold = match lookup("BULLBOARD_PARALLEL_THRESHOLD") {
            Some(value) => value
                .trim()
                .parse()
                .with_context(|| format!("Invalid BULLBOARD_PARALLEL_THRESHOLD '{}'", value))?,
            None => defaults.parallel_threshold,
        };

        Ok(Self {
            log_format,
            currency_policy,
            default_currency,
            parallel_threshold,
        })
    }

    pub fn aggregator(&self) -> AggregatorConfig {
        AggregatorConfig {
            currency_policy: self.currency_policy,
            parallel_threshold: self.parallel_threshold,
        }
    }
}
