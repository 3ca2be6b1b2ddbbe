use std::ffi::OsString;

use clap::Parser;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::Cli;
use crate::config::{Config, LogFormat};

#[derive(Debug)]
pub enum StartupError {
    /// Bad arguments, or a `--help`/`--version` request clap should print.
    Args(clap::Error),
    Config(anyhow::Error),
}

/// Parses arguments before reading configuration, so `--help` and
/// `--version` answer whatever the `BULLBOARD_*` variables hold.
pub fn startup<I, T>(
    args: I,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(Cli, Config), StartupError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::try_parse_from(args).map_err(StartupError::Args)?;
    let config = Config::from_lookup(lookup).map_err(StartupError::Config)?;
    Ok((cli, config))
}

/// Installs the global subscriber. Logs go to stderr so command output on
/// stdout stays clean. `RUST_LOG` overrides the default `info` filter.
pub fn init_tracing(log_format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match log_format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}
