use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Keep track of what you paid for your stocks.
#[derive(Parser, Debug)]
#[command(name = "bullboard", author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show a dashboard built from sample events
    Demo,

    /// Show the total buying price of a transactions file
    Dashboard {
        /// CSV file with ticker, currency, amount and price columns
        #[arg(short, long)]
        transactions: PathBuf,

        /// Print a JSON summary instead of text
        #[arg(long)]
        json: bool,

        /// Leave out invalid rows instead of failing
        #[arg(long)]
        skip_invalid: bool,
    },

    /// List the transactions of a file as a journal
    Journal {
        /// CSV file with ticker, currency, amount and price columns
        #[arg(short, long)]
        transactions: PathBuf,

        /// Date of the transactions (YYYY-MM-DD or DD-MM-YYYY), today if omitted
        #[arg(short, long)]
        date: Option<String>,

        /// Leave out invalid rows instead of failing
        #[arg(long)]
        skip_invalid: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_dashboard_arguments() {
        let cli = Cli::try_parse_from([
            "bullboard",
            "dashboard",
            "--transactions",
            "trades.csv",
            "--json",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Command::Dashboard {
                transactions: PathBuf::from("trades.csv"),
                json: true,
                skip_invalid: false,
            }
        );
    }

    #[test]
    fn test_dashboard_requires_transactions() {
        assert!(Cli::try_parse_from(["bullboard", "dashboard"]).is_err());
    }
}
