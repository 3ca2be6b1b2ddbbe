mod cli;
mod commands;
mod config;
mod demo;
mod main_lib;

use main_lib::{init_tracing, startup, StartupError};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let (cli, config) = match startup(std::env::args_os(), |key| std::env::var(key).ok()) {
        Ok(loaded) => loaded,
        Err(StartupError::Args(err)) => err.exit(),
        Err(StartupError::Config(err)) => return Err(err),
    };
    init_tracing(config.log_format);

    let stdout = std::io::stdout();
    commands::run(&cli.command, &config, &mut stdout.lock())
}
