use std::{
    io::{self, IsTerminal},
    process::ExitCode,
};

use clap::Parser;
use scripts::{cli::Cli, commands::exit_code, constants::DEFAULT_LOG_FILTER};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr, stdout only carries deployed addresses
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();

    let result = cli.run(&mut io::stdout()).await;
    ExitCode::from(exit_code(&result))
}
