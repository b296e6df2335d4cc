use std::process::ExitCode;

use clap::Parser;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use ledger_accounts::cli::{self, Cli};
use ledger_accounts::config::LedgerConfig;

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = LedgerConfig::load(&cli.config);
    let log_level = loaded
        .as_ref()
        .map(|c| c.node.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    init_tracing(&log_level);

    // Only commands that touch the key file or the store get a default config file written.
    let config = match loaded {
        Ok(config) => config,
        Err(e) if cli.command.uses_config() => {
            warn!("{}. Using defaults.", e);
            LedgerConfig::write_default(&cli.config)
        }
        Err(_) => LedgerConfig::default(),
    };

    // Key load failures and protocol violations end the process here.
    match cli::run(cli.command, &config) {
        Ok(code) => code,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
