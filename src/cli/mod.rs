pub mod account;
pub mod keys;
pub mod sign;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::config::LedgerConfig;
use crate::error::{LedgerError, Result};

#[derive(Parser)]
#[command(name = "ledger-accounts")]
#[command(about = "Ledger account keys, signatures and records", long_about = None)]
pub struct Cli {
    /// Path to the TOML config file
    #[arg(long, default_value = "ledger.toml")]
    pub config: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Key file management
    Keys {
        #[command(subcommand)]
        cmd: keys::KeysCommands,
    },
    /// Sign a hex-encoded message with a key file
    Sign {
        /// Key file (defaults to node.key_file)
        #[arg(long)]
        key: Option<String>,
        #[arg(long)]
        message: String,
    },
    /// Verify a hex-encoded signature against an account
    Verify {
        #[arg(long)]
        id: u64,
        #[arg(long)]
        pub_key: String,
        #[arg(long)]
        message: String,
        #[arg(long)]
        signature: String,
    },
    /// Stored account records
    Account {
        #[command(subcommand)]
        cmd: account::AccountCommands,
    },
}

impl Commands {
    /// Whether the command reads the key file or the store named in the config.
    pub fn uses_config(&self) -> bool {
        match self {
            Commands::Keys { .. } | Commands::Account { .. } => true,
            Commands::Sign { key, .. } => key.is_none(),
            Commands::Verify { .. } => false,
        }
    }
}

pub fn run(command: Commands, config: &LedgerConfig) -> Result<ExitCode> {
    match command {
        Commands::Keys { cmd } => keys::handle_keys_command(cmd, config)?,
        Commands::Sign { key, message } => {
            let key = key.unwrap_or_else(|| config.node.key_file.clone());
            sign::handle_sign_command(&key, &message)?
        }
        Commands::Verify { id, pub_key, message, signature } => {
            if !sign::handle_verify_command(id, &pub_key, &message, &signature)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Account { cmd } => account::handle_account_command(cmd, config)?,
    }
    Ok(ExitCode::SUCCESS)
}

pub(crate) fn decode_hex(field: &str, value: &str) -> Result<Vec<u8>> {
    hex::decode(value.trim())
        .map_err(|e| LedgerError::InvalidInput(format!("{} is not valid hex: {}", field, e)))
}
