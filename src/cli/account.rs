use std::path::Path;

use clap::Subcommand;

use crate::config::LedgerConfig;
use crate::encoding::CanonicalSerialize;
use crate::error::{LedgerError, Result};
use crate::storage::AccountStore;

#[derive(Subcommand, Debug, Clone)]
pub enum AccountCommands {
    /// Print a stored account and its canonical encoding
    Show {
        #[arg(long)]
        id: u64,
    },
}

pub fn handle_account_command(cmd: AccountCommands, config: &LedgerConfig) -> Result<()> {
    match cmd {
        AccountCommands::Show { id } => {
            let store = AccountStore::open(Path::new(&config.node.db_path))?;
            let detail = store
                .get(id)?
                .ok_or_else(|| LedgerError::InvalidInput(format!("Account {} not found", id)))?;
            println!("{}", detail);
            println!("Encoded: {}", hex::encode(detail.to_bytes()));
        }
    }
    Ok(())
}
