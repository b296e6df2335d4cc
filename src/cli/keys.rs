use std::path::Path;

use clap::Subcommand;

use crate::account::PrivAccount;
use crate::config::LedgerConfig;
use crate::error::{LedgerError, Result};

#[derive(Subcommand, Debug, Clone)]
pub enum KeysCommands {
    /// Generate a new account key file
    Generate {
        /// Output file (defaults to node.key_file)
        #[arg(long)]
        out: Option<String>,
        /// Ledger id, if the account is already registered
        #[arg(long, default_value_t = 0)]
        id: u64,
    },
    /// Load a key file and print its account
    Inspect {
        #[arg(long)]
        key: Option<String>,
    },
}

pub fn handle_keys_command(cmd: KeysCommands, config: &LedgerConfig) -> Result<()> {
    match cmd {
        KeysCommands::Generate { out, id } => {
            let filename = out.unwrap_or_else(|| config.node.key_file.clone());
            if Path::new(&filename).exists() {
                return Err(LedgerError::InvalidInput(format!(
                    "File '{}' already exists. Aborting to prevent overwrite.",
                    filename
                )));
            }

            let mut priv_account = PrivAccount::generate();
            priv_account.account.id = id;
            priv_account.save(Path::new(&filename))?;

            println!("Key saved to '{}'", filename);
            println!("{}", priv_account.account);
            println!("Public Key: {}", hex::encode(&priv_account.pub_key));
        }
        KeysCommands::Inspect { key } => {
            let filename = key.unwrap_or_else(|| config.node.key_file.clone());
            let priv_account = PrivAccount::from_file(Path::new(&filename))?;
            println!("{}", priv_account.account);
            println!("Id: {}", priv_account.id);
            println!("Registered: {}", priv_account.is_registered());
            println!("Public Key: {}", hex::encode(&priv_account.pub_key));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("node_key.json");
        let out = path.to_str().unwrap().to_string();
        let config = LedgerConfig::default();

        let generate = KeysCommands::Generate { out: Some(out.clone()), id: 9 };
        handle_keys_command(generate.clone(), &config).unwrap();
        let first = std::fs::read_to_string(&path).unwrap();
        assert_eq!(PrivAccount::from_file(&path).unwrap().id, 9);

        assert!(matches!(
            handle_keys_command(generate, &config),
            Err(LedgerError::InvalidInput(_))
        ));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), first);

        handle_keys_command(KeysCommands::Inspect { key: Some(out) }, &config).unwrap();
    }

    #[test]
    fn test_inspect_uses_config_key_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = LedgerConfig::default();
        config.node.key_file = dir.path().join("absent.json").to_str().unwrap().to_string();

        assert!(matches!(
            handle_keys_command(KeysCommands::Inspect { key: None }, &config),
            Err(LedgerError::KeyLoad(_))
        ));
    }
}
