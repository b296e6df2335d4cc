use std::path::Path;

use super::decode_hex;
use crate::account::{Account, PrivAccount, Signature};
use crate::error::Result;

/// Signs a hex message with the key in `key`; the signer id is the key file's id.
pub fn sign_with_key_file(key: &str, message_hex: &str) -> Result<Signature> {
    let priv_account = PrivAccount::from_file(Path::new(key))?;
    let message = decode_hex("message", message_hex)?;
    Ok(priv_account.sign_bytes(&message))
}

pub fn handle_sign_command(key: &str, message_hex: &str) -> Result<()> {
    let signature = sign_with_key_file(key, message_hex)?;
    println!("Signer: {}", signature.signer_id);
    println!("Signature: {}", hex::encode(&signature.bytes));
    Ok(())
}

pub(crate) fn verdict(ok: bool) -> &'static str {
    if ok {
        "valid"
    } else {
        "invalid"
    }
}

pub fn handle_verify_command(
    id: u64,
    pub_key_hex: &str,
    message_hex: &str,
    signature_hex: &str,
) -> Result<bool> {
    let account = Account::new(id, decode_hex("pub_key", pub_key_hex)?);
    let message = decode_hex("message", message_hex)?;
    let signature = Signature::new(id, decode_hex("signature", signature_hex)?);

    let ok = account.verify_bytes(&message, &signature)?;
    println!("{}", verdict(ok));
    Ok(ok)
}
