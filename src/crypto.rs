use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::{LedgerError, Result};

/// Length of an Ed25519 secret key in bytes.
pub const PRIVATE_KEY_LENGTH: usize = ed25519_dalek::SECRET_KEY_LENGTH;
/// Length of an Ed25519 public key in bytes.
pub const PUBLIC_KEY_LENGTH: usize = ed25519_dalek::PUBLIC_KEY_LENGTH;

#[derive(Clone)]
pub struct KeyPair {
    pub signing_key: SigningKey,
}

impl KeyPair {
    /// Generate a new Ed25519 keypair from 32 bytes of OS randomness
    pub fn generate() -> Self {
        let mut secret = [0u8; PRIVATE_KEY_LENGTH];
        OsRng.fill_bytes(&mut secret);
        KeyPair {
            signing_key: SigningKey::from_bytes(&secret),
        }
    }

    /// Restore a keypair from raw secret bytes
    pub fn from_private_key(priv_key: &[u8]) -> Result<Self> {
        let secret: [u8; PRIVATE_KEY_LENGTH] = priv_key.try_into().map_err(|_| {
            LedgerError::InvalidKey(format!(
                "private key must be {} bytes, got {}",
                PRIVATE_KEY_LENGTH,
                priv_key.len()
            ))
        })?;
        Ok(KeyPair {
            signing_key: SigningKey::from_bytes(&secret),
        })
    }

    /// Sign a message with the private key
    pub fn sign(&self, message: &[u8]) -> Vec<u8> {
        self.signing_key.sign(message).to_bytes().to_vec()
    }

    pub fn public_key(&self) -> Vec<u8> {
        self.signing_key.verifying_key().to_bytes().to_vec()
    }

    pub fn private_key(&self) -> Vec<u8> {
        self.signing_key.to_bytes().to_vec()
    }

    /// Get public key as hex string
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.signing_key.verifying_key().to_bytes())
    }
}

/// One entry of a batch verification.
#[derive(Debug, Clone, Copy)]
pub struct VerifyItem<'a> {
    pub message: &'a [u8],
    pub pub_key: &'a [u8],
    pub signature: &'a [u8],
}

fn parse_pub_key(pub_key: &[u8]) -> Option<VerifyingKey> {
    let bytes: [u8; PUBLIC_KEY_LENGTH] = pub_key.try_into().ok()?;
    VerifyingKey::from_bytes(&bytes).ok()
}

/// Verify a signature against a message with a raw public key.
/// Malformed keys or signatures verify as `false`.
pub fn verify(message: &[u8], pub_key: &[u8], signature: &[u8]) -> bool {
    match (parse_pub_key(pub_key), Signature::from_slice(signature)) {
        (Some(key), Ok(sig)) => key.verify(message, &sig).is_ok(),
        _ => false,
    }
}

/// Verify many signatures at once. Equivalent to all individual verifications
/// passing; an empty batch is trivially valid.
pub fn verify_batch(items: &[VerifyItem<'_>]) -> bool {
    if items.is_empty() {
        return true;
    }
    let mut messages = Vec::with_capacity(items.len());
    let mut signatures = Vec::with_capacity(items.len());
    let mut keys = Vec::with_capacity(items.len());
    for item in items {
        let (Some(key), Ok(sig)) = (
            parse_pub_key(item.pub_key),
            Signature::from_slice(item.signature),
        ) else {
            return false;
        };
        messages.push(item.message);
        signatures.push(sig);
        keys.push(key);
    }
    ed25519_dalek::verify_batch(&messages, &signatures, &keys).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_and_verify() {
        let kp = KeyPair::generate();
        let sig = kp.sign(b"hello");
        assert_eq!(sig.len(), 64);
        assert!(verify(b"hello", &kp.public_key(), &sig));
        assert!(!verify(b"hell0", &kp.public_key(), &sig));
    }

    #[test]
    fn test_malformed_inputs_are_false() {
        let kp = KeyPair::generate();
        let sig = kp.sign(b"msg");
        assert!(!verify(b"msg", &kp.public_key()[..31], &sig));
        assert!(!verify(b"msg", &kp.public_key(), &sig[..63]));
        assert!(!verify(b"msg", &[], &[]));
    }

    #[test]
    fn test_private_key_round_trip() {
        let kp = KeyPair::generate();
        let restored = KeyPair::from_private_key(&kp.private_key()).unwrap();
        assert_eq!(restored.public_key(), kp.public_key());
        assert_eq!(restored.public_key_hex(), hex::encode(kp.public_key()));

        assert!(matches!(
            KeyPair::from_private_key(&[1u8; 31]),
            Err(LedgerError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_verify_batch() {
        let a = KeyPair::generate();
        let b = KeyPair::generate();
        let sig_a = a.sign(b"first");
        let sig_b = b.sign(b"second");
        let pk_a = a.public_key();
        let pk_b = b.public_key();

        let good = [
            VerifyItem { message: b"first", pub_key: &pk_a, signature: &sig_a },
            VerifyItem { message: b"second", pub_key: &pk_b, signature: &sig_b },
        ];
        assert!(verify_batch(&good));
        assert!(verify_batch(&[]));

        let swapped = [
            VerifyItem { message: b"first", pub_key: &pk_a, signature: &sig_a },
            VerifyItem { message: b"second", pub_key: &pk_a, signature: &sig_b },
        ];
        assert!(!verify_batch(&swapped));
    }
}
