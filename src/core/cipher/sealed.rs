//! Anonymous sealed-box backend.
//!
//! X25519 + XSalsa20-Poly1305 with an ephemeral sender key, byte-compatible
//! with libsodium's `crypto_box_seal`. Output is randomized per call.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use crypto_box::aead::OsRng;
use crypto_box::{PublicKey, SecretKey};
use tracing::trace;

use super::Cipher;
use crate::core::types::Ciphertext;
use crate::error::{CipherError, Result};

/// X25519 public key length in bytes.
const KEY_SIZE: usize = 32;

/// Sealed-box cryptographic backend.
pub struct SealedBox;

impl SealedBox {
    /// Decode a base64 public key into X25519 key material.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::InvalidPublicKey` if the input is not base64
    /// or does not decode to exactly 32 bytes.
    pub fn parse_public_key(public_key: &str) -> Result<PublicKey> {
        let bytes = STANDARD
            .decode(public_key.trim())
            .map_err(|e| CipherError::InvalidPublicKey(format!("invalid base64: {}", e)))?;

        let raw: [u8; KEY_SIZE] = bytes.as_slice().try_into().map_err(|_| {
            CipherError::InvalidPublicKey(format!(
                "expected {} bytes, got {}",
                KEY_SIZE,
                bytes.len()
            ))
        })?;

        Ok(PublicKey::from(raw))
    }

    /// Open a base64 sealed box with the recipient's secret key.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::DecryptionFailed` if the input is not base64
    /// or was not sealed to this key.
    pub fn open(ciphertext: &str, secret_key: &SecretKey) -> Result<Vec<u8>> {
        trace!(ciphertext_len = ciphertext.len(), "opening sealed box");

        let sealed = STANDARD
            .decode(ciphertext)
            .map_err(|e| CipherError::DecryptionFailed(format!("invalid base64: {}", e)))?;

        secret_key
            .unseal(&sealed)
            .map_err(|e| CipherError::DecryptionFailed(format!("{}", e)).into())
    }

    /// Generate a fresh recipient key pair, returning the secret key and
    /// its base64 public key.
    pub fn generate_keypair() -> (SecretKey, String) {
        let secret_key = SecretKey::generate(&mut OsRng);
        let public_key = STANDARD.encode(secret_key.public_key().as_bytes());
        (secret_key, public_key)
    }
}

impl Cipher for SealedBox {
    fn encrypt(&self, plaintext: &[u8], public_key: &str) -> Result<Ciphertext> {
        trace!(plaintext_len = plaintext.len(), "sealing");

        let recipient = Self::parse_public_key(public_key)?;
        let sealed = recipient
            .seal(&mut OsRng, plaintext)
            .map_err(|e| CipherError::EncryptionFailed(format!("{}", e)))?;

        trace!(ciphertext_len = sealed.len(), "sealed");

        Ok(STANDARD.encode(sealed))
    }
}
