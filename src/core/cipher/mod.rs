//! Cryptographic operations.
//!
//! GitHub only accepts secret values sealed to the target's public key with
//! libsodium's anonymous sealed box. The [`Cipher`] trait keeps that choice
//! behind a seam so the orchestrator never touches key material directly.

use crate::core::types::Ciphertext;
use crate::error::Result;

mod sealed;

pub use sealed::SealedBox;

/// Public-key encryption backend.
pub trait Cipher {
    /// Encrypt plaintext for the holder of `public_key`.
    ///
    /// # Arguments
    ///
    /// * `plaintext` - Bytes to encrypt, any length (including empty)
    /// * `public_key` - Base64-encoded recipient public key
    ///
    /// # Returns
    ///
    /// Base64-encoded ciphertext.
    ///
    /// # Errors
    ///
    /// Returns `CipherError` if the key is malformed or sealing fails.
    fn encrypt(&self, plaintext: &[u8], public_key: &str) -> Result<Ciphertext>;
}

/// Seal plaintext to a base64 public key with the default backend.
///
/// This is a convenience wrapper around `SealedBox::encrypt`.
///
/// # Errors
///
/// Returns `CipherError` if the key is malformed or sealing fails.
pub fn encrypt(plaintext: &[u8], public_key: &str) -> Result<Ciphertext> {
    SealedBox.encrypt(plaintext, public_key)
}
