//! Symmetric key material shared by the signature codec and the chaining modes.

use rand::RngCore;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{SealError, SealResult};

/// Key size in bytes (128 bits).
pub const KEY_SIZE: usize = 16;

/// Length of the hex encoding of a key.
pub const KEY_HEX_LEN: usize = KEY_SIZE * 2;

/// A validated 16-byte secret key.
///
/// Construction is the only place key length is checked; every holder of a
/// `SecretKey` can rely on it being exactly [`KEY_SIZE`] bytes. The bytes are
/// zeroized on drop and never printed by `Debug`.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey([u8; KEY_SIZE]);

impl SecretKey {
    /// Builds a key from raw bytes, rejecting anything but exactly 16 bytes.
    pub fn from_bytes(bytes: &[u8]) -> SealResult<Self> {
        if bytes.len() != KEY_SIZE {
            return Err(SealError::InvalidKeyLength {
                expected: KEY_SIZE,
                actual: bytes.len(),
            });
        }

        let mut key = [0u8; KEY_SIZE];
        key.copy_from_slice(bytes);
        Ok(Self(key))
    }

    /// Builds a key from a 32-character hex string (either case).
    pub fn from_hex(encoded: &str) -> SealResult<Self> {
        if encoded.len() != KEY_HEX_LEN {
            return Err(SealError::InvalidKeyLength {
                expected: KEY_HEX_LEN,
                actual: encoded.len(),
            });
        }

        let mut decoded = hex::decode(encoded).map_err(|e| SealError::InvalidKeyEncoding {
            reason: e.to_string(),
        })?;
        let key = Self::from_bytes(&decoded);
        decoded.zeroize();
        key
    }

    /// Generates a fresh random key from the thread-local CSPRNG.
    pub fn generate() -> Self {
        let mut key = [0u8; KEY_SIZE];
        rand::thread_rng().fill_bytes(&mut key);
        Self(key)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }

    /// Lowercase hex encoding, the inverse of [`SecretKey::from_hex`].
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}
