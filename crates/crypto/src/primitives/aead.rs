//! AEAD adapters with 128-bit keys and 128-bit nonces.

use aes_gcm::aead::consts::U16;
use aes_gcm::aes::Aes128;
use aes_gcm::AesGcm;

use super::{AeadPrimitive, Nonce};
use crate::error::PrimitiveError;
use crate::key::SecretKey;

/// AES-128-GCM instantiated with a 16-byte nonce (GHASH-derived counter block).
type Aes128Gcm16 = AesGcm<Aes128, U16>;

/// Ascon-128a (16-byte key, nonce and tag, 16-byte rate).
///
/// The 16-byte rate makes every output byte of a one-block message depend
/// only on the key, the nonce and the matching input byte.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ascon128aAead;

impl AeadPrimitive for Ascon128aAead {
    fn encrypt(
        &self,
        key: &SecretKey,
        nonce: &Nonce,
        associated_data: &[u8],
        plaintext: &[u8],
    ) -> Result<Vec<u8>, PrimitiveError> {
        use ascon_aead::aead::{generic_array::GenericArray, Aead, KeyInit, Payload};

        let cipher = ascon_aead::Ascon128a::new_from_slice(key.as_bytes())
            .map_err(|e| PrimitiveError::InvalidInput(e.to_string()))?;
        cipher
            .encrypt(
                GenericArray::from_slice(nonce),
                Payload {
                    msg: plaintext,
                    aad: associated_data,
                },
            )
            .map_err(|e| PrimitiveError::Other(format!("ascon-128a encryption: {}", e)))
    }

    fn decrypt(
        &self,
        key: &SecretKey,
        nonce: &Nonce,
        associated_data: &[u8],
        ciphertext: &[u8],
    ) -> Result<Vec<u8>, PrimitiveError> {
        use ascon_aead::aead::{generic_array::GenericArray, Aead, KeyInit, Payload};

        let cipher = ascon_aead::Ascon128a::new_from_slice(key.as_bytes())
            .map_err(|e| PrimitiveError::InvalidInput(e.to_string()))?;
        cipher
            .decrypt(
                GenericArray::from_slice(nonce),
                Payload {
                    msg: ciphertext,
                    aad: associated_data,
                },
            )
            .map_err(|_| PrimitiveError::Authentication)
    }
}

/// AES-128-GCM with a 16-byte nonce.
#[derive(Debug, Clone, Copy, Default)]
pub struct Aes128GcmAead;

impl AeadPrimitive for Aes128GcmAead {
    fn encrypt(
        &self,
        key: &SecretKey,
        nonce: &Nonce,
        associated_data: &[u8],
        plaintext: &[u8],
    ) -> Result<Vec<u8>, PrimitiveError> {
        use aes_gcm::aead::{generic_array::GenericArray, Aead, KeyInit, Payload};

        let cipher = Aes128Gcm16::new_from_slice(key.as_bytes())
            .map_err(|e| PrimitiveError::InvalidInput(e.to_string()))?;
        cipher
            .encrypt(
                GenericArray::from_slice(nonce),
                Payload {
                    msg: plaintext,
                    aad: associated_data,
                },
            )
            .map_err(|e| PrimitiveError::Other(format!("aes-128-gcm encryption: {}", e)))
    }

    fn decrypt(
        &self,
        key: &SecretKey,
        nonce: &Nonce,
        associated_data: &[u8],
        ciphertext: &[u8],
    ) -> Result<Vec<u8>, PrimitiveError> {
        use aes_gcm::aead::{generic_array::GenericArray, Aead, KeyInit, Payload};

        let cipher = Aes128Gcm16::new_from_slice(key.as_bytes())
            .map_err(|e| PrimitiveError::InvalidInput(e.to_string()))?;
        cipher
            .decrypt(
                GenericArray::from_slice(nonce),
                Payload {
                    msg: ciphertext,
                    aad: associated_data,
                },
            )
            .map_err(|_| PrimitiveError::Authentication)
    }
}
