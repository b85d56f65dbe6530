//! Interfaces to the external cryptographic primitives.
//!
//! The signature codec and the chaining modes never touch cipher or hash
//! internals directly. They are generic over these three traits, and the
//! adapters in the submodules bind them to vetted RustCrypto/BLAKE3
//! implementations.

pub mod aead;
pub mod block;
pub mod hash;

use crate::error::PrimitiveError;
use crate::key::SecretKey;

pub use aead::{Aes128GcmAead, Ascon128aAead};
pub use block::AeadBlockPrimitive;
pub use hash::{AsconDigest, Blake3Digest};

/// Digest size in bytes.
pub const DIGEST_SIZE: usize = 32;

/// Nonce size in bytes for the AEAD and block primitives.
pub const NONCE_SIZE: usize = 16;

/// Block size of the chaining modes.
pub const BLOCK_SIZE: usize = 16;

/// Authentication tag size appended by the AEAD primitives.
pub const TAG_SIZE: usize = 16;

pub type Digest = [u8; DIGEST_SIZE];
pub type Nonce = [u8; NONCE_SIZE];
pub type Block = [u8; BLOCK_SIZE];

/// Unkeyed hash with a fixed 32-byte output.
pub trait HashPrimitive {
    fn hash(&self, data: &[u8]) -> Digest;
}

/// Authenticated encryption with associated data.
///
/// `encrypt` returns the ciphertext with the 16-byte tag appended; `decrypt`
/// takes the same layout and fails with [`PrimitiveError::Authentication`]
/// when the tag does not verify.
pub trait AeadPrimitive {
    fn encrypt(
        &self,
        key: &SecretKey,
        nonce: &Nonce,
        associated_data: &[u8],
        plaintext: &[u8],
    ) -> Result<Vec<u8>, PrimitiveError>;

    fn decrypt(
        &self,
        key: &SecretKey,
        nonce: &Nonce,
        associated_data: &[u8],
        ciphertext: &[u8],
    ) -> Result<Vec<u8>, PrimitiveError>;
}

/// Single-block function used by the chaining modes.
///
/// The chaining value is passed as `nonce`. Decryption in CBC and OFB relies
/// on the output being `block XOR keystream(key, nonce)`, i.e. on
/// `encrypt_block(k, n, b) == b ^ encrypt_block(k, n, 0)`.
pub trait BlockPrimitive {
    fn encrypt_block(
        &self,
        key: &SecretKey,
        nonce: &Block,
        block: &Block,
    ) -> Result<Block, PrimitiveError>;
}

impl<T: HashPrimitive + ?Sized> HashPrimitive for Box<T> {
    fn hash(&self, data: &[u8]) -> Digest {
        (**self).hash(data)
    }
}

impl<T: AeadPrimitive + ?Sized> AeadPrimitive for Box<T> {
    fn encrypt(
        &self,
        key: &SecretKey,
        nonce: &Nonce,
        associated_data: &[u8],
        plaintext: &[u8],
    ) -> Result<Vec<u8>, PrimitiveError> {
        (**self).encrypt(key, nonce, associated_data, plaintext)
    }

    fn decrypt(
        &self,
        key: &SecretKey,
        nonce: &Nonce,
        associated_data: &[u8],
        ciphertext: &[u8],
    ) -> Result<Vec<u8>, PrimitiveError> {
        (**self).decrypt(key, nonce, associated_data, ciphertext)
    }
}

impl<T: BlockPrimitive + ?Sized> BlockPrimitive for Box<T> {
    fn encrypt_block(
        &self,
        key: &SecretKey,
        nonce: &Block,
        block: &Block,
    ) -> Result<Block, PrimitiveError> {
        (**self).encrypt_block(key, nonce, block)
    }
}
