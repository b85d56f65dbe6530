//! Digest adapters.

use super::{Digest, HashPrimitive, DIGEST_SIZE};

/// BLAKE3 with the default 32-byte output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake3Digest;

impl HashPrimitive for Blake3Digest {
    fn hash(&self, data: &[u8]) -> Digest {
        *blake3::hash(data).as_bytes()
    }
}

/// Ascon-Hash (256-bit output).
#[derive(Debug, Clone, Copy, Default)]
pub struct AsconDigest;

impl HashPrimitive for AsconDigest {
    fn hash(&self, data: &[u8]) -> Digest {
        let output = <ascon_hash::AsconHash as ascon_hash::Digest>::digest(data);
        let mut digest = [0u8; DIGEST_SIZE];
        digest.copy_from_slice(&output);
        digest
    }
}
