//! Block primitive derived from an AEAD.

use super::{AeadPrimitive, Block, BlockPrimitive, BLOCK_SIZE};
use crate::error::PrimitiveError;
use crate::key::SecretKey;

/// Turns an AEAD into a 16-byte block function.
///
/// The block is encrypted with the chaining value as nonce and empty
/// associated data; the first 16 bytes of the output are kept and the tag is
/// discarded. For AEADs whose rate covers the whole block (Ascon-128a, GCM)
/// this yields `block XOR keystream(key, nonce)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AeadBlockPrimitive<A> {
    aead: A,
}

impl<A: AeadPrimitive> AeadBlockPrimitive<A> {
    pub fn new(aead: A) -> Self {
        Self { aead }
    }
}

impl<A: AeadPrimitive> BlockPrimitive for AeadBlockPrimitive<A> {
    fn encrypt_block(
        &self,
        key: &SecretKey,
        nonce: &Block,
        block: &Block,
    ) -> Result<Block, PrimitiveError> {
        let output = self.aead.encrypt(key, nonce, &[], block)?;
        let head = output.get(..BLOCK_SIZE).ok_or_else(|| {
            PrimitiveError::Other(format!(
                "AEAD output of {} bytes is shorter than one block",
                output.len()
            ))
        })?;

        let mut out = [0u8; BLOCK_SIZE];
        out.copy_from_slice(head);
        Ok(out)
    }
}
