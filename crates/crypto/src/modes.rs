//! CBC and OFB chaining over a single-block primitive.
//!
//! Both modes pad the plaintext to a whole number of 16-byte blocks before
//! encryption and strip the padding after decryption.
//!
//! # CBC variant
//!
//! Encryption feeds the XOR of the plaintext block and the previous
//! ciphertext block to the primitive, with the previous ciphertext block
//! also supplied as the primitive's nonce:
//!
//! ```text
//! C[0] = IV
//! C[i] = E(key, nonce = C[i-1], P[i] XOR C[i-1])
//! ```
//!
//! Decryption regenerates the keystream for each position and peels both
//! XORs off:
//!
//! ```text
//! K[i] = E(key, nonce = C[i-1], 0^16)
//! P[i] = C[i] XOR K[i] XOR C[i-1]
//! ```
//!
//! This is not textbook CBC. It round-trips only for primitives whose output
//! is `block XOR keystream(key, nonce)`.
//!
//! # OFB
//!
//! ```text
//! K[0] = IV
//! K[i] = E(key, nonce = K[i-1], 0^16)
//! C[i] = P[i] XOR K[i]
//! ```

use crate::error::{SealError, SealResult};
use crate::key::{SecretKey, KEY_SIZE};
use crate::padding::{pad, unpad};
use crate::primitives::{Block, BlockPrimitive, BLOCK_SIZE};

/// IV size in bytes.
pub const IV_SIZE: usize = BLOCK_SIZE;

const ZERO_BLOCK: Block = [0u8; BLOCK_SIZE];

/// Stateless CBC/OFB engine over a block primitive.
#[derive(Debug, Clone, Default)]
pub struct ChainedCipher<P> {
    primitive: P,
}

impl<P: BlockPrimitive> ChainedCipher<P> {
    pub fn new(primitive: P) -> Self {
        Self { primitive }
    }

    pub fn cbc_encrypt(&self, key: &[u8], iv: &[u8], plaintext: &[u8]) -> SealResult<Vec<u8>> {
        let (key, iv) = validate_params(key, iv)?;
        let padded = pad(plaintext, BLOCK_SIZE)?;

        let mut ciphertext = Vec::with_capacity(padded.len());
        let mut previous = iv;
        for chunk in padded.chunks_exact(BLOCK_SIZE) {
            let xored = xor_blocks(&to_block(chunk), &previous);
            let encrypted = self.encrypt_block(&key, &previous, &xored)?;
            ciphertext.extend_from_slice(&encrypted);
            previous = encrypted;
        }

        Ok(ciphertext)
    }

    pub fn cbc_decrypt(&self, key: &[u8], iv: &[u8], ciphertext: &[u8]) -> SealResult<Vec<u8>> {
        let (key, iv) = validate_params(key, iv)?;
        validate_ciphertext_len(ciphertext)?;

        let mut plaintext = Vec::with_capacity(ciphertext.len());
        let mut previous = iv;
        for chunk in ciphertext.chunks_exact(BLOCK_SIZE) {
            let current = to_block(chunk);
            let keystream = self.encrypt_block(&key, &previous, &ZERO_BLOCK)?;
            let decrypted = xor_blocks(&current, &keystream);
            plaintext.extend_from_slice(&xor_blocks(&decrypted, &previous));
            previous = current;
        }

        unpad(&plaintext)
    }

    pub fn ofb_encrypt(&self, key: &[u8], iv: &[u8], plaintext: &[u8]) -> SealResult<Vec<u8>> {
        let (key, iv) = validate_params(key, iv)?;
        let padded = pad(plaintext, BLOCK_SIZE)?;
        self.ofb_apply(&key, iv, &padded)
    }

    pub fn ofb_decrypt(&self, key: &[u8], iv: &[u8], ciphertext: &[u8]) -> SealResult<Vec<u8>> {
        let (key, iv) = validate_params(key, iv)?;
        validate_ciphertext_len(ciphertext)?;
        let padded = self.ofb_apply(&key, iv, ciphertext)?;
        unpad(&padded)
    }

    /// XORs block-aligned `input` with the OFB keystream seeded by `iv`.
    fn ofb_apply(&self, key: &SecretKey, iv: Block, input: &[u8]) -> SealResult<Vec<u8>> {
        let mut output = Vec::with_capacity(input.len());
        let mut feedback = iv;
        for chunk in input.chunks_exact(BLOCK_SIZE) {
            feedback = self.encrypt_block(key, &feedback, &ZERO_BLOCK)?;
            output.extend_from_slice(&xor_blocks(&to_block(chunk), &feedback));
        }
        Ok(output)
    }

    fn encrypt_block(&self, key: &SecretKey, nonce: &Block, block: &Block) -> SealResult<Block> {
        self.primitive
            .encrypt_block(key, nonce, block)
            .map_err(SealError::encryption)
    }
}

/// Length checks shared by all four operations, run before any primitive call.
fn validate_params(key: &[u8], iv: &[u8]) -> SealResult<(SecretKey, Block)> {
    if key.len() != KEY_SIZE {
        return Err(SealError::InvalidKeyLength {
            expected: KEY_SIZE,
            actual: key.len(),
        });
    }
    if iv.len() != IV_SIZE {
        return Err(SealError::InvalidIvLength {
            expected: IV_SIZE,
            actual: iv.len(),
        });
    }

    Ok((SecretKey::from_bytes(key)?, to_block(iv)))
}

fn validate_ciphertext_len(ciphertext: &[u8]) -> SealResult<()> {
    if ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(SealError::InvalidCiphertextLength {
            block_size: BLOCK_SIZE,
            actual: ciphertext.len(),
        });
    }
    Ok(())
}

/// Callers only pass `BLOCK_SIZE`-long slices.
fn to_block(bytes: &[u8]) -> Block {
    let mut block = [0u8; BLOCK_SIZE];
    block.copy_from_slice(bytes);
    block
}

fn xor_blocks(a: &Block, b: &Block) -> Block {
    let mut out = [0u8; BLOCK_SIZE];
    for (o, (x, y)) in out.iter_mut().zip(a.iter().zip(b.iter())) {
        *o = x ^ y;
    }
    out
}
