//! Error taxonomy for sealing, verification and the chaining modes.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced to callers of this crate.
///
/// Failures reported by the underlying primitives are translated into this
/// taxonomy at the codec boundary and never escape as [`PrimitiveError`].
#[derive(Debug, Error)]
pub enum SealError {
    #[error("Invalid key length: {actual} (expected {expected})")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("Invalid key encoding: {reason}")]
    InvalidKeyEncoding { reason: String },

    #[error("Invalid IV length: {actual} (expected {expected})")]
    InvalidIvLength { expected: usize, actual: usize },

    #[error("Ciphertext length {actual} is not a multiple of {block_size}")]
    InvalidCiphertextLength { block_size: usize, actual: usize },

    #[error("Invalid block size {block_size} for padding (must be 1..={max})")]
    InvalidBlockSize { block_size: usize, max: usize },

    #[error("Invalid padding")]
    InvalidPadding,

    #[error("Document not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Input too small to contain a signature: {actual} bytes (minimum {minimum})")]
    TooSmall { actual: usize, minimum: usize },

    #[error("No signature found")]
    NoSignatureFound,

    #[error("Signature decryption failed")]
    DecryptionFailed,

    #[error("Malformed signature: {reason}")]
    MalformedSignature { reason: String },

    #[error("Document content has been modified")]
    ContentModified,

    #[error("Encryption failed: {reason}")]
    EncryptionFailed { reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for this crate.
pub type SealResult<T> = Result<T, SealError>;

/// Failure reported by a hash, AEAD or block primitive implementation.
#[derive(Debug, Error)]
pub enum PrimitiveError {
    #[error("Authentication failed")]
    Authentication,

    #[error("Invalid primitive input: {0}")]
    InvalidInput(String),

    #[error("Primitive failure: {0}")]
    Other(String),
}

impl SealError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        SealError::MalformedSignature {
            reason: reason.into(),
        }
    }

    pub(crate) fn encryption(err: PrimitiveError) -> Self {
        SealError::EncryptionFailed {
            reason: err.to_string(),
        }
    }
}
