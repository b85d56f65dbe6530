//! Cryptographic operations for Tailseal.
//!
//! This crate appends tamper-evident, author-attributed signature blocks to
//! arbitrary documents and provides chained block-cipher modes over an
//! injected single-block primitive.
//!
//! # Core Capabilities
//!
//! - **Signature Blocks**: Seal author, timestamp and content digest under a
//!   16-byte key and append them to a document
//! - **Verification**: Locate the newest block, authenticate it and detect any
//!   modification of the preceding bytes
//! - **Chaining Modes**: CBC and OFB with reversible padding
//! - **Key Handling**: Validated raw and hex keys, zeroized on drop
//!
//! # Supported Algorithms
//!
//! - **Hashing**: BLAKE3, Ascon-Hash
//! - **AEAD**: Ascon-128a, AES-128-GCM (16-byte nonce)
//!
//! # Security Principles
//!
//! - Primitives come from vetted implementations behind traits
//! - Keys are never logged
//! - Parameters are validated before any cryptographic work

pub mod config;
pub mod document;
pub mod error;
pub mod key;
pub mod modes;
pub mod padding;
pub mod primitives;
pub mod signature;

pub use config::{codec_from_config, key_from_config, DynSignatureCodec};
pub use document::{DocumentStore, FileDocument, MemoryDocument};
pub use error::{PrimitiveError, SealError, SealResult};
pub use key::{SecretKey, KEY_HEX_LEN, KEY_SIZE};
pub use modes::ChainedCipher;
pub use padding::{pad, unpad};
pub use primitives::{
    AeadBlockPrimitive, AeadPrimitive, Aes128GcmAead, Ascon128aAead, AsconDigest, Blake3Digest,
    BlockPrimitive, HashPrimitive,
};
pub use signature::{
    LocatedSignature, SchemeProfile, SignatureBlock, SignatureCodec, SignatureMetadata,
    VerifiedSignature, ASCON_MAGIC, GIFT_MAGIC,
};
