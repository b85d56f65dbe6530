//! Building codecs from [`SignerConfig`].

use tailseal_core::{PrimitiveSuite, SignerConfig};

use crate::error::SealResult;
use crate::key::SecretKey;
use crate::primitives::{
    AeadPrimitive, Aes128GcmAead, Ascon128aAead, AsconDigest, Blake3Digest, HashPrimitive,
};
use crate::signature::{SchemeProfile, SignatureCodec};

/// Codec whose primitives are chosen at runtime.
pub type DynSignatureCodec = SignatureCodec<Box<dyn HashPrimitive>, Box<dyn AeadPrimitive>>;

/// Builds the codec selected by `config.scheme` and `config.suite`.
pub fn codec_from_config(config: &SignerConfig) -> DynSignatureCodec {
    let (hash, aead): (Box<dyn HashPrimitive>, Box<dyn AeadPrimitive>) = match config.suite {
        PrimitiveSuite::Ascon => (Box::new(AsconDigest), Box::new(Ascon128aAead)),
        PrimitiveSuite::Blake3AesGcm => (Box::new(Blake3Digest), Box::new(Aes128GcmAead)),
    };
    SignatureCodec::new(SchemeProfile::from(config.scheme), hash, aead)
}

/// Decodes `config.key_hex`, if one is configured.
pub fn key_from_config(config: &SignerConfig) -> SealResult<Option<SecretKey>> {
    config
        .key_hex
        .as_deref()
        .map(SecretKey::from_hex)
        .transpose()
}
