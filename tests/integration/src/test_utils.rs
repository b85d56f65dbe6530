//! Test utilities for the integration suites

use std::io::Write;
use std::path::Path;

use tailseal_crypto::{
    Ascon128aAead, AsconDigest, Aes128GcmAead, Blake3Digest, SchemeProfile, SecretKey,
    SignatureCodec,
};
use tempfile::NamedTempFile;

/// Author used by most scenarios
pub const TEST_AUTHOR: &str = "test.author@organization.com";

/// Hex key used by the detached-tag scenarios
pub const GIFT_KEY_HEX: &str = "0123456789ABCDEF0123456789ABCDEF";

/// Install a test subscriber once; later calls are no-ops
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Embedded-tag codec over Ascon primitives
pub fn ascon_codec() -> SignatureCodec<AsconDigest, Ascon128aAead> {
    SignatureCodec::new(SchemeProfile::ASCON, AsconDigest, Ascon128aAead)
}

/// Detached-tag codec over BLAKE3 and AES-128-GCM
pub fn gift_codec() -> SignatureCodec<Blake3Digest, Aes128GcmAead> {
    SignatureCodec::new(SchemeProfile::GIFT, Blake3Digest, Aes128GcmAead)
}

/// Fixed raw key for reproducible failures
pub fn raw_key() -> SecretKey {
    SecretKey::from_bytes(b"tailseal-test-k1").unwrap()
}

/// Temporary file holding `content`, removed on drop
pub fn temp_document(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content).unwrap();
    file.flush().unwrap();
    file
}

/// Current bytes of the file at `path`
pub fn read_bytes(path: &Path) -> Vec<u8> {
    std::fs::read(path).unwrap()
}

/// Overwrite the file at `path` with `bytes`
pub fn write_bytes(path: &Path, bytes: &[u8]) {
    std::fs::write(path, bytes).unwrap();
}
