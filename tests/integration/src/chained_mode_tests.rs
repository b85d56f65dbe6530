//! Chained Mode Integration Tests
//!
//! Runs CBC and OFB through the public API over both shipped block
//! primitives, including the zero key / zero IV reference message.

use tailseal_crypto::{
    pad, unpad, AeadBlockPrimitive, Aes128GcmAead, Ascon128aAead, BlockPrimitive, ChainedCipher,
    SealError,
};

use crate::test_utils::init_tracing;

const MESSAGE: &[u8] = b"This is a test message for encryption modes!";

fn ascon_modes() -> ChainedCipher<AeadBlockPrimitive<Ascon128aAead>> {
    ChainedCipher::new(AeadBlockPrimitive::new(Ascon128aAead))
}

fn gcm_modes() -> ChainedCipher<AeadBlockPrimitive<Aes128GcmAead>> {
    ChainedCipher::new(AeadBlockPrimitive::new(Aes128GcmAead))
}

fn assert_round_trips<P: BlockPrimitive>(modes: &ChainedCipher<P>, key: &[u8], iv: &[u8]) {
    for len in [0usize, 1, 15, 16, 17, 31, 32, 33, 100, 1024] {
        let plaintext: Vec<u8> = (0..len).map(|i| (i * 7 + 3) as u8).collect();

        let cbc = modes.cbc_encrypt(key, iv, &plaintext).unwrap();
        assert_eq!(cbc.len(), (len / 16 + 1) * 16);
        assert_eq!(modes.cbc_decrypt(key, iv, &cbc).unwrap(), plaintext);

        let ofb = modes.ofb_encrypt(key, iv, &plaintext).unwrap();
        assert_eq!(ofb.len(), cbc.len());
        assert_eq!(modes.ofb_decrypt(key, iv, &ofb).unwrap(), plaintext);
    }
}

#[test]
fn test_zero_key_zero_iv_reference_message() {
    init_tracing();
    let modes = ascon_modes();
    let key = [0u8; 16];
    let iv = [0u8; 16];

    assert_eq!(MESSAGE.len(), 44);

    let ciphertext = modes.cbc_encrypt(&key, &iv, MESSAGE).unwrap();
    assert_eq!(ciphertext.len(), 48);

    let decrypted = modes.cbc_decrypt(&key, &iv, &ciphertext).unwrap();
    assert_eq!(decrypted, MESSAGE);
}

#[test]
fn test_round_trips_over_ascon() {
    init_tracing();
    assert_round_trips(&ascon_modes(), b"sixteen byte key", &[0xA5; 16]);
}

#[test]
fn test_round_trips_over_gcm() {
    init_tracing();
    assert_round_trips(&gcm_modes(), &[0x42; 16], &[0u8; 16]);
}

#[test]
fn test_modes_produce_distinct_ciphertexts() {
    let modes = ascon_modes();
    let key = [1u8; 16];
    let iv = [2u8; 16];

    let cbc = modes.cbc_encrypt(&key, &iv, MESSAGE).unwrap();
    let ofb = modes.ofb_encrypt(&key, &iv, MESSAGE).unwrap();
    assert_ne!(cbc, ofb);

    let other_iv = modes.cbc_encrypt(&key, &[3u8; 16], MESSAGE).unwrap();
    assert_ne!(cbc, other_iv);
}

#[test]
fn test_wrong_key_does_not_recover_plaintext() {
    let modes = ascon_modes();
    let iv = [0u8; 16];
    let ciphertext = modes.ofb_encrypt(&[9u8; 16], &iv, MESSAGE).unwrap();

    match modes.ofb_decrypt(&[8u8; 16], &iv, &ciphertext) {
        Ok(plaintext) => assert_ne!(plaintext, MESSAGE),
        Err(e) => assert!(matches!(e, SealError::InvalidPadding)),
    }
}

#[test]
fn test_parameter_validation() {
    let modes = ascon_modes();

    assert!(matches!(
        modes.cbc_encrypt(&[0u8; 15], &[0u8; 16], MESSAGE),
        Err(SealError::InvalidKeyLength {
            expected: 16,
            actual: 15
        })
    ));
    assert!(matches!(
        modes.ofb_encrypt(&[0u8; 16], &[0u8; 8], MESSAGE),
        Err(SealError::InvalidIvLength {
            expected: 16,
            actual: 8
        })
    ));
    assert!(matches!(
        modes.cbc_decrypt(&[0u8; 16], &[0u8; 16], &[0u8; 20]),
        Err(SealError::InvalidCiphertextLength { .. })
    ));
    assert!(matches!(
        modes.ofb_decrypt(&[0u8; 16], &[0u8; 16], &[]),
        Err(SealError::InvalidPadding)
    ));
}

#[test]
fn test_padding_identity() {
    for len in 0..=48 {
        let data = vec![0x5Cu8; len];
        let padded = pad(&data, 16).unwrap();
        assert_eq!(padded.len() % 16, 0);
        assert!(padded.len() > data.len());
        assert_eq!(unpad(&padded).unwrap(), data);
    }
}

#[test]
fn test_unpad_rejections() {
    assert!(matches!(unpad(&[1, 2, 3, 0]), Err(SealError::InvalidPadding)));
    assert!(matches!(unpad(&[17u8; 32]), Err(SealError::InvalidPadding)));
    assert!(matches!(unpad(&[1, 2, 3, 3]), Err(SealError::InvalidPadding)));
}
