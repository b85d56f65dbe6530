//! Configuration-Driven Signing Tests
//!
//! Loads a TOML configuration, initialises logging from it and signs a file
//! with the codec and key it selects.

use std::io::Write;

use tailseal_core::{logging, Config, LogFormat, PrimitiveSuite, SchemeKind};
use tailseal_crypto::{codec_from_config, key_from_config, SchemeProfile, SealError};

use crate::test_utils::{read_bytes, temp_document};

const GIFT_CONFIG: &str = r#"
[signer]
author_id = "config.author@organization.com"
scheme = "gift"
suite = "blake3-aes-gcm"
key_hex = "00112233445566778899AABBCCDDEEFF"

[logging]
level = "debug"
format = "text"
"#;

#[test]
fn test_sign_with_loaded_config() {
    let mut config_file = tempfile::NamedTempFile::new().unwrap();
    config_file.write_all(GIFT_CONFIG.as_bytes()).unwrap();

    let config = Config::from_file(config_file.path()).expect("config should load");
    assert_eq!(config.signer.scheme, SchemeKind::Gift);
    assert_eq!(config.signer.suite, PrimitiveSuite::Blake3AesGcm);
    assert_eq!(config.logging.format, LogFormat::Text);

    // Another test may already own the global subscriber
    let _ = logging::init_from_config(&config.logging);

    let codec = codec_from_config(&config.signer);
    assert_eq!(codec.profile(), SchemeProfile::GIFT);
    let key = key_from_config(&config.signer)
        .unwrap()
        .expect("key configured");

    let file = temp_document(b"configured document");
    codec
        .sign_file(file.path(), &key, &config.signer.author_id)
        .unwrap();

    let signed = read_bytes(file.path());
    assert!(signed[b"configured document".len()..].starts_with(b"GIFT_SIG"));

    let verified = codec.verify_file(file.path(), &key).unwrap();
    assert_eq!(verified.author_id, "config.author@organization.com");
}

#[test]
fn test_default_config_signs_with_ascon() {
    let config = Config::default_config();
    config.validate().unwrap();

    let codec = codec_from_config(&config.signer);
    assert_eq!(codec.profile(), SchemeProfile::ASCON);
    assert!(key_from_config(&config.signer).unwrap().is_none());
}

#[test]
fn test_bad_key_in_config_is_rejected() {
    let toml = GIFT_CONFIG.replace("00112233445566778899AABBCCDDEEFF", "not-hex");
    assert!(Config::from_toml_str(&toml).is_err());

    let mut config = Config::default_config();
    config.signer.key_hex = Some("0".repeat(31) + "Z");
    assert!(matches!(
        key_from_config(&config.signer),
        Err(SealError::InvalidKeyEncoding { .. })
    ));
}

#[test]
fn test_schemes_do_not_cross_verify() {
    let mut config = Config::default_config();
    config.signer.key_hex = Some("000102030405060708090A0B0C0D0E0F".to_string());
    let key = key_from_config(&config.signer).unwrap().unwrap();

    let ascon = codec_from_config(&config.signer);
    config.signer.scheme = SchemeKind::Gift;
    let gift = codec_from_config(&config.signer);

    let file = temp_document(b"cross-scheme document");
    ascon.sign_file(file.path(), &key, "ascon.author").unwrap();

    assert!(matches!(
        gift.verify_file(file.path(), &key),
        Err(SealError::NoSignatureFound)
    ));
    assert!(ascon.verify_file(file.path(), &key).is_ok());
}
