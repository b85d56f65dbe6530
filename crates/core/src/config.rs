//! Configuration management for Tailseal.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CoreError, CoreResult};

/// Length of a hex-encoded 16-byte key.
pub const KEY_HEX_LEN: usize = 32;

/// Author identifiers are written behind a 16-bit length prefix.
pub const MAX_AUTHOR_ID_LEN: usize = u16::MAX as usize;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub signer: SignerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignerConfig {
    /// Identity recorded in every signature block.
    pub author_id: String,
    /// Framing variant (magic tag, key encoding, tag layout).
    #[serde(default)]
    pub scheme: SchemeKind,
    /// Hash and AEAD primitives backing the codec.
    #[serde(default)]
    pub suite: PrimitiveSuite,
    /// Optional 32-character hex key. Never logged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_hex: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SchemeKind {
    #[default]
    Ascon,
    Gift,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PrimitiveSuite {
    /// Ascon-Hash digest with Ascon-128a AEAD
    #[default]
    Ascon,
    /// BLAKE3 digest with AES-128-GCM (16-byte nonce)
    Blake3AesGcm,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            signer: SignerConfig {
                author_id: "author@example.com".to_string(),
                scheme: SchemeKind::Ascon,
                suite: PrimitiveSuite::Ascon,
                key_hex: None,
            },
            logging: LoggingConfig::default(),
        }
    }

    /// Checks field constraints that serde cannot express.
    pub fn validate(&self) -> CoreResult<()> {
        let author_id = &self.signer.author_id;
        if author_id.is_empty() {
            return Err(CoreError::InvalidConfig {
                field: "signer.author_id".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if author_id.len() > MAX_AUTHOR_ID_LEN {
            return Err(CoreError::InvalidConfig {
                field: "signer.author_id".to_string(),
                reason: format!(
                    "{} bytes exceeds the {} byte limit",
                    author_id.len(),
                    MAX_AUTHOR_ID_LEN
                ),
            });
        }

        if let Some(key_hex) = &self.signer.key_hex {
            if key_hex.len() != KEY_HEX_LEN {
                return Err(CoreError::InvalidConfig {
                    field: "signer.key_hex".to_string(),
                    reason: format!(
                        "expected {} hex characters, got {}",
                        KEY_HEX_LEN,
                        key_hex.len()
                    ),
                });
            }
            if !key_hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(CoreError::InvalidConfig {
                    field: "signer.key_hex".to_string(),
                    reason: "contains non-hex characters".to_string(),
                });
            }
        }

        if self.logging.level.trim().is_empty() {
            return Err(CoreError::InvalidConfig {
                field: "logging.level".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        Ok(())
    }
}
