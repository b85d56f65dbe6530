//! Signature Codec - appended, author-attributed integrity blocks
//!
//! A signature block is appended to the end of a document and records who
//! signed it, when, and a digest of every byte that preceded the block. The
//! metadata and digest are sealed with an AEAD under the author's key, so a
//! verifier holding the same key can both authenticate the author and detect
//! any modification of the protected bytes.
//!
//! # Wire Format
//!
//! All integers are little-endian:
//!
//! ```text
//! MAGIC | length: u64 | nonce: 16 bytes | ciphertext: length bytes | [tag: 16 bytes]
//! ```
//!
//! The sealed plaintext is
//!
//! ```text
//! len16(timestamp) | timestamp | len16(author_id) | author_id | digest: 32 bytes
//! ```
//!
//! # Chaining
//!
//! Blocks are located by scanning for the rightmost MAGIC. Signing an already
//! signed document therefore covers the earlier blocks too, and verification
//! always authenticates the newest signer's view of the whole prior byte
//! stream. [`SignatureCodec::verify_history`] walks the chain backwards.
//!
//! # Known Limitation
//!
//! The scan does not parse forwards from the start of the file. If the magic
//! bytes occur inside a block's nonce or ciphertext, or an unsigned document
//! happens to contain them, the scan selects the wrong offset and
//! verification fails with a framing or decryption error instead of
//! `NoSignatureFound`.

use rand::RngCore;
use tracing::{debug, warn};

use tailseal_core::SchemeKind;

use crate::error::{SealError, SealResult};
use crate::key::SecretKey;
use crate::primitives::{
    AeadPrimitive, HashPrimitive, Nonce, DIGEST_SIZE, NONCE_SIZE, TAG_SIZE,
};

/// Magic tag of the embedded-tag scheme.
pub const ASCON_MAGIC: &[u8] = b"ASCON_SIG";

/// Magic tag of the detached-tag scheme.
pub const GIFT_MAGIC: &[u8] = b"GIFT_SIG";

/// Size of the ciphertext length field.
pub const LENGTH_FIELD_SIZE: usize = 8;

/// Size of each metadata length prefix.
const METADATA_PREFIX_SIZE: usize = 2;

/// Timestamp layout: ISO-8601 local time with microseconds, no offset.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// How key material for a scheme is written down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEncoding {
    /// 16 raw bytes
    Raw,
    /// 32 hex characters, either case
    Hex,
}

/// Where the AEAD authentication tag lives in the framed block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagLayout {
    /// Tag stays at the end of the ciphertext and is counted by the length field.
    Embedded,
    /// Tag is written after the ciphertext and excluded from the length field.
    Detached,
}

/// Framing variant of a signature block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemeProfile {
    pub magic: &'static [u8],
    pub key_encoding: KeyEncoding,
    pub tag_layout: TagLayout,
}

impl SchemeProfile {
    pub const ASCON: SchemeProfile = SchemeProfile {
        magic: ASCON_MAGIC,
        key_encoding: KeyEncoding::Raw,
        tag_layout: TagLayout::Embedded,
    };

    pub const GIFT: SchemeProfile = SchemeProfile {
        magic: GIFT_MAGIC,
        key_encoding: KeyEncoding::Hex,
        tag_layout: TagLayout::Detached,
    };

    /// Smallest input that can hold a block header (magic, length, nonce).
    pub fn min_signed_len(&self) -> usize {
        self.magic.len() + LENGTH_FIELD_SIZE + NONCE_SIZE
    }

    /// Decodes key material according to this profile's [`KeyEncoding`].
    pub fn parse_key(&self, material: &[u8]) -> SealResult<SecretKey> {
        match self.key_encoding {
            KeyEncoding::Raw => SecretKey::from_bytes(material),
            KeyEncoding::Hex => {
                let encoded =
                    std::str::from_utf8(material).map_err(|e| SealError::InvalidKeyEncoding {
                        reason: e.to_string(),
                    })?;
                SecretKey::from_hex(encoded)
            }
        }
    }

    fn magic_label(&self) -> std::borrow::Cow<'static, str> {
        String::from_utf8_lossy(self.magic)
    }
}

impl From<SchemeKind> for SchemeProfile {
    fn from(kind: SchemeKind) -> Self {
        match kind {
            SchemeKind::Ascon => SchemeProfile::ASCON,
            SchemeKind::Gift => SchemeProfile::GIFT,
        }
    }
}

/// Signer identity and signing time carried inside a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureMetadata {
    pub timestamp: String,
    pub author_id: String,
}

impl SignatureMetadata {
    /// Metadata stamped with the current local time.
    pub fn now(author_id: &str) -> Self {
        Self {
            timestamp: current_timestamp(),
            author_id: author_id.to_string(),
        }
    }

    /// `len16(timestamp) | timestamp | len16(author_id) | author_id`
    pub fn encode(&self) -> SealResult<Vec<u8>> {
        let mut out = Vec::with_capacity(
            2 * METADATA_PREFIX_SIZE + self.timestamp.len() + self.author_id.len() + DIGEST_SIZE,
        );
        write_prefixed(&mut out, "timestamp", self.timestamp.as_bytes())?;
        write_prefixed(&mut out, "author_id", self.author_id.as_bytes())?;
        Ok(out)
    }

    /// Parses the metadata prefix of `bytes`, returning the unread remainder.
    pub fn decode(bytes: &[u8]) -> SealResult<(Self, &[u8])> {
        let (timestamp, rest) = read_prefixed(bytes, "timestamp")?;
        let (author_id, rest) = read_prefixed(rest, "author_id")?;
        Ok((
            Self {
                timestamp,
                author_id,
            },
            rest,
        ))
    }
}

/// A sealed signature block, ready to append or as read back from a document.
///
/// Only the codec builds blocks, so `tag` is present exactly when the
/// profile's layout is [`TagLayout::Detached`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureBlock {
    profile: SchemeProfile,
    nonce: Nonce,
    ciphertext: Vec<u8>,
    tag: Option<[u8; TAG_SIZE]>,
}

impl SignatureBlock {
    pub fn profile(&self) -> SchemeProfile {
        self.profile
    }

    pub fn nonce(&self) -> &Nonce {
        &self.nonce
    }

    /// Ciphertext as framed; includes the tag for embedded layouts.
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Detached tag, `None` for embedded layouts.
    pub fn tag(&self) -> Option<&[u8; TAG_SIZE]> {
        self.tag.as_ref()
    }

    /// Serializes the block in wire format.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        out.extend_from_slice(self.profile.magic);
        out.extend_from_slice(&(self.ciphertext.len() as u64).to_le_bytes());
        out.extend_from_slice(&self.nonce);
        out.extend_from_slice(&self.ciphertext);
        if let Some(tag) = &self.tag {
            out.extend_from_slice(tag);
        }
        out
    }

    pub fn encoded_len(&self) -> usize {
        self.profile.min_signed_len()
            + self.ciphertext.len()
            + self.tag.map(|t| t.len()).unwrap_or(0)
    }

    /// Ciphertext with the tag re-attached, as the AEAD expects it.
    fn sealed_bytes(&self) -> Vec<u8> {
        let mut sealed = self.ciphertext.clone();
        if let Some(tag) = &self.tag {
            sealed.extend_from_slice(tag);
        }
        sealed
    }
}

/// A block found in a signed byte stream.
#[derive(Debug, Clone)]
pub struct LocatedSignature<'a> {
    /// Offset of the block's magic tag.
    pub offset: usize,
    pub block: SignatureBlock,
    /// Protected bytes: everything before `offset`.
    pub content: &'a [u8],
}

/// Outcome of a successful verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedSignature {
    pub author_id: String,
    pub timestamp: String,
    /// Offset of the verified block within the input.
    pub offset: usize,
}

/// Creates and verifies signature blocks for one [`SchemeProfile`].
///
/// The codec holds no mutable state; one instance can sign and verify any
/// number of documents.
#[derive(Debug, Clone)]
pub struct SignatureCodec<H, A> {
    profile: SchemeProfile,
    hash: H,
    aead: A,
}

impl<H: HashPrimitive, A: AeadPrimitive> SignatureCodec<H, A> {
    pub fn new(profile: SchemeProfile, hash: H, aead: A) -> Self {
        Self {
            profile,
            hash,
            aead,
        }
    }

    pub fn profile(&self) -> SchemeProfile {
        self.profile
    }

    /// Seals a signature over `document` with a fresh random nonce and the
    /// current time.
    ///
    /// # Returns
    /// * `Ok(SignatureBlock)` - The block to append to the document
    /// * `Err(SealError)` - If the metadata cannot be encoded or sealing fails
    pub fn create_signature(
        &self,
        document: &[u8],
        key: &SecretKey,
        author_id: &str,
    ) -> SealResult<SignatureBlock> {
        let mut nonce = [0u8; NONCE_SIZE];
        rand::thread_rng().fill_bytes(&mut nonce);
        self.create_signature_with(document, key, &SignatureMetadata::now(author_id), nonce)
    }

    /// Deterministic core of [`SignatureCodec::create_signature`].
    ///
    /// The nonce must never be reused with the same key.
    pub fn create_signature_with(
        &self,
        document: &[u8],
        key: &SecretKey,
        metadata: &SignatureMetadata,
        nonce: Nonce,
    ) -> SealResult<SignatureBlock> {
        let digest = self.hash.hash(document);

        let mut signature_data = metadata.encode()?;
        signature_data.extend_from_slice(&digest);

        let mut ciphertext = self
            .aead
            .encrypt(key, &nonce, &[], &signature_data)
            .map_err(SealError::encryption)?;

        let tag = match self.profile.tag_layout {
            TagLayout::Embedded => None,
            TagLayout::Detached => {
                if ciphertext.len() < TAG_SIZE {
                    return Err(SealError::EncryptionFailed {
                        reason: format!(
                            "AEAD output of {} bytes has no room for a {} byte tag",
                            ciphertext.len(),
                            TAG_SIZE
                        ),
                    });
                }
                let split = ciphertext.len() - TAG_SIZE;
                let mut tag = [0u8; TAG_SIZE];
                tag.copy_from_slice(&ciphertext[split..]);
                ciphertext.truncate(split);
                Some(tag)
            }
        };

        debug!(
            magic = %self.profile.magic_label(),
            document_len = document.len(),
            ciphertext_len = ciphertext.len(),
            "Created signature block"
        );

        Ok(SignatureBlock {
            profile: self.profile,
            nonce,
            ciphertext,
            tag,
        })
    }

    /// Finds and frames the most recently appended block in `signed`.
    pub fn locate_signature<'a>(&self, signed: &'a [u8]) -> SealResult<LocatedSignature<'a>> {
        let minimum = self.profile.min_signed_len();
        if signed.len() < minimum {
            return Err(SealError::TooSmall {
                actual: signed.len(),
                minimum,
            });
        }

        let magic = self.profile.magic;
        let offset = signed
            .windows(magic.len())
            .rposition(|window| window == magic)
            .ok_or(SealError::NoSignatureFound)?;

        let mut cursor = offset + magic.len();

        let length_bytes = take(signed, cursor, LENGTH_FIELD_SIZE, "length field")?;
        let mut length_buf = [0u8; LENGTH_FIELD_SIZE];
        length_buf.copy_from_slice(length_bytes);
        let length = usize::try_from(u64::from_le_bytes(length_buf))
            .map_err(|_| SealError::malformed("ciphertext length does not fit in memory"))?;
        cursor += LENGTH_FIELD_SIZE;

        let mut nonce = [0u8; NONCE_SIZE];
        nonce.copy_from_slice(take(signed, cursor, NONCE_SIZE, "nonce")?);
        cursor += NONCE_SIZE;

        let ciphertext = take(signed, cursor, length, "ciphertext")?.to_vec();
        cursor += length;

        let tag = match self.profile.tag_layout {
            TagLayout::Embedded => None,
            TagLayout::Detached => {
                let mut tag = [0u8; TAG_SIZE];
                tag.copy_from_slice(take(signed, cursor, TAG_SIZE, "tag")?);
                cursor += TAG_SIZE;
                Some(tag)
            }
        };

        if cursor < signed.len() {
            debug!(
                trailing = signed.len() - cursor,
                "Ignoring bytes after signature block"
            );
        }

        Ok(LocatedSignature {
            offset,
            block: SignatureBlock {
                profile: self.profile,
                nonce,
                ciphertext,
                tag,
            },
            content: &signed[..offset],
        })
    }

    /// Verifies the most recently appended signature in `signed`.
    ///
    /// # Returns
    /// * `Ok(VerifiedSignature)` - Author and timestamp of the newest block
    /// * `Err(SealError)` - `TooSmall`, `NoSignatureFound`, `MalformedSignature`,
    ///   `DecryptionFailed` or `ContentModified`
    pub fn verify_signature(
        &self,
        signed: &[u8],
        key: &SecretKey,
    ) -> SealResult<VerifiedSignature> {
        let located = self.locate_signature(signed)?;

        let signature_data = self
            .aead
            .decrypt(key, &located.block.nonce, &[], &located.block.sealed_bytes())
            .map_err(|e| {
                warn!(offset = located.offset, error = %e, "Signature decryption failed");
                SealError::DecryptionFailed
            })?;

        let (metadata, rest) = SignatureMetadata::decode(&signature_data)?;
        let stored_digest = rest.get(..DIGEST_SIZE).ok_or_else(|| {
            SealError::malformed(format!(
                "digest truncated: {} bytes remain, {} expected",
                rest.len(),
                DIGEST_SIZE
            ))
        })?;

        let current_digest = self.hash.hash(located.content);
        if current_digest[..] != stored_digest[..] {
            warn!(
                offset = located.offset,
                author_id = %metadata.author_id,
                "Document content has been modified"
            );
            return Err(SealError::ContentModified);
        }

        debug!(
            offset = located.offset,
            author_id = %metadata.author_id,
            "Verified signature"
        );

        Ok(VerifiedSignature {
            author_id: metadata.author_id,
            timestamp: metadata.timestamp,
            offset: located.offset,
        })
    }

    /// Verifies every signature in `signed`, newest first.
    ///
    /// After verifying the newest block, the bytes before its magic tag are
    /// exactly the document as it stood when that block was appended, so the
    /// same check is repeated on that prefix until no block remains. Every
    /// block must verify under `key`.
    pub fn verify_history(
        &self,
        signed: &[u8],
        key: &SecretKey,
    ) -> SealResult<Vec<VerifiedSignature>> {
        let mut history = Vec::new();
        let mut end = signed.len();

        loop {
            match self.verify_signature(&signed[..end], key) {
                Ok(verified) => {
                    end = verified.offset;
                    history.push(verified);
                }
                Err(SealError::NoSignatureFound | SealError::TooSmall { .. })
                    if !history.is_empty() =>
                {
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        debug!(signatures = history.len(), "Verified signature history");
        Ok(history)
    }
}

/// Current local time in [`TIMESTAMP_FORMAT`].
pub fn current_timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Bounds-checked `len` bytes at `start`.
fn take<'a>(bytes: &'a [u8], start: usize, len: usize, what: &str) -> SealResult<&'a [u8]> {
    start
        .checked_add(len)
        .and_then(|end| bytes.get(start..end))
        .ok_or_else(|| {
            SealError::malformed(format!(
                "{} of {} bytes at offset {} runs past end of input ({} bytes)",
                what,
                len,
                start,
                bytes.len()
            ))
        })
}

fn write_prefixed(out: &mut Vec<u8>, field: &str, value: &[u8]) -> SealResult<()> {
    let len = u16::try_from(value.len()).map_err(|_| {
        SealError::malformed(format!(
            "{} is {} bytes, limit is {}",
            field,
            value.len(),
            u16::MAX
        ))
    })?;
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(value);
    Ok(())
}

fn read_prefixed<'a>(bytes: &'a [u8], field: &str) -> SealResult<(String, &'a [u8])> {
    let prefix = take(bytes, 0, METADATA_PREFIX_SIZE, field)?;
    let len = u16::from_le_bytes([prefix[0], prefix[1]]) as usize;
    let value = take(bytes, METADATA_PREFIX_SIZE, len, field)?;
    let text = std::str::from_utf8(value)
        .map_err(|e| SealError::malformed(format!("{} is not valid UTF-8: {}", field, e)))?;
    Ok((text.to_string(), &bytes[METADATA_PREFIX_SIZE + len..]))
}
