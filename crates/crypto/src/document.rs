//! Document storage for signing and verification.
//!
//! Signing reads the whole document, then appends the framed block with a
//! single write. Existing bytes are never rewritten.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{SealError, SealResult};
use crate::key::SecretKey;
use crate::primitives::{AeadPrimitive, HashPrimitive};
use crate::signature::{SignatureBlock, SignatureCodec, VerifiedSignature};

/// Byte store that can be read whole and extended at the end.
pub trait DocumentStore {
    /// Returns every byte currently in the document.
    fn read_all(&self) -> SealResult<Vec<u8>>;

    /// Appends `bytes` after the current end of the document.
    fn append(&mut self, bytes: &[u8]) -> SealResult<()>;
}

/// A document on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileDocument {
    path: PathBuf,
}

impl FileDocument {
    /// Opens an existing file.
    ///
    /// # Errors
    /// `FileNotFound` if nothing exists at `path`.
    pub fn open(path: impl AsRef<Path>) -> SealResult<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(SealError::FileNotFound { path });
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn map_io(&self, err: io::Error) -> SealError {
        if err.kind() == io::ErrorKind::NotFound {
            SealError::FileNotFound {
                path: self.path.clone(),
            }
        } else {
            SealError::Io(err)
        }
    }
}

impl DocumentStore for FileDocument {
    fn read_all(&self) -> SealResult<Vec<u8>> {
        fs::read(&self.path).map_err(|e| self.map_io(e))
    }

    fn append(&mut self, bytes: &[u8]) -> SealResult<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| self.map_io(e))?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(())
    }
}

/// A document held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryDocument {
    bytes: Vec<u8>,
}

impl MemoryDocument {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.bytes
    }
}

impl DocumentStore for MemoryDocument {
    fn read_all(&self) -> SealResult<Vec<u8>> {
        Ok(self.bytes.clone())
    }

    fn append(&mut self, bytes: &[u8]) -> SealResult<()> {
        self.bytes.extend_from_slice(bytes);
        Ok(())
    }
}

impl<H: HashPrimitive, A: AeadPrimitive> SignatureCodec<H, A> {
    /// Signs the current contents of `store` and appends the block.
    pub fn sign_document<D: DocumentStore + ?Sized>(
        &self,
        store: &mut D,
        key: &SecretKey,
        author_id: &str,
    ) -> SealResult<SignatureBlock> {
        let document = store.read_all()?;
        let block = self.create_signature(&document, key, author_id)?;
        store.append(&block.to_bytes())?;

        debug!(
            document_len = document.len(),
            block_len = block.encoded_len(),
            "Appended signature block"
        );
        Ok(block)
    }

    /// Verifies the newest signature in `store`.
    pub fn verify_document<D: DocumentStore + ?Sized>(
        &self,
        store: &D,
        key: &SecretKey,
    ) -> SealResult<VerifiedSignature> {
        let signed = store.read_all()?;
        self.verify_signature(&signed, key)
    }

    /// Signs the file at `path` in place.
    pub fn sign_file(
        &self,
        path: impl AsRef<Path>,
        key: &SecretKey,
        author_id: &str,
    ) -> SealResult<SignatureBlock> {
        let mut document = FileDocument::open(path)?;
        let block = self.sign_document(&mut document, key, author_id)?;
        info!(path = %document.path().display(), author_id, "Signed file");
        Ok(block)
    }

    /// Verifies the newest signature in the file at `path`.
    pub fn verify_file(
        &self,
        path: impl AsRef<Path>,
        key: &SecretKey,
    ) -> SealResult<VerifiedSignature> {
        let document = FileDocument::open(path)?;
        let verified = self.verify_document(&document, key)?;
        info!(
            path = %document.path().display(),
            author_id = %verified.author_id,
            "Verified file"
        );
        Ok(verified)
    }
}
