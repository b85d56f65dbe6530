//! Length padding for block alignment.
//!
//! Every padded buffer ends in `n` bytes of value `n` with `1 <= n <= 16`, so
//! padding is always present and always removable.

use crate::error::{SealError, SealResult};

/// Largest padding run `unpad` accepts.
pub const MAX_PADDING: usize = 16;

/// Pads `data` up to the next multiple of `block_size`.
///
/// A buffer that is already aligned receives a full block of padding.
pub fn pad(data: &[u8], block_size: usize) -> SealResult<Vec<u8>> {
    if block_size == 0 || block_size > MAX_PADDING {
        return Err(SealError::InvalidBlockSize {
            block_size,
            max: MAX_PADDING,
        });
    }

    let padding_len = block_size - (data.len() % block_size);
    let mut padded = Vec::with_capacity(data.len() + padding_len);
    padded.extend_from_slice(data);
    padded.resize(data.len() + padding_len, padding_len as u8);
    Ok(padded)
}

/// Strips padding added by [`pad`], rejecting any malformed trailer.
pub fn unpad(padded: &[u8]) -> SealResult<Vec<u8>> {
    let padding_len = *padded.last().ok_or(SealError::InvalidPadding)? as usize;
    if padding_len == 0 || padding_len > MAX_PADDING || padding_len > padded.len() {
        return Err(SealError::InvalidPadding);
    }

    let (content, trailer) = padded.split_at(padded.len() - padding_len);
    if !trailer.iter().all(|&b| b as usize == padding_len) {
        return Err(SealError::InvalidPadding);
    }

    Ok(content.to_vec())
}
