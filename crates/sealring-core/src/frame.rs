//! Token framing
//!
//! Every sealed token has the layout
//!
//! ```text
//! offset  field        size
//! 0       epoch        4   (little-endian u32)
//! 4       nonce        12
//! 16      ciphertext   len(plaintext)
//! ..      tag          16
//! ```

use crate::Epoch;

/// Size of the epoch prefix
pub const EPOCH_SIZE: usize = 4;

/// Nonce size of the 96-bit-nonce AEAD construction
pub const NONCE_SIZE: usize = 12;

/// Authentication tag size
pub const TAG_SIZE: usize = 16;

/// Offset of the nonce within a token
pub const NONCE_OFFSET: usize = EPOCH_SIZE;

/// Offset of the sealed body within a token
pub const MESSAGE_OFFSET: usize = NONCE_OFFSET + NONCE_SIZE;

/// Fixed number of bytes a token carries beyond its plaintext
pub const OVERHEAD: usize = MESSAGE_OFFSET + TAG_SIZE;

/// Borrowed view of a token split into its fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameParts<'a> {
    pub prefix: &'a [u8; EPOCH_SIZE],
    pub nonce: &'a [u8; NONCE_SIZE],
    pub ciphertext: &'a [u8],
    pub tag: &'a [u8; TAG_SIZE],
}

impl FrameParts<'_> {
    #[inline]
    pub fn epoch(&self) -> Epoch {
        Epoch::from_bytes(*self.prefix)
    }
}

/// Read the epoch prefix without validating the rest of the token
pub fn peek_epoch(token: &[u8]) -> Option<Epoch> {
    let prefix: [u8; EPOCH_SIZE] = token.get(..EPOCH_SIZE)?.try_into().ok()?;
    Some(Epoch::from_bytes(prefix))
}

/// Split a token into its fields. Returns `None` when shorter than `OVERHEAD`.
pub fn split(token: &[u8]) -> Option<FrameParts<'_>> {
    if token.len() < OVERHEAD {
        return None;
    }

    let (prefix, rest) = token.split_at(EPOCH_SIZE);
    let (nonce, sealed) = rest.split_at(NONCE_SIZE);
    let (ciphertext, tag) = sealed.split_at(sealed.len() - TAG_SIZE);

    Some(FrameParts {
        prefix: prefix.try_into().ok()?,
        nonce: nonce.try_into().ok()?,
        ciphertext,
        tag: tag.try_into().ok()?,
    })
}

/// Token length for a plaintext of `plaintext_len` bytes
#[inline]
pub fn sealed_len(plaintext_len: usize) -> usize {
    plaintext_len + OVERHEAD
}
