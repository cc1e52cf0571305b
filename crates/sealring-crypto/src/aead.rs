//! AEAD capability consumed by channels, and its ChaCha20-Poly1305 implementation

use std::fmt;

use chacha20poly1305::{
    aead::{AeadInPlace, KeyInit},
    ChaCha20Poly1305, Nonce, Tag,
};

use sealring_core::{SealError, SealResult, NONCE_SIZE, TAG_SIZE};

/// Key size for ChaCha20-Poly1305
pub const KEY_SIZE: usize = 32;

/// Narrow seal/open capability over a 96-bit-nonce, 128-bit-tag AEAD
///
/// Implementations must verify the tag before releasing any plaintext and
/// compare it in constant time.
pub trait SealingCipher: Send + Sync + Sized {
    /// Required key length in bytes
    const KEY_SIZE: usize;

    /// Build the cipher, rejecting keys of the wrong length
    fn from_key(key: &[u8]) -> SealResult<Self>;

    /// Encrypt `buffer` in place and return the authentication tag
    fn seal_in_place_detached(
        &self,
        nonce: &[u8; NONCE_SIZE],
        aad: &[u8],
        buffer: &mut [u8],
    ) -> [u8; TAG_SIZE];

    /// Verify `tag` and decrypt `buffer` in place
    fn open_in_place_detached(
        &self,
        nonce: &[u8; NONCE_SIZE],
        aad: &[u8],
        buffer: &mut [u8],
        tag: &[u8; TAG_SIZE],
    ) -> SealResult<()>;
}

/// AEAD cipher wrapper
pub struct AeadCipher {
    cipher: ChaCha20Poly1305,
}

impl SealingCipher for AeadCipher {
    const KEY_SIZE: usize = KEY_SIZE;

    fn from_key(key: &[u8]) -> SealResult<Self> {
        let cipher =
            ChaCha20Poly1305::new_from_slice(key).map_err(|_| SealError::BadKeyLength {
                expected: KEY_SIZE,
                actual: key.len(),
            })?;
        Ok(AeadCipher { cipher })
    }

    fn seal_in_place_detached(
        &self,
        nonce: &[u8; NONCE_SIZE],
        aad: &[u8],
        buffer: &mut [u8],
    ) -> [u8; TAG_SIZE] {
        let Ok(tag) = self
            .cipher
            .encrypt_in_place_detached(Nonce::from_slice(nonce), aad, buffer)
        else {
            unreachable!("ChaCha20-Poly1305 encryption cannot fail below the 256 GiB message limit");
        };

        let mut out = [0u8; TAG_SIZE];
        out.copy_from_slice(&tag);
        out
    }

    fn open_in_place_detached(
        &self,
        nonce: &[u8; NONCE_SIZE],
        aad: &[u8],
        buffer: &mut [u8],
        tag: &[u8; TAG_SIZE],
    ) -> SealResult<()> {
        self.cipher
            .decrypt_in_place_detached(Nonce::from_slice(nonce), aad, buffer, Tag::from_slice(tag))
            .map_err(|_| SealError::AuthenticationFailed)
    }
}

impl fmt::Debug for AeadCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AeadCipher")
            .field("algorithm", &"ChaCha20-Poly1305")
            .finish_non_exhaustive()
    }
}
