//! Authenticated channel - one key, one epoch, framed tokens
//!
//! Tokens are laid out as `[epoch:4][nonce:12][ciphertext][tag:16]`. A
//! channel only opens tokens whose prefix matches its own epoch encoding.

use std::fmt;

use tracing::debug;

use sealring_core::{
    frame, ChannelConfig, Epoch, SealError, SealResult, EPOCH_SIZE, NONCE_SIZE,
    TAG_SIZE,
};

use crate::{AeadCipher, NonceSource, SealingCipher};

/// Encrypts and decrypts short messages for a single key generation
pub struct AuthenticatedChannel<C: SealingCipher = AeadCipher> {
    cipher: C,
    /// Encoded epoch, written in front of every token
    prefix: [u8; EPOCH_SIZE],
    nonces: NonceSource,
}

impl AuthenticatedChannel {
    /// Create a channel whose nonces come from an OS-seeded generator
    pub fn new(key: &[u8], epoch: u32) -> SealResult<Self> {
        Self::with_config(key, ChannelConfig::new(epoch))
    }

    /// Create a channel with a reproducible nonce sequence.
    ///
    /// Channels sharing a key must use distinct seeds, and the seed must not
    /// come from untrusted input; a repeated seed repeats nonces under the key.
    pub fn with_seed(key: &[u8], epoch: u32, seed: u64) -> SealResult<Self> {
        Self::with_config(key, ChannelConfig::new(epoch).with_seed(seed))
    }
}

impl<C: SealingCipher> AuthenticatedChannel<C> {
    /// Create a channel from a key and configuration
    pub fn with_config(key: &[u8], config: ChannelConfig) -> SealResult<Self> {
        let cipher = C::from_key(key)?;

        debug!(
            epoch = %config.epoch,
            nonce_seed = config.nonce_seed.mode(),
            "authenticated channel created"
        );

        Ok(AuthenticatedChannel {
            cipher,
            prefix: config.epoch.to_bytes(),
            nonces: NonceSource::new(config.nonce_seed),
        })
    }

    /// Bytes a token carries beyond its plaintext
    #[inline]
    pub fn overhead(&self) -> usize {
        TAG_SIZE + EPOCH_SIZE + NONCE_SIZE
    }

    #[inline]
    pub fn epoch(&self) -> Epoch {
        Epoch::from_bytes(self.prefix)
    }

    /// True when nonces follow a fixed seed
    pub fn is_deterministic(&self) -> bool {
        self.nonces.is_deterministic()
    }

    /// Encrypt `src` and append the token to `dst`
    pub fn encrypt(&self, dst: &mut Vec<u8>, src: &[u8]) {
        let nonce = self.nonces.next_nonce();

        dst.reserve(src.len() + self.overhead());
        dst.extend_from_slice(&self.prefix);
        dst.extend_from_slice(&nonce);

        let body = dst.len();
        dst.extend_from_slice(src);
        let tag = self
            .cipher
            .seal_in_place_detached(&nonce, &[], &mut dst[body..]);
        dst.extend_from_slice(&tag);
    }

    /// Encrypt `src` into a fresh token
    pub fn seal(&self, src: &[u8]) -> Vec<u8> {
        let mut token = Vec::with_capacity(src.len() + self.overhead());
        self.encrypt(&mut token, src);
        token
    }

    /// Authenticate `src` and append its plaintext to `dst`.
    ///
    /// On error `dst` is left exactly as it was.
    pub fn decrypt(&self, dst: &mut Vec<u8>, src: &[u8]) -> SealResult<()> {
        if src.len() < self.overhead() {
            return Err(SealError::BadToken);
        }
        let parts = frame::split(src).ok_or(SealError::BadToken)?;

        if parts.prefix != &self.prefix {
            return Err(SealError::UnknownEpoch(parts.epoch()));
        }

        let start = dst.len();
        dst.extend_from_slice(parts.ciphertext);

        if let Err(err) =
            self.cipher
                .open_in_place_detached(parts.nonce, &[], &mut dst[start..], parts.tag)
        {
            dst.truncate(start);
            return Err(err);
        }

        Ok(())
    }

    /// Authenticate `src` and return its plaintext
    pub fn open(&self, src: &[u8]) -> SealResult<Vec<u8>> {
        let mut plaintext = Vec::with_capacity(src.len().saturating_sub(self.overhead()));
        self.decrypt(&mut plaintext, src)?;
        Ok(plaintext)
    }
}

impl<C: SealingCipher> fmt::Debug for AuthenticatedChannel<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticatedChannel")
            .field("epoch", &self.epoch())
            .field("nonce_seed", &self.nonces.mode())
            .finish_non_exhaustive()
    }
}
