//! Epoch ring - key rotation across channels
//!
//! A ring encrypts with one primary channel and decrypts with whichever
//! registered channel matches the epoch prefix of the incoming token. The
//! registry is internally locked, so a shared ring can take new
//! registrations while other threads decrypt.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use sealring_core::{frame, Epoch, SealError, SealResult};

use crate::{AeadCipher, AuthenticatedChannel, SealingCipher};

/// Registry of channels indexed by epoch
pub struct EpochRing<C: SealingCipher = AeadCipher> {
    /// Channel used for every encryption
    primary: Arc<AuthenticatedChannel<C>>,
    /// Channels used for decryption, keyed by their own epoch
    registry: RwLock<HashMap<Epoch, Arc<AuthenticatedChannel<C>>>>,
}

impl<C: SealingCipher> EpochRing<C> {
    /// Create a ring whose registry holds only the primary
    pub fn new(primary: Arc<AuthenticatedChannel<C>>) -> Self {
        let epoch = primary.epoch();
        let mut registry = HashMap::new();
        registry.insert(epoch, Arc::clone(&primary));

        debug!(primary = %epoch, "epoch ring created");

        EpochRing {
            primary,
            registry: RwLock::new(registry),
        }
    }

    /// Create a ring and register `channels` in order after the primary
    pub fn with_channels<I>(primary: Arc<AuthenticatedChannel<C>>, channels: I) -> Self
    where
        I: IntoIterator<Item = Arc<AuthenticatedChannel<C>>>,
    {
        let ring = Self::new(primary);
        for channel in channels {
            ring.register(channel);
        }
        ring
    }

    /// Register a channel for decryption under its own epoch.
    ///
    /// Last registration wins: a channel whose epoch is already present
    /// replaces the existing entry, the primary's included. Encryption keeps
    /// using the primary regardless.
    pub fn register(&self, channel: Arc<AuthenticatedChannel<C>>) {
        let epoch = channel.epoch();
        let replaced = self.registry.write().insert(epoch, channel);

        if replaced.is_some() {
            warn!(%epoch, primary = %self.primary.epoch(), "registration replaced existing channel");
        } else {
            debug!(%epoch, "channel registered");
        }
    }

    /// Encrypt with the primary channel
    pub fn encrypt(&self, dst: &mut Vec<u8>, src: &[u8]) {
        self.primary.encrypt(dst, src)
    }

    pub fn seal(&self, src: &[u8]) -> Vec<u8> {
        self.primary.seal(src)
    }

    /// Route `src` to the channel registered for its epoch and decrypt it.
    ///
    /// Tokens without a readable prefix, or whose epoch is not registered,
    /// fail with `BadToken`. Channel errors are returned as they are.
    pub fn decrypt(&self, dst: &mut Vec<u8>, src: &[u8]) -> SealResult<()> {
        let epoch = frame::peek_epoch(src).ok_or(SealError::BadToken)?;
        let channel = self.lookup(epoch).ok_or(SealError::BadToken)?;
        channel.decrypt(dst, src)
    }

    pub fn open(&self, src: &[u8]) -> SealResult<Vec<u8>> {
        let mut plaintext = Vec::new();
        self.decrypt(&mut plaintext, src)?;
        Ok(plaintext)
    }

    /// Channel currently routed for `epoch`
    pub fn lookup(&self, epoch: Epoch) -> Option<Arc<AuthenticatedChannel<C>>> {
        self.registry.read().get(&epoch).cloned()
    }

    pub fn primary(&self) -> &Arc<AuthenticatedChannel<C>> {
        &self.primary
    }

    pub fn contains(&self, epoch: Epoch) -> bool {
        self.registry.read().contains_key(&epoch)
    }

    /// Registered epochs in ascending order
    pub fn epochs(&self) -> Vec<Epoch> {
        let mut epochs: Vec<Epoch> = self.registry.read().keys().copied().collect();
        epochs.sort_unstable();
        epochs
    }

    pub fn len(&self) -> usize {
        self.registry.read().len()
    }

    /// Always false: the primary's slot exists from construction and is never removed
    pub fn is_empty(&self) -> bool {
        self.registry.read().is_empty()
    }

    #[inline]
    pub fn overhead(&self) -> usize {
        self.primary.overhead()
    }
}

impl<C: SealingCipher> fmt::Debug for EpochRing<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EpochRing")
            .field("primary", &self.primary.epoch())
            .field("epochs", &self.epochs())
            .finish()
    }
}
