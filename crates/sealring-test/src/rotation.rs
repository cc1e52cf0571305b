//! Key rotation harness
//!
//! Builds a chain of channels for consecutive epochs, keeps the newest as
//! the ring's primary and every older one registered for decryption.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use thiserror::Error;
use tracing::debug;

use sealring_core::{ChannelConfig, Epoch, SealError};
use sealring_crypto::{AuthenticatedChannel, EpochRing, KEY_SIZE};

/// Harness errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum HarnessError {
    #[error(transparent)]
    Seal(#[from] SealError),

    #[error("rotation requires at least one generation")]
    NoGenerations,

    #[error("no epoch after {0}")]
    EpochOverflow(Epoch),
}

pub type HarnessResult<T> = Result<T, HarnessError>;

/// Rotation harness configuration
#[derive(Clone, Debug)]
pub struct RotationConfig {
    /// Epoch of the oldest generation
    pub first_epoch: u32,
    /// Number of generations created up front
    pub generations: usize,
    /// Keep at most this many generations registered; `None` keeps all
    pub retain: Option<usize>,
    /// Seed for keys and message generation
    pub seed: u64,
}

impl Default for RotationConfig {
    fn default() -> Self {
        RotationConfig {
            first_epoch: 1,
            generations: 3,
            retain: None,
            seed: 42,
        }
    }
}

/// Deterministic test key for `epoch` under `seed`
pub fn test_key(seed: u64, epoch: Epoch) -> [u8; KEY_SIZE] {
    let mut rng = StdRng::seed_from_u64(seed ^ (u64::from(epoch.value()) << 32));
    let mut key = [0u8; KEY_SIZE];
    rng.fill_bytes(&mut key);
    key
}

/// Outcome of replaying tokens against the current ring
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RotationReport {
    pub opened: Vec<Epoch>,
    /// Opened, but to a different plaintext
    pub mismatched: Vec<Epoch>,
    pub rejected: Vec<(Epoch, SealError)>,
}

impl RotationReport {
    pub fn all_opened(&self) -> bool {
        self.rejected.is_empty() && self.mismatched.is_empty()
    }
}

/// Key rotation harness
pub struct RotationHarness {
    config: RotationConfig,
    /// Generations in ascending epoch order; the last one is primary
    channels: Vec<Arc<AuthenticatedChannel>>,
    ring: Arc<EpochRing>,
    rng: StdRng,
}

impl RotationHarness {
    pub fn new(config: RotationConfig) -> HarnessResult<Self> {
        if config.generations == 0 {
            return Err(HarnessError::NoGenerations);
        }

        let mut channels = Vec::with_capacity(config.generations);
        for offset in 0..config.generations {
            let epoch = u32::try_from(offset)
                .ok()
                .and_then(|offset| config.first_epoch.checked_add(offset))
                .ok_or(HarnessError::EpochOverflow(Epoch(config.first_epoch)))?;
            channels.push(Self::make_channel(&config, Epoch(epoch))?);
        }

        let ring = Arc::new(Self::build_ring(&config, &channels)?);
        let rng = StdRng::seed_from_u64(config.seed);

        Ok(RotationHarness {
            config,
            channels,
            ring,
            rng,
        })
    }

    fn make_channel(
        config: &RotationConfig,
        epoch: Epoch,
    ) -> HarnessResult<Arc<AuthenticatedChannel>> {
        let key = test_key(config.seed, epoch);
        let seed = config.seed.wrapping_add(u64::from(epoch.value()));
        let config = ChannelConfig::new(epoch).with_seed(seed);
        let channel = AuthenticatedChannel::with_config(&key, config)?;
        Ok(Arc::new(channel))
    }

    fn build_ring(
        config: &RotationConfig,
        channels: &[Arc<AuthenticatedChannel>],
    ) -> HarnessResult<EpochRing> {
        let (primary, older) = channels
            .split_last()
            .ok_or(HarnessError::NoGenerations)?;
        let keep = config.retain.unwrap_or(usize::MAX).saturating_sub(1);
        let skip = older.len().saturating_sub(keep);

        Ok(EpochRing::with_channels(
            Arc::clone(primary),
            older[skip..].iter().cloned(),
        ))
    }

    /// Introduce a new key generation and make it primary
    pub fn rotate(&mut self) -> HarnessResult<Epoch> {
        let current = self.primary().epoch();
        let next = current
            .value()
            .checked_add(1)
            .map(Epoch)
            .ok_or(HarnessError::EpochOverflow(current))?;

        self.channels.push(Self::make_channel(&self.config, next)?);
        self.ring = Arc::new(Self::build_ring(&self.config, &self.channels)?);

        debug!(%next, registered = self.ring.len(), "rotated primary epoch");
        Ok(next)
    }

    pub fn ring(&self) -> &Arc<EpochRing> {
        &self.ring
    }

    pub fn primary(&self) -> &Arc<AuthenticatedChannel> {
        self.ring.primary()
    }

    /// Channel for `epoch`, whether or not the ring still routes to it
    pub fn channel(&self, epoch: Epoch) -> Option<&Arc<AuthenticatedChannel>> {
        self.channels.iter().find(|channel| channel.epoch() == epoch)
    }

    pub fn epochs(&self) -> Vec<Epoch> {
        self.channels.iter().map(|channel| channel.epoch()).collect()
    }

    /// Random message of `len` bytes
    pub fn message(&mut self, len: usize) -> Vec<u8> {
        let mut msg = vec![0u8; len];
        self.rng.fill_bytes(&mut msg);
        msg
    }

    /// Random message with a length in `min..max`
    pub fn random_message(&mut self, min: usize, max: usize) -> Vec<u8> {
        let len = self.rng.gen_range(min..max);
        self.message(len)
    }

    /// Seal `msg` under every generation, returning one token per epoch
    pub fn seal_all(&self, msg: &[u8]) -> Vec<(Epoch, Vec<u8>)> {
        self.channels
            .iter()
            .map(|channel| (channel.epoch(), channel.seal(msg)))
            .collect()
    }

    /// Open every token through the ring and check it yields `msg`
    pub fn replay(&self, tokens: &[(Epoch, Vec<u8>)], msg: &[u8]) -> RotationReport {
        let mut report = RotationReport::default();
        for (epoch, token) in tokens {
            match self.ring.open(token) {
                Ok(plain) if plain == msg => report.opened.push(*epoch),
                Ok(_) => report.mismatched.push(*epoch),
                Err(err) => report.rejected.push((*epoch, err)),
            }
        }
        report
    }
}
