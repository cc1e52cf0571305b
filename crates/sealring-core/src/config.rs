//! Channel configuration

use crate::Epoch;

/// How a channel seeds the generator its nonces are drawn from
///
/// `Entropy` seeds from the operating system and is the default. `Fixed`
/// reproduces the same nonce sequence for the same seed: two channels sharing
/// a key must never share a fixed seed, and the seed must not be attacker
/// controlled, or nonces repeat under one key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NonceSeed {
    #[default]
    Entropy,
    Fixed(u64),
}

impl NonceSeed {
    #[inline]
    pub fn is_deterministic(&self) -> bool {
        matches!(self, NonceSeed::Fixed(_))
    }

    /// Short label for diagnostics; never includes the seed value
    pub fn mode(&self) -> &'static str {
        match self {
            NonceSeed::Entropy => "entropy",
            NonceSeed::Fixed(_) => "fixed",
        }
    }
}

/// Channel configuration
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChannelConfig {
    /// Epoch stamped on every token the channel seals
    pub epoch: Epoch,
    /// Nonce generator seeding
    pub nonce_seed: NonceSeed,
}

impl ChannelConfig {
    pub fn new(epoch: impl Into<Epoch>) -> Self {
        ChannelConfig {
            epoch: epoch.into(),
            nonce_seed: NonceSeed::Entropy,
        }
    }

    /// Switch to the reproducible seeded nonce generator
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.nonce_seed = NonceSeed::Fixed(seed);
        self
    }

    pub fn with_entropy(mut self) -> Self {
        self.nonce_seed = NonceSeed::Entropy;
        self
    }
}
