//! Epoch identifiers
//!
//! An epoch names one key generation. It travels as a fixed 4-byte
//! little-endian prefix on every token so receivers can route it.

use std::fmt;

use crate::frame::EPOCH_SIZE;

/// Key generation identifier
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Epoch(pub u32);

impl Epoch {
    pub const ZERO: Epoch = Epoch(0);

    #[inline]
    pub fn new(epoch: u32) -> Self {
        Epoch(epoch)
    }

    #[inline]
    pub fn value(self) -> u32 {
        self.0
    }

    /// Wire encoding used as the token prefix
    #[inline]
    pub fn to_bytes(self) -> [u8; EPOCH_SIZE] {
        self.0.to_le_bytes()
    }

    #[inline]
    pub fn from_bytes(bytes: [u8; EPOCH_SIZE]) -> Self {
        Epoch(u32::from_le_bytes(bytes))
    }
}

impl From<u32> for Epoch {
    fn from(epoch: u32) -> Self {
        Epoch(epoch)
    }
}

impl From<Epoch> for u32 {
    fn from(epoch: Epoch) -> Self {
        epoch.0
    }
}

impl fmt::Debug for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Epoch({})", self.0)
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
