//! Sealring Test Harness - Key rotation scenarios
//!
//! This crate provides:
//! - Deterministic per-epoch test keys
//! - A rotation harness that advances the primary epoch and rebuilds the ring
//! - Reports of which historical tokens remain readable

pub mod rotation;

pub use rotation::*;
