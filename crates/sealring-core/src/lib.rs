//! Sealring Core - Fundamental types shared by the sealing crates
//!
//! This crate defines:
//! - The `Epoch` identifier carried in front of every token
//! - Token framing constants and prefix helpers
//! - Channel configuration (epoch, nonce seeding mode)
//! - The error taxonomy returned by channels and rings

pub mod config;
pub mod epoch;
pub mod error;
pub mod frame;

pub use config::*;
pub use epoch::*;
pub use error::*;
pub use frame::{FrameParts, EPOCH_SIZE, MESSAGE_OFFSET, NONCE_OFFSET, NONCE_SIZE, OVERHEAD, TAG_SIZE};
