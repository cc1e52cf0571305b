//! Sealring Crypto - Epoch-tagged authenticated encryption and key rotation
//!
//! Provides:
//! - A narrow AEAD capability (`SealingCipher`) with a ChaCha20-Poly1305 implementation
//! - Nonce generation from an internally locked generator
//! - `AuthenticatedChannel`: one key, one epoch, framed tokens
//! - `EpochRing`: decrypts tokens from every registered epoch, encrypts under the primary
//!
//! A channel seals and opens its own tokens; a second channel with the same
//! key and epoch opens them too, whatever its nonce seed:
//!
//! ```
//! use sealring_crypto::AuthenticatedChannel;
//!
//! let secret = b"ThisMustNotBeSharedWithStrangers";
//! let sender = AuthenticatedChannel::new(secret, 20170308).unwrap();
//! let token = sender.seal(b"plaintext");
//! assert_eq!(token.len(), 9 + sender.overhead());
//!
//! let receiver = AuthenticatedChannel::with_seed(secret, 20170308, 451).unwrap();
//! assert_eq!(receiver.open(&token).unwrap(), b"plaintext");
//! ```
//!
//! A ring keeps older epochs readable while new tokens use the latest key:
//!
//! ```
//! use std::sync::Arc;
//! use sealring_crypto::{AuthenticatedChannel, EpochRing};
//!
//! let latest = Arc::new(AuthenticatedChannel::new(b"ThisIsOurVeryLatestSecretKey2017", 2017).unwrap());
//! let previous = Arc::new(AuthenticatedChannel::new(b"ThisIsAKeyWeUsedPreviouslyIn2016", 2016).unwrap());
//!
//! let ring = EpochRing::new(latest);
//! ring.register(previous.clone());
//!
//! let token = ring.seal(b"I was encrypted with the latest key");
//! assert_eq!(ring.open(&token).unwrap(), b"I was encrypted with the latest key");
//!
//! let old = previous.seal(b"still readable after rotation");
//! assert_eq!(ring.open(&old).unwrap(), b"still readable after rotation");
//! ```

pub mod aead;
pub mod channel;
pub mod nonce;
pub mod ring;

pub use aead::*;
pub use channel::*;
pub use nonce::*;
pub use ring::*;

pub use sealring_core::{ChannelConfig, Epoch, NonceSeed, SealError, SealResult, OVERHEAD};
