//! Property-based tests for channels and rings
//!
//! 1. **Round-trip**: open(seal(m)) == m for every key, epoch, seed and message
//! 2. **Overhead**: len(seal(m)) == len(m) + overhead
//! 3. **Seed independence**: channels differing only by seed open each other's tokens
//! 4. **Routing**: a ring opens tokens from every registered epoch and rejects others
//! 5. **Primary-only encryption**: ring tokens always carry the primary's epoch

use std::sync::Arc;

use proptest::prelude::*;
use sealring_crypto::{AuthenticatedChannel, Epoch, EpochRing, SealError, KEY_SIZE, OVERHEAD};

fn key_strategy() -> impl Strategy<Value = [u8; KEY_SIZE]> {
    prop::collection::vec(any::<u8>(), KEY_SIZE..=KEY_SIZE).prop_map(|v| {
        let mut key = [0u8; KEY_SIZE];
        key.copy_from_slice(&v);
        key
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_roundtrip(
        key in key_strategy(),
        epoch in any::<u32>(),
        seed in any::<u64>(),
        plaintext in prop::collection::vec(any::<u8>(), 0..1000),
    ) {
        let channel = AuthenticatedChannel::with_seed(&key, epoch, seed).unwrap();
        let token = channel.seal(&plaintext);

        prop_assert_eq!(token.len(), plaintext.len() + channel.overhead());
        prop_assert_eq!(token.len(), plaintext.len() + OVERHEAD);
        prop_assert_eq!(channel.open(&token).unwrap(), plaintext);
    }

    #[test]
    fn prop_seed_independence(
        key in key_strategy(),
        epoch in any::<u32>(),
        seed_a in any::<u64>(),
        seed_b in any::<u64>(),
        plaintext in prop::collection::vec(any::<u8>(), 0..256),
    ) {
        let a = AuthenticatedChannel::with_seed(&key, epoch, seed_a).unwrap();
        let b = AuthenticatedChannel::with_seed(&key, epoch, seed_b).unwrap();

        prop_assert_eq!(b.open(&a.seal(&plaintext)).unwrap(), plaintext.clone());
        prop_assert_eq!(a.open(&b.seal(&plaintext)).unwrap(), plaintext);
    }

    #[test]
    fn prop_epoch_sensitivity(
        key in key_strategy(),
        epoch_a in any::<u32>(),
        epoch_b in any::<u32>(),
        plaintext in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        prop_assume!(epoch_a != epoch_b);
        let a = AuthenticatedChannel::new(&key, epoch_a).unwrap();
        let b = AuthenticatedChannel::new(&key, epoch_b).unwrap();

        prop_assert_eq!(b.open(&a.seal(&plaintext)), Err(SealError::UnknownEpoch(Epoch(epoch_a))));
    }

    #[test]
    fn prop_key_sensitivity(
        key_a in key_strategy(),
        key_b in key_strategy(),
        epoch in any::<u32>(),
        plaintext in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        prop_assume!(key_a != key_b);
        let a = AuthenticatedChannel::new(&key_a, epoch).unwrap();
        let b = AuthenticatedChannel::new(&key_b, epoch).unwrap();

        prop_assert_eq!(b.open(&a.seal(&plaintext)), Err(SealError::AuthenticationFailed));
    }

    #[test]
    fn prop_truncated_tokens_rejected(
        key in key_strategy(),
        plaintext in prop::collection::vec(any::<u8>(), 0..64),
        cut in 0usize..OVERHEAD,
    ) {
        let channel = AuthenticatedChannel::new(&key, 1).unwrap();
        let token = channel.seal(&plaintext);

        prop_assert_eq!(channel.open(&token[..cut]), Err(SealError::BadToken));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_ring_routing(
        key in key_strategy(),
        primary_epoch in any::<u32>(),
        legacy_epochs in prop::collection::hash_set(any::<u32>(), 1..8),
        stranger in any::<u32>(),
        plaintext in prop::collection::vec(any::<u8>(), 0..128),
    ) {
        prop_assume!(!legacy_epochs.contains(&primary_epoch));
        prop_assume!(stranger != primary_epoch && !legacy_epochs.contains(&stranger));

        let primary = Arc::new(AuthenticatedChannel::new(&key, primary_epoch).unwrap());
        let ring = EpochRing::new(Arc::clone(&primary));

        let legacy: Vec<_> = legacy_epochs
            .iter()
            .map(|&epoch| Arc::new(AuthenticatedChannel::new(&key, epoch).unwrap()))
            .collect();
        for channel in &legacy {
            ring.register(Arc::clone(channel));
        }

        prop_assert_eq!(ring.len(), legacy.len() + 1);

        for channel in &legacy {
            prop_assert_eq!(ring.open(&channel.seal(&plaintext)).unwrap(), plaintext.clone());
        }

        let outsider = AuthenticatedChannel::new(&key, stranger).unwrap();
        prop_assert_eq!(ring.open(&outsider.seal(&plaintext)), Err(SealError::BadToken));

        let token = ring.seal(&plaintext);
        prop_assert_eq!(&token[..4], &Epoch(primary_epoch).to_bytes()[..]);
        prop_assert_eq!(primary.open(&token).unwrap(), plaintext);
    }

    #[test]
    fn prop_ring_rejects_short_tokens(
        key in key_strategy(),
        token in prop::collection::vec(any::<u8>(), 0..4),
    ) {
        let ring = EpochRing::new(Arc::new(AuthenticatedChannel::new(&key, 0).unwrap()));
        prop_assert_eq!(ring.open(&token), Err(SealError::BadToken));
    }
}
