#![no_main]

use std::sync::Arc;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sealring_crypto::{AuthenticatedChannel, EpochRing};

#[derive(Arbitrary, Debug)]
struct Input {
    epoch: u32,
    seal_first: bool,
    flip: Option<(usize, u8)>,
    data: Vec<u8>,
}

const KEY: &[u8; 32] = b"ThisKeyIsOnlyUsedForFuzzTargets!";

fuzz_target!(|input: Input| {
    let Ok(channel) = AuthenticatedChannel::with_seed(KEY, input.epoch, 0) else {
        return;
    };
    let channel = Arc::new(channel);
    let ring = EpochRing::new(Arc::clone(&channel));

    let mut token = if input.seal_first {
        channel.seal(&input.data)
    } else {
        input.data.clone()
    };
    if let Some((index, mask)) = input.flip {
        if !token.is_empty() && mask != 0 {
            let index = index % token.len();
            token[index] ^= mask;
        }
    }

    let mut dst = b"prefix".to_vec();
    match channel.decrypt(&mut dst, &token) {
        Ok(()) => assert!(dst.starts_with(b"prefix")),
        Err(_) => assert_eq!(dst, b"prefix"),
    }

    let mut dst = Vec::new();
    if ring.decrypt(&mut dst, &token).is_err() {
        assert!(dst.is_empty());
    }

    if input.seal_first && input.flip.map_or(true, |(_, mask)| mask == 0) {
        assert_eq!(channel.open(&token).ok(), Some(input.data));
    }
});
