// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Snapshot parsing under adversarial input.
//!
//! A crafted `.bfse` file should get an error, not a crash. This target
//! hammers `inspect` and `load` with garbage: truncated headers, payload
//! lengths that lie, CRCs that don't match, brotli streams that never end.

#![no_main]

use bitfuse::binary;
use bitfuse::Fuse;
use libfuzzer_sys::fuzz_target;
use serde_json::Value;

fuzz_target!(|data: &[u8]| {
    // inspect never reads past what the header claims
    if let Ok(info) = binary::inspect(data) {
        assert!(info.header.total_size() <= data.len());
    }

    // load either fails cleanly or yields a well-formed index
    if let Ok(fuse) = binary::load::<Value>(data) {
        let fuse: Fuse<Value> = fuse;

        // INVARIANT 1: Refs strictly increase and stay below next_ref
        let refs: Vec<usize> = fuse.iter().map(|(r, _)| r).collect();
        assert!(refs.windows(2).all(|w| w[0] < w[1]));
        assert!(refs.last().map_or(true, |&r| r < fuse.next_ref_index()));

        // INVARIANT 2: A loaded index can be searched and saved again
        let _ = fuse.search("a");
        let bytes = binary::save(&fuse).expect("re-save of a loaded index");
        assert!(binary::load::<Value>(&bytes).is_ok());
    }
});
