// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The bitap core: approximate substring search with bit-parallel state.
//!
//! For each allowed error count `k = 0, 1, 2, ...` the text is scanned right
//! to left keeping one machine word of state per position. Bit `m` of the
//! state at a position says "the last `m + 1` pattern chars match the text
//! starting here with at most `k` edits". When the top bit lights up, the
//! whole pattern matched, starting at that position.
//!
//! Two things keep the scan short:
//!
//! 1. An exact-substring pre-pass sets a tight threshold before any bit work.
//! 2. At each error level, a binary search bounds how far from the expected
//!    location a match could still land under the current threshold. Matches
//!    beyond that window can't win, so they're never scanned.
//!
//! The loop gives up as soon as one more error can't beat the best score so far.

use super::score::{compute_score, mask_to_ranges};
use super::{Alphabet, MatchOptions, MatchResult};

/// Lowest score a bitap match reports. Only exact string equality scores 0.
pub const MIN_FUZZY_SCORE: f64 = 0.001;

/// Run bitap for one pattern chunk.
///
/// `text` and `pattern` are already folded. `pattern` must be non-empty and
/// at most `MAX_BITS` chars; `alphabet` must be the chunk's own masks.
pub fn search(
    text: &[char],
    pattern: &[char],
    alphabet: &Alphabet,
    location: usize,
    options: &MatchOptions,
) -> MatchResult {
    let pattern_len = pattern.len();
    debug_assert!(pattern_len > 0 && pattern_len <= super::MAX_BITS);

    let text_len = text.len();
    let expected_location = location.min(text_len);
    let mut current_threshold = options.threshold;

    let compute_matches = options.min_match_char_length > 1 || options.include_matches;
    let mut match_mask = if compute_matches {
        vec![false; text_len]
    } else {
        Vec::new()
    };

    // Exact occurrences first: cheap, and they tighten the threshold
    let mut from = expected_location;
    while let Some(index) = find_from(text, pattern, from) {
        let score = compute_score(pattern_len, 0, index, expected_location, options);
        current_threshold = current_threshold.min(score);
        from = index + pattern_len;

        if compute_matches {
            for slot in &mut match_mask[index..index + pattern_len] {
                *slot = true;
            }
        }
    }

    let mut best_location: Option<usize> = None;
    let mut last_bits: Vec<u64> = Vec::new();
    let mut bin_max = pattern_len + text_len;
    let top_bit: u64 = 1 << (pattern_len - 1);

    for errors in 0..pattern_len {
        // How far from the expected location can a match with this many
        // errors still land and beat the threshold?
        let mut bin_min = 0;
        let mut bin_mid = bin_max;
        while bin_min < bin_mid {
            let score = compute_score(
                pattern_len,
                errors,
                expected_location + bin_mid,
                expected_location,
                options,
            );
            if score <= current_threshold {
                bin_min = bin_mid;
            } else {
                bin_max = bin_mid;
            }
            bin_mid = (bin_max - bin_min) / 2 + bin_min;
        }

        // This window bounds the next error level too
        bin_max = bin_mid;

        let mut start = (expected_location + 1).saturating_sub(bin_mid).max(1);
        let finish = if options.find_all_matches {
            text_len
        } else {
            (expected_location + bin_mid).min(text_len) + pattern_len
        };

        let mut bits = vec![0u64; finish + 2];
        bits[finish + 1] = (1u64 << errors) - 1;

        let mut j = finish;
        while j >= start {
            let current_location = j - 1;
            let char_match = text
                .get(current_location)
                .map_or(0, |&c| alphabet.mask(c));

            if compute_matches {
                if let Some(slot) = match_mask.get_mut(current_location) {
                    *slot = char_match != 0;
                }
            }

            // Exact transition
            bits[j] = ((bits[j + 1] << 1) | 1) & char_match;

            // Substitution, insertion, deletion from the previous error level
            if errors > 0 {
                let prev_next = last_bits.get(j + 1).copied().unwrap_or(0);
                let prev_here = last_bits.get(j).copied().unwrap_or(0);
                bits[j] |= ((prev_next | prev_here) << 1) | 1 | prev_next;
            }

            if bits[j] & top_bit != 0 {
                let score = compute_score(
                    pattern_len,
                    errors,
                    current_location,
                    expected_location,
                    options,
                );

                if score <= current_threshold {
                    current_threshold = score;
                    best_location = Some(current_location);

                    // Already at or left of the expected location: it only
                    // gets worse from here
                    if current_location <= expected_location {
                        break;
                    }

                    // Don't drift further left than we are right of it
                    start = (2 * expected_location).saturating_sub(current_location).max(1);
                }
            }

            j -= 1;
        }

        // One more error can't beat what we have
        let next_level = compute_score(
            pattern_len,
            errors + 1,
            expected_location,
            expected_location,
            options,
        );
        if next_level > current_threshold {
            break;
        }

        last_bits = bits;
    }

    let mut result = match best_location {
        Some(_) => MatchResult::hit(current_threshold.max(MIN_FUZZY_SCORE)),
        None => MatchResult::miss(),
    };

    if compute_matches {
        let ranges = mask_to_ranges(&match_mask, options.min_match_char_length);
        if ranges.is_empty() {
            result = MatchResult::miss();
        } else if result.is_match && options.include_matches {
            result.ranges = ranges;
        }
    }

    result
}

/// First index `>= from` where `pattern` occurs in `text`.
fn find_from(text: &[char], pattern: &[char], from: usize) -> Option<usize> {
    if from > text.len() {
        return None;
    }
    text[from..]
        .windows(pattern.len())
        .position(|window| window == pattern)
        .map(|offset| offset + from)
}
