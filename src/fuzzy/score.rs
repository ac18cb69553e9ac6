// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Match scoring and match-mask decoding.

use super::MatchOptions;
use crate::types::MatchRange;

/// Score a candidate match: edit ratio plus positional drift.
///
/// `errors / pattern_len + |expected - current| / distance`
///
/// - exact match at the expected location → 0
/// - `ignore_location` → edit ratio only
/// - `distance == 0` → any drift scores 1
///
/// Not clamped: the bitap loop compares raw values against its threshold.
pub fn compute_score(
    pattern_len: usize,
    errors: usize,
    current_location: usize,
    expected_location: usize,
    options: &MatchOptions,
) -> f64 {
    let accuracy = errors as f64 / pattern_len.max(1) as f64;

    if options.ignore_location {
        return accuracy;
    }

    let proximity = current_location.abs_diff(expected_location);

    if options.distance == 0 {
        return if proximity > 0 { 1.0 } else { accuracy };
    }

    accuracy + proximity as f64 / options.distance as f64
}

/// Turn a per-char match mask into ranges of at least `min_len` chars.
pub fn mask_to_ranges(mask: &[bool], min_len: usize) -> Vec<MatchRange> {
    let mut ranges = Vec::new();
    let mut start: Option<usize> = None;

    for (i, &matched) in mask.iter().enumerate() {
        match (matched, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                if i - s >= min_len {
                    ranges.push(MatchRange::new(s, i - 1));
                }
                start = None;
            }
            _ => {}
        }
    }

    if let Some(s) = start {
        if mask.len() - s >= min_len {
            ranges.push(MatchRange::new(s, mask.len() - 1));
        }
    }

    ranges
}
