// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ranking: ascending score, then ascending `ref_index`.
//!
//! `ref_index` is unique within an index, so this is a total order and the
//! same query always ranks the same way, no matter how the scoring map was
//! scheduled.

use std::cmp::Ordering;

/// Anything that can be ranked.
pub trait Ranked {
    fn score(&self) -> f64;
    fn ref_index(&self) -> usize;
}

/// Compare two results for ranking.
///
/// Sort order:
/// 1. **Score** - ascending, lower is better
/// 2. **ref_index** - ascending, earlier insertion wins ties
///
/// NaN scores compare equal to everything and fall through to `ref_index`.
pub fn compare_results<R: Ranked>(a: &R, b: &R) -> Ordering {
    match a.score().partial_cmp(&b.score()) {
        Some(ord) if ord != Ordering::Equal => ord,
        _ => a.ref_index().cmp(&b.ref_index()),
    }
}

/// Sort results best-first.
pub fn rank<R: Ranked>(results: &mut [R]) {
    results.sort_by(compare_results);
}
