// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzzy matching: typo tolerance via the bitap algorithm.
//!
//! A query is compiled once into a `Pattern` (per-char bitmasks), then run
//! against any number of strings. Each run answers three questions: did it
//! match within the threshold, how good was the match (0 = exact, 1 = none),
//! and which chars matched (for highlighting).
//!
//! The score mixes two things: how many edits the match needed relative to
//! the pattern length, and how far from the expected location it landed.

mod bitap;
mod pattern;
mod score;

pub use bitap::{search as bitap_search, MIN_FUZZY_SCORE};
pub use pattern::{Alphabet, MatchResult, Pattern, PatternChunk, MAX_BITS};
pub use score::{compute_score, mask_to_ranges};

use crate::util::normalize::Folding;

/// Matcher settings, derived from `Config`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchOptions {
    /// Where in the text a match is expected (char index).
    pub location: usize,
    /// How many chars away from `location` a match can drift before its
    /// score reaches 1. Zero means only matches exactly at `location` count.
    pub distance: usize,
    /// Highest score that still counts as a match.
    pub threshold: f64,
    /// Score by edit ratio only, ignoring position.
    pub ignore_location: bool,
    /// Scan the whole text instead of stopping near `location`.
    pub find_all_matches: bool,
    /// Shortest run of matched chars worth reporting.
    pub min_match_char_length: usize,
    /// Compute match ranges.
    pub include_matches: bool,
    pub folding: Folding,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            location: 0,
            distance: 100,
            threshold: 0.6,
            ignore_location: false,
            find_all_matches: false,
            min_match_char_length: 1,
            include_matches: false,
            folding: Folding::default(),
        }
    }
}
