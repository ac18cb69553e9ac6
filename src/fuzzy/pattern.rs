// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Compiled query patterns.
//!
//! Compiling folds the query (case, diacritics) and builds the bitap alphabet:
//! for every char in the pattern, a bitmask with one bit per position where
//! that char occurs. The masks live in the `Pattern`, so two patterns never
//! share state and a compiled pattern can be reused across indexes and threads.
//!
//! A machine word holds `MAX_BITS` positions. Longer queries are cut into
//! chunks of that size; the last chunk is anchored at the end of the query and
//! may overlap the one before it. Chunk scores are averaged.

use std::collections::HashMap;

use super::bitap;
use super::MatchOptions;
use crate::types::MatchRange;

/// Pattern positions per bitap word.
pub const MAX_BITS: usize = 64;

/// Char → bitmask of the positions where it occurs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alphabet {
    masks: HashMap<char, u64>,
}

impl Alphabet {
    /// Bit `len - i - 1` is set for each position `i` holding the char.
    pub fn build(pattern: &[char]) -> Self {
        let len = pattern.len();
        debug_assert!(len <= MAX_BITS);

        let mut masks: HashMap<char, u64> = HashMap::with_capacity(len);
        for (i, &c) in pattern.iter().enumerate() {
            *masks.entry(c).or_insert(0) |= 1u64 << (len - i - 1);
        }
        Self { masks }
    }

    /// Mask for a char; 0 if the char isn't in the pattern.
    #[inline]
    pub fn mask(&self, c: char) -> u64 {
        self.masks.get(&c).copied().unwrap_or(0)
    }
}

/// Up to `MAX_BITS` chars of the query with their alphabet.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternChunk {
    pub chars: Vec<char>,
    pub alphabet: Alphabet,
    /// Offset of this chunk within the whole query.
    pub start: usize,
}

impl PatternChunk {
    fn new(chars: &[char], start: usize) -> Self {
        Self {
            chars: chars.to_vec(),
            alphabet: Alphabet::build(chars),
            start,
        }
    }
}

/// Outcome of matching a pattern against one string.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub is_match: bool,
    /// 0 = exact, 1 = no match.
    pub score: f64,
    /// Filled only when the options ask for matches.
    pub ranges: Vec<MatchRange>,
}

impl MatchResult {
    pub fn hit(score: f64) -> Self {
        Self {
            is_match: true,
            score,
            ranges: Vec::new(),
        }
    }

    pub fn miss() -> Self {
        Self {
            is_match: false,
            score: 1.0,
            ranges: Vec::new(),
        }
    }
}

/// A compiled query, ready to match.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    chars: Vec<char>,
    chunks: Vec<PatternChunk>,
    options: MatchOptions,
}

impl Pattern {
    /// Compile a query. An empty query gives a pattern with no chunks, which
    /// matches no non-empty text.
    pub fn compile(query: &str, options: MatchOptions) -> Self {
        let chars = options.folding.fold(query);
        let len = chars.len();
        let mut chunks = Vec::new();

        if len > MAX_BITS {
            let remainder = len % MAX_BITS;
            let end = len - remainder;
            let mut start = 0;
            while start < end {
                chunks.push(PatternChunk::new(&chars[start..start + MAX_BITS], start));
                start += MAX_BITS;
            }
            if remainder > 0 {
                let start = len - MAX_BITS;
                chunks.push(PatternChunk::new(&chars[start..], start));
            }
        } else if len > 0 {
            chunks.push(PatternChunk::new(&chars, 0));
        }

        Self {
            chars,
            chunks,
            options,
        }
    }

    /// Pattern length in chars (after folding).
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chunks(&self) -> &[PatternChunk] {
        &self.chunks
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Match against a string. Folds the text the same way as the query.
    pub fn search_in(&self, text: &str) -> MatchResult {
        let folded = self.options.folding.fold(text);
        self.search_folded(&folded)
    }

    /// Match against text that is already folded.
    pub fn search_folded(&self, text: &[char]) -> MatchResult {
        if self.chars == text {
            let mut result = MatchResult::hit(0.0);
            if self.options.include_matches && !text.is_empty() {
                result.ranges.push(MatchRange::new(0, text.len() - 1));
            }
            return result;
        }

        if self.chunks.is_empty() {
            return MatchResult::miss();
        }

        let mut total_score = 0.0;
        let mut any_match = false;
        let mut ranges = Vec::new();

        for chunk in &self.chunks {
            let result = bitap::search(
                text,
                &chunk.chars,
                &chunk.alphabet,
                self.options.location.saturating_add(chunk.start),
                &self.options,
            );
            if result.is_match {
                any_match = true;
                ranges.extend(result.ranges);
            }
            total_score += result.score;
        }

        if !any_match {
            return MatchResult::miss();
        }

        MatchResult {
            is_match: true,
            score: total_score / self.chunks.len() as f64,
            ranges,
        }
    }
}
