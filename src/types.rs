// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! What a search hands back.
//!
//! A `SearchResult` borrows the indexed item, so callers get their own type
//! back (a `Book`, a `serde_json::Value`, a `String`) with no conversion. The
//! `ref_index` identifies the item independently of where it landed in the
//! ranking.
//!
//! # Invariants
//!
//! - **MatchRange**: `start <= end`, both char indices into `MatchDetail::value`.
//! - **SearchResult**: `ref_index` is the position the item was given when it
//!   was added. It never changes while the item stays in the index.

use serde::{Deserialize, Serialize};

/// Inclusive char range `[start, end]` of a match inside a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MatchRange {
    pub start: usize,
    pub end: usize,
}

impl MatchRange {
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "inverted range {}..={}", start, end);
        Self { start, end }
    }

    /// Number of chars covered.
    #[inline]
    pub fn len(self) -> usize {
        self.end - self.start + 1
    }

    /// Ranges are never empty; kept for clippy's `len_without_is_empty`.
    #[inline]
    pub fn is_empty(self) -> bool {
        false
    }
}

/// Where a result matched: which key, which string, which chars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDetail {
    /// Dotted key id (`"author.firstName"`); `None` for plain string items.
    pub key: Option<String>,
    /// The string that matched.
    pub value: String,
    /// Position inside an array field, when the key resolved to a list.
    pub ref_index: Option<usize>,
    /// Matched char ranges within `value`.
    pub ranges: Vec<MatchRange>,
}

/// One ranked hit.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<'a, T> {
    pub item: &'a T,
    pub ref_index: usize,
    /// Aggregate score in `[0, 1]`, lower is better. Set with `include_score`.
    pub score: Option<f64>,
    /// Set with `include_matches`.
    pub matches: Option<Vec<MatchDetail>>,
}

impl<T: Clone> SearchResult<'_, T> {
    /// Detach the result from the index.
    pub fn to_owned_result(&self) -> OwnedResult<T> {
        OwnedResult {
            item: self.item.clone(),
            ref_index: self.ref_index,
            score: self.score,
            matches: self.matches.clone(),
        }
    }
}

/// A result that owns its item. Returned where a borrow can't outlive a lock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedResult<T> {
    pub item: T,
    pub ref_index: usize,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub matches: Option<Vec<MatchDetail>>,
}

/// Per-call search options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Keep at most this many results. `None` keeps all.
    pub limit: Option<usize>,
}

impl SearchOptions {
    pub fn limit(limit: usize) -> Self {
        Self { limit: Some(limit) }
    }
}
